//! Data-driven battle content.
//!
//! This crate turns authored data into engine objects:
//! - Declarative skill behaviors (damage, healing, pool changes, statuses)
//! - Skill catalog (data-driven via RON)
//! - Entity templates with per-level growth (data-driven via RON)
//! - Battle configuration (data-driven via TOML)
//!
//! Catalogs and templates are read when entities are spawned. Skills built
//! from the catalog carry a [`DeclarativeBehavior`], which runs inside the
//! effect stage of every resolution.

pub mod behavior;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use behavior::{DeclarativeBehavior, EffectSpec};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EntityCatalog, EntityLoader, EntityTemplate, LearnedSkill,
    RonSkillCatalog, SkillLoader, SkillSpec, StatBlockSpec,
};
