//! Deterministic combat resolution for turn-based battles.
//!
//! The crate is split into a handful of layers, leaves first:
//!
//! - [`stats`]: stat blocks, elements, pools and the modifier engine that
//!   derives effective stats.
//! - [`status`]: timed or permanent modifier bundles attached to entities.
//! - [`entity`]: combatants with pools, status effects, skills and a
//!   controller.
//! - [`skill`]: hook-based skill definitions and the resolution pipeline.
//! - [`controller`]: decision makers (AI, interactive, nested override).
//! - [`battle`]: the roster arena and the readiness-ordered turn scheduler.
//!
//! Everything is single-threaded and turn-synchronous. The only suspension
//! point is [`controller::Action::Delegate`], which hands control back to the
//! driver until a choice is supplied.
pub mod battle;
pub mod config;
pub mod controller;
pub mod entity;
pub mod error;
pub mod message;
pub mod rng;
pub mod skill;
pub mod stats;
pub mod status;

pub use battle::{
    AlwaysFlee, BattleError, BattleSystem, BattleView, Combatant, EntityHandle, FleePolicy,
    Roster, SpeedFlee, Team, Tick, TurnOutcome,
};
pub use config::BattleConfig;
pub use controller::{
    Action, ControlError, Controller, NestedController, NpcController, NullController,
    PlayerController, UserOptions,
};
pub use entity::{Entity, EntityIdentity};
pub use error::{EngineError, ErrorSeverity};
pub use message::{Message, MessageLog, SkillUse};
pub use rng::{BattleRng, PcgRng, ScriptedRng};
pub use skill::{
    Affinity, BehaviorError, CatalogError, EffectOutcome, HookId, Multiplier, PoolCosts,
    ScriptContext, Skill, SkillBehavior, SkillCatalog, SkillDetails, SkillError, SkillMethod,
    SkillSlot, SkillSpread,
};
pub use stats::{
    Element, ModifierMode, Pool, Resistances, StatKind, StatModifier, StatTarget, Stats,
    compute_effective,
};
pub use status::{EffectDuration, StatusEffect, StatusKind};
