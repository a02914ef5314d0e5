//! Content loaders for reading battle data from files.
//!
//! Skills and entity templates are authored in RON, battle tuning in TOML.
//! Every loader also accepts an in-memory source so embedded data and tests
//! share the same parsing path.

pub mod config;
pub mod entities;
pub mod factory;
pub mod skills;

pub use config::ConfigLoader;
pub use entities::{EntityCatalog, EntityLoader, EntityTemplate, LearnedSkill, StatBlockSpec};
pub use factory::ContentFactory;
pub use skills::{RonSkillCatalog, SkillLoader, SkillSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
