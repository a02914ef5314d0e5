//! Content factory for spawning battle-ready entities from data files.

use std::path::Path;

use battle_core::{BattleConfig, CatalogError, Entity, EntityIdentity, SkillCatalog};

use crate::loaders::{
    ConfigLoader, EntityCatalog, EntityLoader, EntityTemplate, LoadResult, RonSkillCatalog,
};

const EMBEDDED_SKILLS: &str = include_str!("../../data/skills.ron");
const EMBEDDED_ENTITIES: &str = include_str!("../../data/entities.ron");
const EMBEDDED_CONFIG: &str = include_str!("../../data/config.toml");

/// All battle content, loaded and cross-checked.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml    (optional)
/// ├── skills.ron
/// └── entities.ron
/// ```
#[derive(Clone, Debug)]
pub struct ContentFactory {
    skills: RonSkillCatalog,
    entities: EntityCatalog,
    config: BattleConfig,
}

impl ContentFactory {
    /// Load every catalog from `data_dir`. A missing `config.toml` means
    /// default tuning.
    pub fn load(data_dir: &Path) -> LoadResult<Self> {
        let config_path = data_dir.join("config.toml");
        let config = if config_path.exists() {
            ConfigLoader::load(&config_path)?
        } else {
            tracing::debug!("{} not found, using default config", config_path.display());
            BattleConfig::default()
        };

        Self::from_parts(
            RonSkillCatalog::load(&data_dir.join("skills.ron"))?,
            EntityLoader::load(&data_dir.join("entities.ron"))?,
            config,
        )
    }

    /// Content compiled into the crate.
    pub fn embedded() -> LoadResult<Self> {
        Self::from_parts(
            RonSkillCatalog::parse(EMBEDDED_SKILLS)?,
            EntityLoader::parse(EMBEDDED_ENTITIES)?,
            ConfigLoader::parse(EMBEDDED_CONFIG)?,
        )
    }

    /// Every skill a template can learn must exist at the requested level.
    pub fn from_parts(
        skills: RonSkillCatalog,
        entities: EntityCatalog,
        config: BattleConfig,
    ) -> LoadResult<Self> {
        let skills = skills.with_config(&config);
        for template in entities.iter() {
            for learned in &template.skills {
                skills.lookup(&learned.name, learned.level).map_err(|e| {
                    anyhow::anyhow!(
                        "Template {} {} learns an invalid skill: {}",
                        template.kind,
                        template.variant,
                        e
                    )
                })?;
            }
        }

        tracing::debug!(
            "loaded {} skills and {} entity templates",
            skills.len(),
            entities.len()
        );
        Ok(Self {
            skills,
            entities,
            config,
        })
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn skills(&self) -> &RonSkillCatalog {
        &self.skills
    }

    pub fn entities(&self) -> &EntityCatalog {
        &self.entities
    }

    pub fn template(&self, kind: &str, variant: &str) -> Option<&EntityTemplate> {
        self.entities.get(kind, variant)
    }

    /// Creates a level-`level` entity from a template, with full pools and
    /// every skill unlocked at that level. Level 0 counts as 1.
    pub fn spawn(
        &self,
        kind: &str,
        variant: &str,
        name: &str,
        level: u32,
    ) -> Result<Entity, CatalogError> {
        let template = self
            .template(kind, variant)
            .ok_or_else(|| CatalogError::UnknownTemplate {
                kind: kind.to_owned(),
                variant: variant.to_owned(),
            })?;
        let level = level.max(1);

        let mut entity = Entity::new(
            EntityIdentity::new(kind, variant, name),
            level,
            template.stats_at(level),
        );
        for learned in template.skills_at(level) {
            entity.learn_skill(self.skills.build(&learned.name, learned.level)?);
        }

        tracing::debug!(
            "spawned {} ({} {}) at level {} with {} skills",
            name,
            kind,
            variant,
            level,
            entity.skills().len()
        );
        Ok(entity)
    }
}
