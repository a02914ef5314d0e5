//! Skill catalog loader.
//!
//! Loads skill definitions from RON and serves them through
//! [`SkillCatalog`].

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use battle_core::skill::{CriticalModifier, Recoil, ResistanceModifier, SelfStatus};
use battle_core::{
    Affinity, BattleConfig, CatalogError, Element, PoolCosts, Skill, SkillCatalog, SkillDetails,
    SkillMethod, SkillSpread, StatusEffect, StatusKind,
};
use serde::Deserialize;

use crate::behavior::{DeclarativeBehavior, EffectSpec};
use crate::loaders::{LoadResult, read_file};

fn first_level() -> u32 {
    1
}

/// One authored skill, valid for levels `1..=max_level`.
#[derive(Clone, Debug, Deserialize)]
pub struct SkillSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "first_level")]
    pub max_level: u32,
    #[serde(default)]
    pub costs: PoolCosts,
    /// Base hit chance; skills without one never miss.
    #[serde(default)]
    pub accuracy: Option<i32>,
    /// Critical hit chance in percent.
    #[serde(default)]
    pub critical: Option<i32>,
    /// Share of the user's max health lost after use.
    #[serde(default)]
    pub recoil: Option<i32>,
    /// Preset status granted to the user after use.
    #[serde(default)]
    pub grants: Option<StatusKind>,
    #[serde(default)]
    pub spread: SkillSpread,
    #[serde(default)]
    pub method: SkillMethod,
    #[serde(default)]
    pub element: Element,
    #[serde(default)]
    pub affinity: Affinity,
    pub effects: Vec<EffectSpec>,
}

impl SkillSpec {
    /// Rejects definitions that could only fail at resolution time.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let malformed = |reason: String| CatalogError::Malformed {
            name: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(malformed("empty name".into()));
        }
        if self.max_level == 0 {
            return Err(malformed("max_level must be at least 1".into()));
        }
        if self.effects.is_empty() {
            return Err(malformed("no effects".into()));
        }
        if let Some((pool, amount)) = self.costs.iter().find(|(_, amount)| *amount < 0) {
            return Err(malformed(format!("negative {pool} cost {amount}")));
        }

        let presets = self.effects.iter().filter_map(|effect| match effect {
            EffectSpec::ApplyStatus { status, .. } => Some(status),
            _ => None,
        });
        for status in presets.chain(self.grants.as_ref()) {
            if StatusEffect::preset(status.clone()).is_none() {
                return Err(malformed(format!("no preset for status {status}")));
            }
        }
        Ok(())
    }

    /// Sum of the effect powers at `level`, if any effect has one.
    pub fn power_at(&self, level: u32) -> Option<i32> {
        self.effects
            .iter()
            .filter_map(|effect| effect.power_at(level))
            .reduce(|a, b| a.saturating_add(b))
    }
}

/// Loader for skill definitions from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load skill definitions from a RON file.
    ///
    /// RON format: `Vec<SkillSpec>`
    pub fn load(path: &Path) -> LoadResult<Vec<SkillSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SkillSpec>> {
        let specs: Vec<SkillSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        for spec in &specs {
            spec.validate()
                .map_err(|e| anyhow::anyhow!("Invalid skill definition: {}", e))?;
        }
        Ok(specs)
    }
}

/// [`SkillCatalog`] backed by authored [`SkillSpec`]s.
#[derive(Clone, Debug)]
pub struct RonSkillCatalog {
    skills: BTreeMap<String, SkillSpec>,
    critical_bonus_percent: i32,
}

impl RonSkillCatalog {
    /// Builds a catalog; names must be unique.
    pub fn new(specs: Vec<SkillSpec>) -> LoadResult<Self> {
        let mut skills = BTreeMap::new();
        for spec in specs {
            let name = spec.name.clone();
            if skills.insert(name.clone(), spec).is_some() {
                anyhow::bail!("Duplicate skill definition '{}'", name);
            }
        }
        Ok(Self {
            skills,
            critical_bonus_percent: BattleConfig::DEFAULT_CRITICAL_BONUS_PERCENT,
        })
    }

    pub fn load(path: &Path) -> LoadResult<Self> {
        Self::new(SkillLoader::load(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<Self> {
        Self::new(SkillLoader::parse(content)?)
    }

    /// Takes the critical bonus from `config`.
    #[must_use]
    pub fn with_config(mut self, config: &BattleConfig) -> Self {
        self.critical_bonus_percent = config.critical_bonus_percent;
        self
    }

    pub fn spec(&self, name: &str) -> Option<&SkillSpec> {
        self.skills.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.skills.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.skills.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl SkillCatalog for RonSkillCatalog {
    fn lookup(&self, name: &str, level: u32) -> Result<SkillDetails, CatalogError> {
        let spec = self
            .skills
            .get(name)
            .ok_or_else(|| CatalogError::UnknownSkill(name.to_owned()))?;
        if level == 0 || level > spec.max_level {
            return Err(CatalogError::InvalidLevel {
                name: name.to_owned(),
                level,
                max_level: spec.max_level,
            });
        }

        Ok(SkillDetails {
            name: spec.name.clone(),
            description: spec.description.clone(),
            level,
            max_level: spec.max_level,
            costs: spec.costs,
            power: spec.power_at(level),
            accuracy: spec.accuracy,
            spread: spec.spread,
            method: spec.method,
            element: spec.element,
            affinity: spec.affinity,
            behavior: Arc::new(DeclarativeBehavior::new(
                spec.method,
                level,
                spec.effects.clone(),
            )),
        })
    }

    /// Adds the optional hooks a catalog entry can ask for on top of
    /// [`Skill::from_details`]: elemental resistance, critical hits, recoil
    /// and a self-granted status.
    fn build(&self, name: &str, level: u32) -> Result<Skill, CatalogError> {
        let details = self.lookup(name, level)?;
        let Some(spec) = self.skills.get(name) else {
            return Err(CatalogError::UnknownSkill(name.to_owned()));
        };

        let mut skill = Skill::from_details(details);
        if spec.element != Element::Neutral {
            skill = skill.with_modifier(ResistanceModifier::new(spec.element));
        }
        if let Some(chance) = spec.critical {
            skill = skill.with_modifier(CriticalModifier::new(chance, self.critical_bonus_percent));
        }
        if let Some(percent) = spec.recoil {
            skill = skill.with_post(Recoil::new(percent));
        }
        if let Some(effect) = spec.grants.clone().and_then(StatusEffect::preset) {
            skill = skill.with_post(SelfStatus::new(effect, true));
        }

        tracing::trace!("built {} at level {}: {:?}", name, level, skill);
        Ok(skill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::skill::{AccuracyCheck, ScriptedEffect};

    const CATALOG: &str = r#"[
        (
            name: "fireball",
            description: "Hurls a ball of fire",
            max_level: 3,
            costs: (mana: Some(4)),
            accuracy: Some(90),
            critical: Some(10),
            method: Magical,
            element: Fire,
            effects: [Damage(power: 1, per_level: 1)],
        ),
        (
            name: "war_cry",
            spread: SelfOnly,
            affinity: Friendly,
            grants: Some(AttackBoost),
            effects: [Notify("{source} roars")],
        ),
    ]"#;

    fn catalog() -> RonSkillCatalog {
        RonSkillCatalog::parse(CATALOG).unwrap()
    }

    #[test]
    fn lookup_scales_power_with_level() {
        let catalog = catalog();
        let details = catalog.lookup("fireball", 3).unwrap();
        assert_eq!(details.power, Some(3));
        assert_eq!(details.costs.mana, Some(4));
        assert_eq!(details.element, Element::Fire);
        assert_eq!(catalog.lookup("war_cry", 1).unwrap().power, None);
    }

    #[test]
    fn lookup_rejects_unknown_names_and_levels() {
        let catalog = catalog();
        assert_eq!(
            catalog.lookup("meteor", 1).unwrap_err(),
            CatalogError::UnknownSkill("meteor".into())
        );
        for level in [0, 4] {
            assert!(matches!(
                catalog.lookup("fireball", level),
                Err(CatalogError::InvalidLevel { max_level: 3, .. })
            ));
        }
    }

    #[test]
    fn build_adds_requested_hooks() {
        let skill = catalog().build("fireball", 2).unwrap();
        let ids = skill.hook_ids();
        assert!(ids.contains(&AccuracyCheck::ID));
        assert!(ids.contains(&ResistanceModifier::ID));
        assert!(ids.contains(&CriticalModifier::ID));
        assert!(ids.contains(&ScriptedEffect::ID));
        assert_eq!(skill.level(), 2);
        assert_eq!(skill.max_level(), 3);

        let cry = catalog().build("war_cry", 1).unwrap();
        assert_eq!(cry.spread(), SkillSpread::SelfOnly);
        assert!(!cry.hook_ids().contains(&ResistanceModifier::ID));
        assert_eq!(cry.hook_ids().len(), 2);
    }

    #[test]
    fn malformed_entries_fail_to_load() {
        let no_effects = r#"[(name: "dud", effects: [])]"#;
        assert!(SkillLoader::parse(no_effects).is_err());

        let named_preset = r#"[(name: "hex", effects: [ApplyStatus(status: Named("doom"))])]"#;
        assert!(SkillLoader::parse(named_preset).is_err());

        let duplicate = r#"[
            (name: "jab", effects: [Damage(power: 1)]),
            (name: "jab", effects: [Damage(power: 2)]),
        ]"#;
        assert!(RonSkillCatalog::parse(duplicate).is_err());
    }

    #[test]
    fn critical_bonus_follows_config() {
        let config = BattleConfig::default().with_critical_bonus_percent(100);
        let catalog = catalog().with_config(&config);
        assert_eq!(catalog.critical_bonus_percent, 100);
    }
}
