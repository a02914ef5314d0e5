//! Entity template loader.
//!
//! Templates are keyed by kind and variant. Stats grow linearly with level
//! and skills unlock at authored levels.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use battle_core::{Element, Stats};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

fn first_level() -> u32 {
    1
}

/// Authoring form of a stat block. Omitted stats and resistances are zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatBlockSpec {
    pub max_health: i32,
    pub max_mana: i32,
    pub max_tech: i32,
    pub physical_attack: i32,
    pub physical_defense: i32,
    pub magical_attack: i32,
    pub magical_defense: i32,
    pub skill: i32,
    pub evade: i32,
    pub speed: i32,
    pub resistances: BTreeMap<Element, i32>,
}

impl StatBlockSpec {
    /// `self + growth * steps`, per stat and per resistance.
    pub fn grown(&self, growth: &StatBlockSpec, steps: u32) -> Stats {
        let steps = i32::try_from(steps).unwrap_or(i32::MAX);
        let grow = |base: i32, per: i32| base.saturating_add(per.saturating_mul(steps));

        let mut stats = Stats {
            max_health: grow(self.max_health, growth.max_health),
            max_mana: grow(self.max_mana, growth.max_mana),
            max_tech: grow(self.max_tech, growth.max_tech),
            physical_attack: grow(self.physical_attack, growth.physical_attack),
            physical_defense: grow(self.physical_defense, growth.physical_defense),
            magical_attack: grow(self.magical_attack, growth.magical_attack),
            magical_defense: grow(self.magical_defense, growth.magical_defense),
            skill: grow(self.skill, growth.skill),
            evade: grow(self.evade, growth.evade),
            speed: grow(self.speed, growth.speed),
            ..Stats::default()
        };

        let elements: BTreeSet<Element> = self
            .resistances
            .keys()
            .chain(growth.resistances.keys())
            .copied()
            .collect();
        for element in elements {
            let base = self.resistances.get(&element).copied().unwrap_or_default();
            let per = growth.resistances.get(&element).copied().unwrap_or_default();
            stats.resistances.set(element, grow(base, per));
        }
        stats
    }
}

/// A skill a template knows once it reaches `from_level`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LearnedSkill {
    pub name: String,
    #[serde(default = "first_level")]
    pub level: u32,
    #[serde(default = "first_level")]
    pub from_level: u32,
}

/// Blueprint for spawning entities of one kind and variant.
#[derive(Clone, Debug, Deserialize)]
pub struct EntityTemplate {
    pub kind: String,
    pub variant: String,
    /// Stats at level 1.
    #[serde(default)]
    pub base: StatBlockSpec,
    /// Added once per level above 1.
    #[serde(default)]
    pub growth: StatBlockSpec,
    #[serde(default)]
    pub skills: Vec<LearnedSkill>,
}

impl EntityTemplate {
    pub fn stats_at(&self, level: u32) -> Stats {
        self.base.grown(&self.growth, level.saturating_sub(1))
    }

    /// Skills unlocked at `level`, in authored order.
    pub fn skills_at(&self, level: u32) -> impl Iterator<Item = &LearnedSkill> {
        self.skills
            .iter()
            .filter(move |skill| skill.from_level <= level)
    }
}

/// Templates indexed by `(kind, variant)`.
#[derive(Clone, Debug, Default)]
pub struct EntityCatalog {
    templates: HashMap<(String, String), EntityTemplate>,
}

impl EntityCatalog {
    pub fn new(templates: Vec<EntityTemplate>) -> LoadResult<Self> {
        let mut catalog = Self::default();
        for template in templates {
            let key = (template.kind.clone(), template.variant.clone());
            if catalog.templates.contains_key(&key) {
                anyhow::bail!("Duplicate entity template {} {}", key.0, key.1);
            }
            catalog.templates.insert(key, template);
        }
        Ok(catalog)
    }

    pub fn get(&self, kind: &str, variant: &str) -> Option<&EntityTemplate> {
        self.templates.get(&(kind.to_owned(), variant.to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityTemplate> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Loader for entity templates from RON files.
pub struct EntityLoader;

impl EntityLoader {
    /// Load entity templates from a RON file.
    ///
    /// RON format: `Vec<EntityTemplate>`
    pub fn load(path: &Path) -> LoadResult<EntityCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EntityCatalog> {
        let templates: Vec<EntityTemplate> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse entity templates RON: {}", e))?;
        EntityCatalog::new(templates)
    }
}
