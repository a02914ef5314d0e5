//! Calling contract for externally authored skills.
//!
//! Content lives outside the engine. A [`SkillCatalog`] turns a skill name
//! and level into [`SkillDetails`]; [`Skill::from_details`] assembles the
//! hook lists, wrapping the authored [`SkillBehavior`] in a
//! [`ScriptedEffect`].

use std::sync::Arc;

use super::builtin::{AccuracyCheck, PoolCost, ScriptedEffect};
use super::context::ScriptContext;
use super::{Affinity, BehaviorError, CatalogError, Skill, SkillMethod, SkillSpread};
use crate::stats::{Element, Pool};

/// What a behavior reports after running against one target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectOutcome {
    Applied,
    /// The behavior decided the target was missed; a `Miss` is logged.
    Missed,
    NoEffect,
}

/// Authored effect logic of a catalog skill.
pub trait SkillBehavior: Send + Sync {
    fn perform(&self, ctx: &mut ScriptContext<'_, '_>) -> Result<EffectOutcome, BehaviorError>;
}

/// Optional per-pool costs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoolCosts {
    pub health: Option<i32>,
    pub mana: Option<i32>,
    pub tech: Option<i32>,
}

impl PoolCosts {
    pub fn iter(&self) -> impl Iterator<Item = (Pool, i32)> {
        [
            (Pool::Health, self.health),
            (Pool::Mana, self.mana),
            (Pool::Tech, self.tech),
        ]
        .into_iter()
        .filter_map(|(pool, cost)| cost.map(|amount| (pool, amount)))
    }
}

/// Everything needed to build a [`Skill`] at a given level.
#[derive(Clone)]
pub struct SkillDetails {
    pub name: String,
    pub description: String,
    pub level: u32,
    pub max_level: u32,
    pub costs: PoolCosts,
    pub power: Option<i32>,
    pub accuracy: Option<i32>,
    pub spread: SkillSpread,
    pub method: SkillMethod,
    pub element: Element,
    pub affinity: Affinity,
    pub behavior: Arc<dyn SkillBehavior>,
}

impl core::fmt::Debug for SkillDetails {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SkillDetails")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("max_level", &self.max_level)
            .field("costs", &self.costs)
            .field("power", &self.power)
            .field("accuracy", &self.accuracy)
            .field("spread", &self.spread)
            .field("method", &self.method)
            .field("element", &self.element)
            .finish_non_exhaustive()
    }
}

/// Source of skill definitions.
pub trait SkillCatalog {
    /// Details of `name` at `level`. Unknown names and out-of-range levels
    /// are errors, never silent defaults.
    fn lookup(&self, name: &str, level: u32) -> Result<SkillDetails, CatalogError>;

    fn build(&self, name: &str, level: u32) -> Result<Skill, CatalogError> {
        self.lookup(name, level).map(Skill::from_details)
    }
}

impl Skill {
    /// Assembles a skill: one [`PoolCost`] per authored cost, an
    /// [`AccuracyCheck`] when accuracy is set, and the behavior as the sole
    /// effect.
    pub fn from_details(details: SkillDetails) -> Self {
        let mut skill = Skill::new(details.name)
            .with_description(details.description)
            .with_level(details.level, details.max_level)
            .with_spread(details.spread)
            .with_method(details.method)
            .with_element(details.element)
            .with_affinity(details.affinity);

        for (pool, amount) in details.costs.iter() {
            skill.add_cost(Arc::new(PoolCost::new(pool, amount)));
        }
        if let Some(accuracy) = details.accuracy {
            skill.add_check(Arc::new(AccuracyCheck::new(accuracy)));
        }
        skill.add_effect(Arc::new(
            ScriptedEffect::new(details.behavior).with_power(details.power),
        ));
        skill
    }
}
