//! Skills and their resolution.
//!
//! A [`Skill`] carries metadata (spread, element, method, affinity) and an
//! ordered hook list per resolution stage. [`pipeline::resolve`] runs those
//! hooks against a source and one or more targets.
mod builtin;
mod catalog;
mod context;
mod error;
pub mod formula;
mod hook;
pub mod pipeline;

pub use builtin::{
    AccuracyCheck, ApplyStatus, CriticalModifier, DamageEffect, HealEffect, PoolCost, Recoil,
    ResistanceModifier, ScriptedEffect, SelfStatus,
};
pub use catalog::{EffectOutcome, PoolCosts, SkillBehavior, SkillCatalog, SkillDetails};
pub use context::{HookContext, ScriptContext};
pub use error::{BehaviorError, CatalogError, SkillError};
pub use hook::{
    CheckHook, CostHook, EffectHook, HitCheck, Hook, HookId, ModifierHook, Multiplier, PostHook,
};

use core::fmt;
use std::sync::Arc;

use strum::Display;

use crate::entity::Entity;
use crate::stats::Element;

/// Targeting shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillSpread {
    /// Affects the user only.
    #[strum(serialize = "self")]
    SelfOnly,
    /// Affects the chosen target.
    #[default]
    Single,
    /// Chosen target at full magnitude, its living teammates at a reduced one.
    SemiArea,
    /// Chosen target and all of its living teammates.
    Area,
    /// Every living combatant on both sides.
    Field,
}

/// Which attack/defense pair drives the skill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillMethod {
    #[default]
    Physical,
    Magical,
    Mixed,
    None,
}

/// Which side a skill is meant for. Guides AI target selection only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Affinity {
    #[default]
    Hostile,
    Friendly,
}

/// Index of a skill in its owner's skill list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillSlot(usize);

impl SkillSlot {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

/// A usable skill: metadata plus hook lists per stage.
///
/// Hooks are shared behind `Arc`, so cloning a skill is cheap and edits to a
/// clone never affect the original.
#[derive(Clone)]
pub struct Skill {
    name: String,
    description: String,
    level: u32,
    max_level: u32,
    spread: SkillSpread,
    method: SkillMethod,
    element: Element,
    affinity: Affinity,
    costs: Vec<Arc<dyn CostHook>>,
    checks: Vec<Arc<dyn CheckHook>>,
    modifiers: Vec<Arc<dyn ModifierHook>>,
    effects: Vec<Arc<dyn EffectHook>>,
    posts: Vec<Arc<dyn PostHook>>,
}

/// Inserts `hook`, replacing an existing hook with the same id in place.
fn upsert<H: Hook + ?Sized>(hooks: &mut Vec<Arc<H>>, hook: Arc<H>) {
    let id = hook.id();
    match hooks.iter().position(|existing| existing.id() == id) {
        Some(index) => hooks[index] = hook,
        None => hooks.push(hook),
    }
}

fn remove<H: Hook + ?Sized>(hooks: &mut Vec<Arc<H>>, id: &HookId) -> bool {
    let before = hooks.len();
    hooks.retain(|hook| &hook.id() != id);
    hooks.len() != before
}

impl Skill {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            level: 1,
            max_level: 1,
            spread: SkillSpread::default(),
            method: SkillMethod::default(),
            element: Element::default(),
            affinity: Affinity::default(),
            costs: Vec::new(),
            checks: Vec::new(),
            modifiers: Vec::new(),
            effects: Vec::new(),
            posts: Vec::new(),
        }
    }

    // ===== builder =====

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the level; `max_level` is raised to match if needed.
    #[must_use]
    pub fn with_level(mut self, level: u32, max_level: u32) -> Self {
        self.level = level.max(1);
        self.max_level = max_level.max(self.level);
        self
    }

    #[must_use]
    pub fn with_spread(mut self, spread: SkillSpread) -> Self {
        self.spread = spread;
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: SkillMethod) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    #[must_use]
    pub fn with_affinity(mut self, affinity: Affinity) -> Self {
        self.affinity = affinity;
        self
    }

    #[must_use]
    pub fn with_cost(mut self, hook: impl CostHook + 'static) -> Self {
        self.add_cost(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn with_check(mut self, hook: impl CheckHook + 'static) -> Self {
        self.add_check(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn with_modifier(mut self, hook: impl ModifierHook + 'static) -> Self {
        self.add_modifier(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn with_effect(mut self, hook: impl EffectHook + 'static) -> Self {
        self.add_effect(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn with_post(mut self, hook: impl PostHook + 'static) -> Self {
        self.add_post(Arc::new(hook));
        self
    }

    // ===== hook editing =====

    pub fn add_cost(&mut self, hook: Arc<dyn CostHook>) {
        upsert(&mut self.costs, hook);
    }

    pub fn add_check(&mut self, hook: Arc<dyn CheckHook>) {
        upsert(&mut self.checks, hook);
    }

    pub fn add_modifier(&mut self, hook: Arc<dyn ModifierHook>) {
        upsert(&mut self.modifiers, hook);
    }

    pub fn add_effect(&mut self, hook: Arc<dyn EffectHook>) {
        upsert(&mut self.effects, hook);
    }

    pub fn add_post(&mut self, hook: Arc<dyn PostHook>) {
        upsert(&mut self.posts, hook);
    }

    /// Removes every hook with `id`, whatever its stage.
    pub fn remove_hook(&mut self, id: &HookId) -> bool {
        // Non-short-circuiting so every stage is visited.
        remove(&mut self.costs, id)
            | remove(&mut self.checks, id)
            | remove(&mut self.modifiers, id)
            | remove(&mut self.effects, id)
            | remove(&mut self.posts, id)
    }

    pub fn hook_ids(&self) -> Vec<HookId> {
        self.all_hooks().map(|hook| hook.id()).collect()
    }

    fn all_hooks(&self) -> impl Iterator<Item = &dyn Hook> {
        let costs = self.costs.iter().map(|h| h.as_ref() as &dyn Hook);
        let checks = self.checks.iter().map(|h| h.as_ref() as &dyn Hook);
        let modifiers = self.modifiers.iter().map(|h| h.as_ref() as &dyn Hook);
        let effects = self.effects.iter().map(|h| h.as_ref() as &dyn Hook);
        let posts = self.posts.iter().map(|h| h.as_ref() as &dyn Hook);
        costs.chain(checks).chain(modifiers).chain(effects).chain(posts)
    }

    // ===== accessors =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    pub fn spread(&self) -> SkillSpread {
        self.spread
    }

    pub fn method(&self) -> SkillMethod {
        self.method
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn affinity(&self) -> Affinity {
        self.affinity
    }

    pub(crate) fn costs(&self) -> &[Arc<dyn CostHook>] {
        &self.costs
    }

    pub(crate) fn checks(&self) -> &[Arc<dyn CheckHook>] {
        &self.checks
    }

    pub(crate) fn modifiers(&self) -> &[Arc<dyn ModifierHook>] {
        &self.modifiers
    }

    pub(crate) fn effects(&self) -> &[Arc<dyn EffectHook>] {
        &self.effects
    }

    pub(crate) fn posts(&self) -> &[Arc<dyn PostHook>] {
        &self.posts
    }

    /// True when every cost hook reports the cost payable.
    pub fn is_usable_by(&self, entity: &Entity) -> bool {
        self.costs.iter().all(|cost| cost.can_pay(entity))
    }

    /// Sum of the power reported by hooks, if any reports one.
    pub fn power(&self) -> Option<i32> {
        self.all_hooks()
            .filter_map(|hook| hook.power())
            .reduce(|a, b| a.saturating_add(b))
    }

    /// Lowest accuracy reported by hooks, if any reports one.
    pub fn accuracy(&self) -> Option<i32> {
        self.all_hooks().filter_map(|hook| hook.accuracy()).min()
    }

    /// Authored description followed by the fragments of every hook.
    pub fn describe(&self) -> String {
        let fragments: Vec<String> = self.all_hooks().filter_map(|hook| hook.describe()).collect();
        match (self.description.is_empty(), fragments.is_empty()) {
            (true, _) => fragments.join("; "),
            (false, true) => self.description.clone(),
            (false, false) => format!("{} ({})", self.description, fragments.join("; ")),
        }
    }
}

impl fmt::Debug for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Skill")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("spread", &self.spread)
            .field("method", &self.method)
            .field("element", &self.element)
            .field("hooks", &self.hook_ids())
            .finish()
    }
}
