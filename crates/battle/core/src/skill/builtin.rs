//! Built-in hooks covering the common skill shapes.

use std::sync::Arc;

use super::context::{HookContext, ScriptContext};
use super::hook::{
    CheckHook, CostHook, EffectHook, HitCheck, Hook, HookId, ModifierHook, Multiplier, PostHook,
};
use super::{EffectOutcome, SkillBehavior, SkillError, SkillMethod, formula};
use crate::entity::Entity;
use crate::message::{Message, MessageLog};
use crate::stats::{Element, Pool};
use crate::status::StatusEffect;

// ============================================================================
// Cost
// ============================================================================

/// Debits a fixed amount from one pool.
#[derive(Clone, Debug)]
pub struct PoolCost {
    pool: Pool,
    amount: i32,
}

impl PoolCost {
    pub fn new(pool: Pool, amount: i32) -> Self {
        Self {
            pool,
            amount: amount.max(0),
        }
    }

    pub fn amount(&self) -> i32 {
        self.amount
    }
}

impl Hook for PoolCost {
    fn id(&self) -> HookId {
        match self.pool {
            Pool::Health => HookId::new("cost:health"),
            Pool::Mana => HookId::new("cost:mana"),
            Pool::Tech => HookId::new("cost:tech"),
        }
    }

    fn describe(&self) -> Option<String> {
        Some(format!("costs {} {}", self.amount, self.pool))
    }
}

impl CostHook for PoolCost {
    fn can_pay(&self, source: &Entity) -> bool {
        source.pool(self.pool) >= self.amount
    }

    fn pay(&self, source: &mut Entity, log: &mut MessageLog) {
        source.drain(self.pool, self.amount, log);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Rolls d100 against `accuracy + source.skill - target.evade`.
///
/// Skills aimed at their own user always hit.
#[derive(Clone, Debug)]
pub struct AccuracyCheck {
    accuracy: i32,
}

impl AccuracyCheck {
    pub const ID: HookId = HookId::new("check:accuracy");

    pub fn new(accuracy: i32) -> Self {
        Self { accuracy }
    }
}

impl Hook for AccuracyCheck {
    fn id(&self) -> HookId {
        Self::ID
    }

    fn accuracy(&self) -> Option<i32> {
        Some(self.accuracy)
    }

    fn describe(&self) -> Option<String> {
        Some(format!("{}% accuracy", self.accuracy))
    }
}

impl CheckHook for AccuracyCheck {
    fn check(&self, ctx: &mut HookContext<'_>) -> Result<HitCheck, SkillError> {
        if ctx.source() == ctx.target() {
            return Ok(HitCheck::Hit);
        }
        let chance = formula::hit_chance(
            self.accuracy,
            &ctx.source_entity()?.stats(),
            &ctx.target_entity()?.stats(),
        );
        if ctx.rng().chance(chance) {
            Ok(HitCheck::Hit)
        } else {
            Ok(HitCheck::Miss)
        }
    }
}

// ============================================================================
// Modifier
// ============================================================================

/// Occasionally boosts the hit and announces it.
#[derive(Clone, Debug)]
pub struct CriticalModifier {
    chance: i32,
    bonus_percent: i32,
}

impl CriticalModifier {
    pub const ID: HookId = HookId::new("modifier:critical");

    pub fn new(chance: i32, bonus_percent: i32) -> Self {
        Self {
            chance,
            bonus_percent,
        }
    }
}

impl Hook for CriticalModifier {
    fn id(&self) -> HookId {
        Self::ID
    }

    fn describe(&self) -> Option<String> {
        Some(format!("{}% critical chance", self.chance))
    }
}

impl ModifierHook for CriticalModifier {
    fn modifier(&self, ctx: &mut HookContext<'_>) -> Result<i32, SkillError> {
        if !ctx.rng().chance(self.chance) {
            return Ok(0);
        }
        let target = ctx.target();
        ctx.log().push(Message::Critical { target });
        Ok(self.bonus_percent)
    }
}

/// Scales the hit down by the target's resistance to the skill's element.
/// Negative resistances amplify it.
#[derive(Clone, Debug)]
pub struct ResistanceModifier {
    element: Element,
}

impl ResistanceModifier {
    pub const ID: HookId = HookId::new("modifier:resistance");

    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl Hook for ResistanceModifier {
    fn id(&self) -> HookId {
        Self::ID
    }

    fn describe(&self) -> Option<String> {
        Some(format!("{} element", self.element))
    }
}

impl ModifierHook for ResistanceModifier {
    fn modifier(&self, ctx: &mut HookContext<'_>) -> Result<i32, SkillError> {
        let resistance = ctx.target_entity()?.stats().resistances.get(self.element);
        Ok(resistance.saturating_neg())
    }
}

// ============================================================================
// Effect
// ============================================================================

/// Drains health by `power * max(4*atk - 2*def, 0)`, scaled by the multiplier.
#[derive(Clone, Debug)]
pub struct DamageEffect {
    method: SkillMethod,
    power: i32,
}

impl DamageEffect {
    pub const ID: HookId = HookId::new("effect:damage");

    pub fn new(method: SkillMethod, power: i32) -> Self {
        Self { method, power }
    }
}

impl Hook for DamageEffect {
    fn id(&self) -> HookId {
        Self::ID
    }

    fn power(&self) -> Option<i32> {
        Some(self.power)
    }

    fn describe(&self) -> Option<String> {
        Some(format!("{} damage, power {}", self.method, self.power))
    }
}

impl EffectHook for DamageEffect {
    fn apply(&self, ctx: &mut HookContext<'_>, multiplier: Multiplier) -> Result<(), SkillError> {
        let raw = formula::damage(
            self.method,
            self.power,
            &ctx.source_entity()?.stats(),
            &ctx.target_entity()?.stats(),
        );
        let target = ctx.target();
        ctx.drain(target, Pool::Health, multiplier.scale(raw))?;
        Ok(())
    }
}

/// Restores health based on the source's magical stats.
#[derive(Clone, Debug)]
pub struct HealEffect {
    power: i32,
}

impl HealEffect {
    pub const ID: HookId = HookId::new("effect:heal");

    pub fn new(power: i32) -> Self {
        Self { power }
    }
}

impl Hook for HealEffect {
    fn id(&self) -> HookId {
        Self::ID
    }

    fn power(&self) -> Option<i32> {
        Some(self.power)
    }

    fn describe(&self) -> Option<String> {
        Some(format!("heals, power {}", self.power))
    }
}

impl EffectHook for HealEffect {
    fn apply(&self, ctx: &mut HookContext<'_>, multiplier: Multiplier) -> Result<(), SkillError> {
        let healed = formula::healing(self.power, &ctx.source_entity()?.stats(), multiplier);
        let target = ctx.target();
        ctx.restore(target, Pool::Health, healed)?;
        Ok(())
    }
}

/// Attaches a status effect to each target hit. A zero multiplier attaches
/// nothing.
#[derive(Clone, Debug)]
pub struct ApplyStatus {
    effect: StatusEffect,
    refresh: bool,
}

impl ApplyStatus {
    /// Stacks on top of existing effects of the same kind.
    pub fn new(effect: StatusEffect) -> Self {
        Self {
            effect,
            refresh: false,
        }
    }

    /// Replaces existing effects of the same kind.
    pub fn refreshing(effect: StatusEffect) -> Self {
        Self {
            effect,
            refresh: true,
        }
    }
}

impl Hook for ApplyStatus {
    fn id(&self) -> HookId {
        HookId::owned(format!("effect:status:{}", self.effect.kind))
    }

    fn describe(&self) -> Option<String> {
        Some(format!("inflicts {}", self.effect.kind))
    }
}

impl EffectHook for ApplyStatus {
    fn apply(&self, ctx: &mut HookContext<'_>, multiplier: Multiplier) -> Result<(), SkillError> {
        if multiplier.is_zero() {
            return Ok(());
        }
        let target = ctx.target();
        ctx.apply_status(target, self.effect.clone(), self.refresh)
    }
}

/// Delegates the effect to a [`SkillBehavior`].
#[derive(Clone)]
pub struct ScriptedEffect {
    behavior: Arc<dyn SkillBehavior>,
    power: Option<i32>,
}

impl ScriptedEffect {
    pub const ID: HookId = HookId::new("effect:script");

    pub fn new(behavior: Arc<dyn SkillBehavior>) -> Self {
        Self {
            behavior,
            power: None,
        }
    }

    /// Power reported for display; the behavior decides the real numbers.
    #[must_use]
    pub fn with_power(mut self, power: Option<i32>) -> Self {
        self.power = power;
        self
    }
}

impl Hook for ScriptedEffect {
    fn id(&self) -> HookId {
        Self::ID
    }

    fn power(&self) -> Option<i32> {
        self.power
    }
}

impl EffectHook for ScriptedEffect {
    fn apply(&self, ctx: &mut HookContext<'_>, multiplier: Multiplier) -> Result<(), SkillError> {
        let skill = ctx.skill().name().to_owned();
        let outcome = self
            .behavior
            .perform(&mut ScriptContext::new(ctx, multiplier))
            .map_err(|error| SkillError::Behavior { skill, error })?;

        if outcome == EffectOutcome::Missed {
            ctx.evade();
        }
        Ok(())
    }
}

// ============================================================================
// Post
// ============================================================================

/// Costs the user a share of its maximum health after the skill lands.
#[derive(Clone, Debug)]
pub struct Recoil {
    percent_of_max: i32,
}

impl Recoil {
    pub const ID: HookId = HookId::new("post:recoil");

    pub fn new(percent_of_max: i32) -> Self {
        Self { percent_of_max }
    }
}

impl Hook for Recoil {
    fn id(&self) -> HookId {
        Self::ID
    }

    fn describe(&self) -> Option<String> {
        Some(format!("{}% recoil", self.percent_of_max))
    }
}

impl PostHook for Recoil {
    fn apply(&self, ctx: &mut HookContext<'_>) -> Result<(), SkillError> {
        let max = ctx.source_entity()?.pool_max(Pool::Health);
        let amount = Multiplier::percent(self.percent_of_max.max(0) as u32).scale(max);
        let source = ctx.source();
        ctx.drain(source, Pool::Health, amount)?;
        Ok(())
    }
}

/// Attaches a status effect to the user after the skill lands.
#[derive(Clone, Debug)]
pub struct SelfStatus {
    effect: StatusEffect,
    refresh: bool,
}

impl SelfStatus {
    pub fn new(effect: StatusEffect, refresh: bool) -> Self {
        Self { effect, refresh }
    }
}

impl Hook for SelfStatus {
    fn id(&self) -> HookId {
        HookId::owned(format!("post:status:{}", self.effect.kind))
    }

    fn describe(&self) -> Option<String> {
        Some(format!("grants {}", self.effect.kind))
    }
}

impl PostHook for SelfStatus {
    fn apply(&self, ctx: &mut HookContext<'_>) -> Result<(), SkillError> {
        let source = ctx.source();
        ctx.apply_status(source, self.effect.clone(), self.refresh)
    }
}
