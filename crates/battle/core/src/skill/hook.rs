//! Stage traits for the resolution pipeline.
//!
//! A skill is a bundle of hooks, one list per stage:
//!
//! | Stage    | Trait            | Runs                                        |
//! |----------|------------------|---------------------------------------------|
//! | Cost     | [`CostHook`]     | once, before anything else                  |
//! | Check    | [`CheckHook`]    | per target; any miss skips the target       |
//! | Modifier | [`ModifierHook`] | per target; yields a percentage delta       |
//! | Effect   | [`EffectHook`]   | per target, with the combined multiplier    |
//! | Post     | [`PostHook`]     | once on the source, if it is still alive    |
//!
//! Hooks within a stage run in insertion order.

use core::fmt;
use std::borrow::Cow;

use super::SkillError;
use super::context::HookContext;
use crate::entity::Entity;
use crate::message::MessageLog;

/// Stable identifier of a hook within a skill.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookId(Cow<'static, str>);

impl HookId {
    pub const fn new(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    pub fn owned(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed-point magnitude in percent (100 = full effect).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Multiplier(u32);

impl Multiplier {
    pub const FULL: Self = Self(100);
    pub const ZERO: Self = Self(0);

    pub const fn percent(percent: u32) -> Self {
        Self(percent)
    }

    pub const fn as_percent(self) -> u32 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Applies a percentage delta: `m * (100 + delta) / 100`, floored at 0.
    #[must_use]
    pub fn combine(self, delta: i32) -> Self {
        let scaled = i64::from(self.0) * (100 + i64::from(delta)) / 100;
        Self(scaled.clamp(0, i64::from(u32::MAX)) as u32)
    }

    /// Scales an amount, truncating toward zero.
    pub fn scale(self, amount: i32) -> i32 {
        let scaled = i64::from(amount) * i64::from(self.0) / 100;
        scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self::FULL
    }
}

/// Result of a check hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitCheck {
    Hit,
    Miss,
}

/// Behavior shared by hooks of every stage.
pub trait Hook: Send + Sync {
    fn id(&self) -> HookId;

    /// Contribution to the skill's displayed power.
    fn power(&self) -> Option<i32> {
        None
    }

    /// Contribution to the skill's displayed accuracy.
    fn accuracy(&self) -> Option<i32> {
        None
    }

    /// Human-readable fragment for skill descriptions.
    fn describe(&self) -> Option<String> {
        None
    }
}

pub trait CostHook: Hook {
    fn can_pay(&self, source: &Entity) -> bool;

    fn pay(&self, source: &mut Entity, log: &mut MessageLog);
}

pub trait CheckHook: Hook {
    fn check(&self, ctx: &mut HookContext<'_>) -> Result<HitCheck, SkillError>;
}

pub trait ModifierHook: Hook {
    /// Percentage delta for the current target (50 = ×1.5).
    fn modifier(&self, ctx: &mut HookContext<'_>) -> Result<i32, SkillError>;
}

pub trait EffectHook: Hook {
    /// Applies the effect to `ctx.target()`. Must tolerate a zero multiplier.
    fn apply(&self, ctx: &mut HookContext<'_>, multiplier: Multiplier) -> Result<(), SkillError>;
}

pub trait PostHook: Hook {
    /// Runs once with the source as both source and target.
    fn apply(&self, ctx: &mut HookContext<'_>) -> Result<(), SkillError>;
}
