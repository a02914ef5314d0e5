//! Declarative skill behaviors.
//!
//! A catalog skill lists [`EffectSpec`]s; [`DeclarativeBehavior`] runs them in
//! order against each target the pipeline hands it. Powers grow linearly
//! with the skill level.

use battle_core::skill::formula;
use battle_core::{
    BehaviorError, EffectOutcome, Pool, ScriptContext, SkillBehavior, SkillMethod, StatusEffect,
    StatusKind,
};

/// One authored effect step.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectSpec {
    /// Health damage using the skill's method:
    /// `power_at(level) * max(4*atk - 2*def, 0)`.
    Damage {
        power: i32,
        #[cfg_attr(feature = "serde", serde(default))]
        per_level: i32,
    },
    /// Health restored from the user's magical stats.
    Heal {
        power: i32,
        #[cfg_attr(feature = "serde", serde(default))]
        per_level: i32,
    },
    /// Flat pool loss on the target.
    Drain { pool: Pool, amount: i32 },
    /// Flat pool gain on the target.
    Restore { pool: Pool, amount: i32 },
    /// One of the built-in status presets.
    ApplyStatus {
        status: StatusKind,
        #[cfg_attr(feature = "serde", serde(default))]
        refresh: bool,
    },
    /// A fully authored status effect.
    Inflict {
        effect: StatusEffect,
        #[cfg_attr(feature = "serde", serde(default))]
        refresh: bool,
    },
    /// Narration. `{source}` and `{target}` are replaced by entity names.
    Notify(String),
}

impl EffectSpec {
    /// Power contributed at `level`, for effects that have one.
    pub fn power_at(&self, level: u32) -> Option<i32> {
        match self {
            Self::Damage { power, per_level } | Self::Heal { power, per_level } => {
                let steps = level.saturating_sub(1) as i32;
                Some(power.saturating_add(per_level.saturating_mul(steps)))
            }
            _ => None,
        }
    }
}

/// Runs a list of [`EffectSpec`]s for one skill level.
#[derive(Clone, Debug)]
pub struct DeclarativeBehavior {
    method: SkillMethod,
    level: u32,
    effects: Vec<EffectSpec>,
}

impl DeclarativeBehavior {
    pub fn new(method: SkillMethod, level: u32, effects: Vec<EffectSpec>) -> Self {
        Self {
            method,
            level,
            effects,
        }
    }

    pub fn effects(&self) -> &[EffectSpec] {
        &self.effects
    }

    fn run(&self, ctx: &mut ScriptContext<'_, '_>, effect: &EffectSpec) -> Result<(), BehaviorError> {
        let (source, target) = (ctx.source(), ctx.target());
        let multiplier = ctx.multiplier();

        match effect {
            EffectSpec::Damage { .. } => {
                let power = effect.power_at(self.level).unwrap_or_default();
                let raw = formula::damage(
                    self.method,
                    power,
                    &ctx.stats(source)?,
                    &ctx.stats(target)?,
                );
                ctx.drain(target, Pool::Health, multiplier.scale(raw))?;
            }
            EffectSpec::Heal { .. } => {
                let power = effect.power_at(self.level).unwrap_or_default();
                let healed = formula::healing(power, &ctx.stats(source)?, multiplier);
                ctx.restore(target, Pool::Health, healed)?;
            }
            EffectSpec::Drain { pool, amount } => {
                ctx.drain(target, *pool, multiplier.scale(*amount))?;
            }
            EffectSpec::Restore { pool, amount } => {
                ctx.restore(target, *pool, multiplier.scale(*amount))?;
            }
            EffectSpec::ApplyStatus { status, refresh } => {
                let preset = StatusEffect::preset(status.clone()).ok_or_else(|| {
                    BehaviorError::InvalidArgument(format!("no preset for status {status}"))
                })?;
                ctx.apply_status(target, preset, *refresh)?;
            }
            EffectSpec::Inflict { effect, refresh } => {
                ctx.apply_status(target, effect.clone(), *refresh)?;
            }
            EffectSpec::Notify(text) => {
                let line = text
                    .replace("{source}", &ctx.name(source)?)
                    .replace("{target}", &ctx.name(target)?);
                ctx.notify(line);
            }
        }
        Ok(())
    }
}

impl SkillBehavior for DeclarativeBehavior {
    /// A zero multiplier (full resistance) skips every step.
    fn perform(&self, ctx: &mut ScriptContext<'_, '_>) -> Result<EffectOutcome, BehaviorError> {
        if ctx.multiplier().is_zero() {
            return Ok(EffectOutcome::NoEffect);
        }
        for effect in &self.effects {
            self.run(ctx, effect)?;
        }
        Ok(EffectOutcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_grows_per_level() {
        let damage = EffectSpec::Damage {
            power: 2,
            per_level: 1,
        };
        assert_eq!(damage.power_at(1), Some(2));
        assert_eq!(damage.power_at(4), Some(5));
        assert_eq!(EffectSpec::Notify("hi".into()).power_at(3), None);
    }

    #[test]
    fn level_zero_counts_as_first_level() {
        let heal = EffectSpec::Heal {
            power: 3,
            per_level: 2,
        };
        assert_eq!(heal.power_at(0), Some(3));
    }
}
