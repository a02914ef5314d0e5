//! Skill resolution pipeline.
//!
//! ## Execution Flow
//! 1. Validate source, primary target and costs (nothing mutated on failure)
//! 2. Announce the skill (`SkillUsed`) and pay every cost
//! 3. Expand the primary target according to the skill's spread
//! 4. For each target, while the source is alive:
//!    - Check hooks: any miss logs `Miss` and skips the target
//!    - Modifier hooks: fold percentage deltas into the multiplier
//!    - Effect hooks: apply with the combined multiplier
//! 5. Post hooks run once on the source if it survived
//!
//! ## Error Handling
//! Any hook error stops resolution immediately. Partial effects are left in
//! place; callers that need atomicity checkpoint the roster first (the
//! scheduler does).

use super::context::HookContext;
use super::hook::{HitCheck, Multiplier};
use super::{Skill, SkillError, SkillSpread};
use crate::battle::{EntityHandle, Roster};
use crate::config::BattleConfig;
use crate::message::{Message, MessageLog};
use crate::rng::BattleRng;

/// What happened during one resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Targets whose effect hooks ran, in processing order.
    pub hit: Vec<EntityHandle>,
    /// Targets skipped by a failed check or evaded by a scripted effect.
    pub missed: Vec<EntityHandle>,
    /// True when the source fell before every target was processed.
    pub interrupted: bool,
}

/// Resolves `skill` used by `source` on `primary`.
pub fn resolve(
    roster: &mut Roster,
    rng: &mut dyn BattleRng,
    log: &mut MessageLog,
    config: &BattleConfig,
    source: EntityHandle,
    skill: &Skill,
    primary: EntityHandle,
) -> Result<Resolution, SkillError> {
    let caster = roster.get(source).ok_or(SkillError::SourceNotFound(source))?;
    if roster.get(primary).is_none() {
        return Err(SkillError::TargetNotFound(primary));
    }
    if !skill.is_usable_by(caster) {
        return Err(SkillError::CostUnpayable {
            skill: skill.name().to_owned(),
            source_name: caster.name().to_owned(),
        });
    }

    tracing::debug!("{} uses {} on {:?}", caster.name(), skill.name(), primary);
    log.push(Message::SkillUsed {
        skill: skill.name().to_owned(),
        source,
        target: primary,
    });

    // 1. Costs
    let caster = roster
        .get_mut(source)
        .ok_or(SkillError::SourceNotFound(source))?;
    for cost in skill.costs() {
        cost.pay(caster, log);
    }

    // 2. Targets
    let targets = expand_targets(roster, skill.spread(), source, primary, config);

    // 3. Per-target stages
    let mut resolution = Resolution::default();
    let mut ctx = HookContext::new(source, skill, roster, rng, log, config);

    for (target, base) in targets {
        if ctx.source_entity()?.is_dead() {
            tracing::debug!("{:?} fell mid-resolution of {}", source, skill.name());
            resolution.interrupted = true;
            break;
        }
        ctx.retarget(target);
        if resolve_target(&mut ctx, skill, base)? {
            resolution.hit.push(target);
        } else {
            resolution.missed.push(target);
        }
    }

    // 4. Post
    if !ctx.source_entity()?.is_dead() {
        ctx.retarget(source);
        for post in skill.posts() {
            post.apply(&mut ctx)?;
        }
    }

    Ok(resolution)
}

/// Runs check, modifier and effect hooks for the context's current target.
/// Returns false when a check missed or an effect reported an evasion.
fn resolve_target(
    ctx: &mut HookContext<'_>,
    skill: &Skill,
    base: Multiplier,
) -> Result<bool, SkillError> {
    let target = ctx.target();

    for check in skill.checks() {
        if check.check(ctx)? == HitCheck::Miss {
            tracing::debug!("{} missed {:?} ({})", skill.name(), target, check.id());
            ctx.log().push(Message::Miss { target });
            return Ok(false);
        }
    }

    let mut multiplier = base;
    for modifier in skill.modifiers() {
        multiplier = multiplier.combine(modifier.modifier(ctx)?);
    }

    for effect in skill.effects() {
        effect.apply(ctx, multiplier)?;
    }
    Ok(!ctx.evaded())
}

/// Expands the primary target into `(target, base multiplier)` pairs.
///
/// ## Spreads
/// - `SelfOnly`: the source
/// - `Single`: the primary target
/// - `SemiArea`: primary at full magnitude, its living teammates at
///   `semi_area_percent`
/// - `Area`: primary, then its living teammates
/// - `Field`: primary, then every other living combatant
pub fn expand_targets(
    roster: &Roster,
    spread: SkillSpread,
    source: EntityHandle,
    primary: EntityHandle,
    config: &BattleConfig,
) -> Vec<(EntityHandle, Multiplier)> {
    let primary_team = roster.team_of(primary);
    let others = |multiplier: Multiplier| {
        let mut targets = vec![(primary, Multiplier::FULL)];
        if let Some(team) = primary_team {
            targets.extend(
                roster
                    .living(team)
                    .filter(|handle| *handle != primary)
                    .map(|handle| (handle, multiplier)),
            );
        }
        targets
    };

    match spread {
        SkillSpread::SelfOnly => vec![(source, Multiplier::FULL)],
        SkillSpread::Single => vec![(primary, Multiplier::FULL)],
        SkillSpread::SemiArea => others(Multiplier::percent(config.semi_area_percent)),
        SkillSpread::Area => others(Multiplier::FULL),
        SkillSpread::Field => core::iter::once((primary, Multiplier::FULL))
            .chain(
                roster
                    .living_combatants()
                    .filter(|handle| *handle != primary)
                    .map(|handle| (handle, Multiplier::FULL)),
            )
            .collect(),
    }
}
