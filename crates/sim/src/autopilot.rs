//! Answers interactive turns on behalf of a human.
use anyhow::{Context, Result};
use battle_core::rng;
use battle_core::{Action, Affinity, BattleSystem, EntityHandle, PcgRng, SkillSpread, Team};

/// Picks a random usable skill and a sensible target, or defends.
pub struct Autopilot {
    rng: PcgRng,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: PcgRng::seeded(seed),
        }
    }

    pub fn choose(&mut self, system: &BattleSystem, handle: EntityHandle) -> Result<Action> {
        let options = system.available_options(handle)?;
        let entity = system
            .entity(handle)
            .with_context(|| format!("no entity behind {:?}", handle))?;
        let team = system.team_of(handle)?;

        let Some(&slot) = rng::choose(&mut self.rng, &options.usable_skills) else {
            return Ok(Action::Defend);
        };
        let skill = entity
            .skill(slot)
            .with_context(|| format!("{} has no skill in {:?}", entity.name(), slot))?;

        let target = match (skill.spread(), skill.affinity()) {
            (SkillSpread::SelfOnly | SkillSpread::Field, _) => Some(handle),
            (_, Affinity::Friendly) => weakest(system, team),
            (_, Affinity::Hostile) => {
                let enemies = living(system, team.opponent());
                rng::choose(&mut self.rng, &enemies).copied()
            }
        };

        Ok(match target {
            Some(target) => Action::UseSkill {
                skill: slot,
                target,
            },
            None => Action::Defend,
        })
    }
}

/// Living member of `team` with the lowest health.
fn weakest(system: &BattleSystem, team: Team) -> Option<EntityHandle> {
    living(system, team)
        .into_iter()
        .min_by_key(|handle| system.entity(*handle).map(|e| e.health()))
}

fn living(system: &BattleSystem, team: Team) -> Vec<EntityHandle> {
    system
        .list_team(team)
        .into_iter()
        .filter(|handle| system.entity(*handle).is_some_and(|e| !e.is_dead()))
        .collect()
}
