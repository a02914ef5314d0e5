use super::{Action, Controller};
use crate::battle::BattleView;
use crate::config::BattleConfig;
use crate::rng::{self, BattleRng};
use crate::skill::{Affinity, SkillSpread};

/// Randomized AI.
///
/// Defends when it has no usable skill or when the defend roll succeeds;
/// otherwise picks a usable skill uniformly, then a target uniformly among
/// living enemies (hostile skills) or living allies (friendly skills).
/// Self and field skills target the user.
pub struct NpcController {
    rng: Box<dyn BattleRng>,
    defend_percent: u32,
}

impl NpcController {
    pub fn new(rng: impl BattleRng + 'static, defend_percent: u32) -> Self {
        Self {
            rng: Box::new(rng),
            defend_percent: defend_percent.min(100),
        }
    }

    pub fn from_config(config: &BattleConfig, rng: impl BattleRng + 'static) -> Self {
        Self::new(rng, config.npc_defend_percent)
    }
}

impl Controller for NpcController {
    fn name(&self) -> &str {
        "npc"
    }

    fn decide(&mut self, view: &BattleView<'_>) -> Action {
        let Some(me) = view.me() else {
            return Action::Defend;
        };

        let usable = me.usable_skills();
        if usable.is_empty() || self.rng.chance(self.defend_percent as i32) {
            return Action::Defend;
        }

        let Some(&slot) = rng::choose(self.rng.as_mut(), &usable) else {
            return Action::Defend;
        };
        let Some(skill) = me.skill(slot) else {
            return Action::Defend;
        };

        let target = match skill.spread() {
            SkillSpread::SelfOnly | SkillSpread::Field => Some(view.actor()),
            _ => {
                let candidates = match skill.affinity() {
                    Affinity::Hostile => view.living_enemies(),
                    Affinity::Friendly => view.living_allies(),
                };
                rng::choose(self.rng.as_mut(), &candidates).copied()
            }
        };

        match target {
            Some(target) => Action::UseSkill { skill: slot, target },
            None => Action::Defend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{EntityHandle, Roster, Team, Tick};
    use crate::entity::{Entity, EntityIdentity};
    use crate::rng::{PcgRng, ScriptedRng};
    use crate::skill::{PoolCost, Skill, SkillSlot};
    use crate::stats::{Pool, StatKind, Stats};

    fn unit(name: &str, mana: i32) -> Entity {
        let stats = Stats::default()
            .with(StatKind::MaxHealth, 20)
            .with(StatKind::MaxMana, mana)
            .with(StatKind::Speed, 10);
        Entity::new(EntityIdentity::new("orc", "grunt", name), 1, stats)
    }

    fn arena(npc: Entity) -> (Roster, EntityHandle, EntityHandle) {
        let mut roster = Roster::new();
        let me = roster.insert(Team::Red, npc, Tick::ZERO);
        let foe = roster.insert(Team::Blue, unit("Foe", 0), Tick::ZERO);
        (roster, me, foe)
    }

    #[test]
    fn defends_without_usable_skills() {
        let npc =
            unit("Grok", 2).with_skill(Skill::new("roar").with_cost(PoolCost::new(Pool::Mana, 5)));
        let (roster, me, _) = arena(npc);
        let view = BattleView::new(&roster, me, Team::Red);

        let mut controller = NpcController::new(PcgRng::seeded(1), 0);
        for _ in 0..20 {
            assert_eq!(controller.decide(&view), Action::Defend);
        }
    }

    #[test]
    fn never_picks_an_unpayable_skill() {
        let npc = unit("Grok", 3)
            .with_skill(Skill::new("roar").with_cost(PoolCost::new(Pool::Mana, 5)))
            .with_skill(Skill::new("club"));
        let (roster, me, foe) = arena(npc);
        let view = BattleView::new(&roster, me, Team::Red);

        let mut controller = NpcController::new(PcgRng::seeded(99), 0);
        for _ in 0..50 {
            assert_eq!(
                controller.decide(&view),
                Action::UseSkill {
                    skill: SkillSlot::new(1),
                    target: foe
                }
            );
        }
    }

    #[test]
    fn defend_roll_wins_at_full_chance() {
        let npc = unit("Grok", 0).with_skill(Skill::new("club"));
        let (roster, me, _) = arena(npc);
        let view = BattleView::new(&roster, me, Team::Red);

        let mut controller = NpcController::new(ScriptedRng::constant(0), 100);
        assert_eq!(controller.decide(&view), Action::Defend);
    }

    #[test]
    fn self_skills_target_the_user() {
        let npc =
            unit("Grok", 0).with_skill(Skill::new("focus").with_spread(SkillSpread::SelfOnly));
        let (roster, me, _) = arena(npc);
        let view = BattleView::new(&roster, me, Team::Red);

        let mut controller = NpcController::new(ScriptedRng::constant(50), 20);
        // d100 = 51 > 20, so no defend
        assert_eq!(
            controller.decide(&view),
            Action::UseSkill {
                skill: SkillSlot::new(0),
                target: me
            }
        );
    }
}
