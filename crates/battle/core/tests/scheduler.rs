mod common;

use std::sync::Arc;

use battle_core::skill::{DamageEffect, PoolCost, ScriptedEffect};
use battle_core::{
    Action, BattleError, BattleRng, BattleView, BehaviorError, ControlError, EffectDuration,
    EffectOutcome, Entity, EntityHandle, FleePolicy, Message, MessageLog, NpcController, PcgRng,
    PlayerController, Pool, ScriptContext, Skill, SkillBehavior, SkillError, SkillMethod,
    SkillSlot, StatusEffect, StatusKind, Team, Tick,
};
use common::{battle, count, defeat, fighter};

#[test]
fn faster_combatant_acts_twice_before_slower_acts_once() {
    let mut system = battle();
    let fast = system.add_combatant(Team::Blue, fighter("Swift", 20));
    let slow = system.add_combatant(Team::Red, fighter("Steady", 10));

    // Swift: 5, 10, 15 ... Steady: 10, 20 ... (tie at 10 goes to Swift)
    let actors: Vec<_> = (0..3)
        .map(|_| system.advance_one_turn().unwrap().actor)
        .collect();
    assert_eq!(actors, vec![fast, fast, slow]);
}

#[test]
fn next_turn_time_advances_by_speed_delay() {
    let mut system = battle();
    system.add_combatant(Team::Blue, fighter("A", 7));
    system.add_combatant(Team::Red, fighter("B", 13));
    system.add_combatant(Team::Red, fighter("C", 30));

    let mut previous = std::collections::HashMap::new();
    for _ in 0..40 {
        let outcome = system.advance_one_turn().unwrap();
        assert!(outcome.turn_finished);

        let combatant = system.combatant(outcome.actor).unwrap();
        let (last, next) = (combatant.last_turn_time(), combatant.next_turn_time());
        assert_eq!(next, last + combatant.turn_delay());
        assert_eq!(last, system.clock());

        if let Some(before) = previous.insert(outcome.actor, next) {
            assert!(next > before);
        }
    }
}

#[test]
fn haste_shortens_delays_until_it_expires() {
    let mut system = battle();
    let steady = system.add_combatant(Team::Red, fighter("Steady", 10));
    let mut log = MessageLog::new();
    let mut swift = fighter("Swift", 10);
    swift.apply_status_effect(StatusEffect::preset(StatusKind::Haste).unwrap(), &mut log);
    let swift = system.add_combatant(Team::Blue, swift);

    let hasted = Tick::delay_for_speed(15);
    let normal = Tick::delay_for_speed(10);

    // Without haste the tie at equal speed would go to Steady every round.
    let mut actors = Vec::new();
    let mut swift_delays = Vec::new();
    for _ in 0..5 {
        let outcome = system.advance_one_turn().unwrap();
        actors.push(outcome.actor);
        if outcome.actor == swift {
            let combatant = system.combatant(swift).unwrap();
            swift_delays.push((combatant.last_turn_time(), combatant.next_turn_time()));
        }
    }

    assert_eq!(actors, vec![swift, steady, swift, swift, steady]);
    // Haste lasts three turns; the delay after the third is back to normal.
    let expected = [hasted, hasted, normal];
    for ((last, next), delay) in swift_delays.into_iter().zip(expected) {
        assert_eq!(next, last + delay);
    }
}

#[test]
fn battle_over_when_either_side_is_wiped() {
    let mut system = battle();
    let blue = system.add_combatant(Team::Blue, fighter("Blue", 10));
    let red_a = system.add_combatant(Team::Red, fighter("Red A", 10));
    let red_b = system.add_combatant(Team::Red, fighter("Red B", 10));

    assert!(!system.is_battle_over());

    defeat(&mut system, red_a);
    assert!(!system.is_battle_over());

    defeat(&mut system, red_b);
    assert!(system.is_battle_over());
    assert_eq!(system.winner(), Some(Team::Blue));

    defeat(&mut system, blue);
    assert!(system.is_battle_over());
    assert_eq!(system.winner(), None);
}

#[test]
fn defeated_combatants_are_skipped_but_stay_scheduled() {
    let mut system = battle();
    let fallen = system.add_combatant(Team::Blue, fighter("Fallen", 20));
    system.add_combatant(Team::Blue, fighter("Ally", 10));
    system.add_combatant(Team::Red, fighter("Foe", 10));
    defeat(&mut system, fallen);

    let outcome = system.advance_one_turn().unwrap();
    assert_eq!(outcome.actor, fallen);
    assert!(outcome.turn_finished);
    assert!(outcome.messages.is_empty());

    let combatant = system.combatant(fallen).unwrap();
    assert_eq!(
        combatant.next_turn_time(),
        combatant.last_turn_time() + combatant.turn_delay()
    );
}

#[test]
fn delegate_leaves_the_same_combatant_up() {
    let mut system = battle();
    let hero = system.add_combatant(
        Team::Blue,
        fighter("Hero", 20).with_controller(PlayerController::new()),
    );
    system.add_combatant(Team::Red, fighter("Foe", 10));

    for _ in 0..3 {
        let outcome = system.advance_one_turn().unwrap();
        assert!(!outcome.turn_finished);
        assert!(outcome.needs_user_input);
        assert_eq!(outcome.controller_needing_input, Some(hero));
        assert_eq!(system.peek_next(), Some(hero));
    }
    assert_eq!(system.turns_taken(), 0);

    system.supply_choice(hero, Action::Defend).unwrap();
    let outcome = system.advance_one_turn().unwrap();
    assert!(outcome.turn_finished);
    assert_eq!(outcome.actor, hero);
    assert_eq!(outcome.messages, vec![Message::Defended { entity: hero }]);
}

#[test]
fn choices_go_only_to_interactive_controllers() {
    let mut system = battle();
    let npc = system.add_combatant(
        Team::Red,
        fighter("Grunt", 10).with_controller(NpcController::new(PcgRng::seeded(3), 20)),
    );

    let error = system.supply_choice(npc, Action::Defend).unwrap_err();
    assert!(matches!(
        error,
        BattleError::Control(ControlError::NotInteractive(handle)) if handle == npc
    ));
}

#[test]
fn unknown_target_is_an_error_and_changes_nothing() {
    let mut system = battle();
    let hero = system.add_combatant(
        Team::Blue,
        fighter("Hero", 20)
            .with_skill(Skill::new("jab").with_effect(DamageEffect::new(SkillMethod::Physical, 1)))
            .with_controller(PlayerController::new()),
    );
    system.add_combatant(Team::Red, fighter("Foe", 10));

    let ghost = EntityHandle::new(42);
    system
        .supply_choice(
            hero,
            Action::UseSkill {
                skill: SkillSlot::new(0),
                target: ghost,
            },
        )
        .unwrap();

    let error = system.advance_one_turn().unwrap_err();
    assert!(matches!(error, BattleError::TargetNotFound { target, .. } if target == ghost));
    assert_eq!(system.peek_next(), Some(hero));
    assert_eq!(system.turns_taken(), 0);
}

#[test]
fn forcing_an_unpayable_skill_fails_loudly() {
    let mut system = battle();
    let hero = system.add_combatant(
        Team::Blue,
        fighter("Hero", 20)
            .with_skill(Skill::new("meteor").with_cost(PoolCost::new(Pool::Mana, 50)))
            .with_controller(PlayerController::new()),
    );
    let foe = system.add_combatant(Team::Red, fighter("Foe", 10));

    assert!(system.available_options(hero).unwrap().usable_skills.is_empty());

    system
        .supply_choice(
            hero,
            Action::UseSkill {
                skill: SkillSlot::new(0),
                target: foe,
            },
        )
        .unwrap();
    let error = system.advance_one_turn().unwrap_err();

    assert!(matches!(
        error,
        BattleError::Skill(SkillError::CostUnpayable { .. })
    ));
    assert_eq!(system.entity(hero).unwrap().mana(), 20);
    assert_eq!(system.peek_next(), Some(hero));
}

struct Explode;

impl SkillBehavior for Explode {
    fn perform(&self, _ctx: &mut ScriptContext<'_, '_>) -> Result<EffectOutcome, BehaviorError> {
        Err(BehaviorError::Failed("fuse blew".into()))
    }
}

#[test]
fn failing_behavior_rolls_back_the_whole_skill() {
    let mut system = battle();
    let bomb = Skill::new("bomb")
        .with_cost(PoolCost::new(Pool::Mana, 5))
        .with_effect(DamageEffect::new(SkillMethod::Physical, 1))
        .with_effect(ScriptedEffect::new(Arc::new(Explode)));
    let hero = system.add_combatant(
        Team::Blue,
        fighter("Hero", 20)
            .with_skill(bomb)
            .with_controller(PlayerController::new()),
    );
    let foe = system.add_combatant(Team::Red, fighter("Foe", 10));

    system
        .supply_choice(
            hero,
            Action::UseSkill {
                skill: SkillSlot::new(0),
                target: foe,
            },
        )
        .unwrap();
    let error = system.advance_one_turn().unwrap_err();

    assert!(matches!(error, BattleError::Skill(SkillError::Behavior { .. })));
    assert_eq!(system.entity(hero).unwrap().mana(), 20);
    assert_eq!(system.entity(foe).unwrap().health(), 100);
    assert_eq!(system.peek_next(), Some(hero));
}

#[test]
fn skill_turn_reports_resolution_messages() {
    let mut system = battle();
    let hero = system.add_combatant(
        Team::Blue,
        fighter("Hero", 20)
            .with_skill(Skill::new("jab").with_effect(DamageEffect::new(SkillMethod::Physical, 1)))
            .with_controller(PlayerController::new()),
    );
    let foe = system.add_combatant(Team::Red, fighter("Foe", 10));

    system
        .supply_choice(
            hero,
            Action::UseSkill {
                skill: SkillSlot::new(0),
                target: foe,
            },
        )
        .unwrap();
    let outcome = system.advance_one_turn().unwrap();

    // 1 * (4*10 - 2*5) = 30
    assert_eq!(
        outcome.messages,
        vec![
            Message::SkillUsed {
                skill: "jab".into(),
                source: hero,
                target: foe,
            },
            Message::PoolChanged {
                entity: foe,
                pool: Pool::Health,
                old: 100,
                new: 70,
            },
        ]
    );
}

struct NeverFlee;

impl FleePolicy for NeverFlee {
    fn attempt(&mut self, _: &Entity, _: &BattleView<'_>, _: &mut dyn BattleRng) -> bool {
        false
    }
}

#[test]
fn flee_outcome_follows_the_policy() {
    for (succeeds, mut system) in [
        (true, battle()),
        (false, battle().with_flee_policy(NeverFlee)),
    ] {
        let hero = system.add_combatant(
            Team::Blue,
            fighter("Hero", 20).with_controller(PlayerController::new()),
        );
        system.add_combatant(Team::Red, fighter("Foe", 10));

        system.supply_choice(hero, Action::Flee).unwrap();
        let outcome = system.advance_one_turn().unwrap();
        assert_eq!(
            outcome.messages,
            vec![Message::Fled {
                entity: hero,
                succeeded: succeeds,
            }]
        );
    }
}

#[test]
fn turn_counted_status_expires_after_three_owner_turns() {
    let mut system = battle();
    let mut focused = fighter("Focused", 10);
    let mut log = MessageLog::new();
    focused.apply_status_effect(
        StatusEffect::new(StatusKind::Named("focus".into()), EffectDuration::Turns(3)),
        &mut log,
    );
    let handle = system.add_combatant(Team::Blue, focused);
    system.add_combatant(Team::Red, fighter("Foe", 7));

    let mut removals = Vec::new();
    let mut own_turns = 0;
    while own_turns < 4 {
        let outcome = system.advance_one_turn().unwrap();
        if outcome.actor != handle {
            continue;
        }
        own_turns += 1;
        removals.push(count(&outcome.messages, |m| {
            matches!(m, Message::StatusRemoved { .. })
        }));
    }

    assert_eq!(removals, vec![0, 0, 1, 0]);
    assert!(system.entity(handle).unwrap().status_effects().is_empty());
}

#[test]
fn end_battle_clears_scoped_effects_on_every_combatant() {
    let mut system = battle();
    let mut log = MessageLog::new();
    let mut a = fighter("A", 10);
    a.apply_status_effect(StatusEffect::preset(StatusKind::Haste).unwrap(), &mut log);
    let mut b = fighter("B", 10);
    b.apply_status_effect(
        StatusEffect::new(StatusKind::Named("oath".into()), EffectDuration::Permanent),
        &mut log,
    );
    let a = system.add_combatant(Team::Blue, a);
    let b = system.add_combatant(Team::Red, b);

    let messages = system.end_battle();
    assert_eq!(
        messages,
        vec![Message::StatusRemoved {
            entity: a,
            effect: StatusKind::Haste,
        }]
    );
    assert_eq!(system.entity(b).unwrap().status_effects().len(), 1);
}

#[test]
fn empty_battle_has_nothing_to_schedule() {
    let mut system = battle();
    assert!(matches!(
        system.advance_one_turn(),
        Err(BattleError::NoCombatants)
    ));
}
