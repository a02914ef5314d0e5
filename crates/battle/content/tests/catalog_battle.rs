use battle_content::ContentFactory;
use battle_core::{
    Action, BattleSystem, Message, NpcController, PcgRng, PlayerController, ScriptedRng,
    SkillSlot, StatusKind, Team,
};

fn factory() -> ContentFactory {
    ContentFactory::embedded().unwrap()
}

#[test]
fn catalog_fireball_crits_through_resistance_hooks() {
    let factory = factory();
    // A constant roll of 1 passes both the accuracy and the critical check.
    let mut system = BattleSystem::new(factory.config().clone(), ScriptedRng::constant(0));

    let shaman = factory
        .spawn("goblin", "shaman", "Zix", 1)
        .unwrap()
        .with_controller(PlayerController::new());
    let shaman = system.add_combatant(Team::Red, shaman);
    let knight = system.add_combatant(
        Team::Blue,
        factory.spawn("human", "knight", "Aldric", 1).unwrap(),
    );

    system
        .supply_choice(
            shaman,
            Action::UseSkill {
                skill: SkillSlot::new(0),
                target: knight,
            },
        )
        .unwrap();
    let outcome = system.advance_one_turn().unwrap();

    // 1 * (4*11 - 2*6) = 32, +50% critical = 48
    assert_eq!(outcome.actor, shaman);
    assert!(outcome.messages.contains(&Message::Critical { target: knight }));
    assert_eq!(system.entity(knight).unwrap().health(), 120 - 48);
    assert_eq!(system.entity(shaman).unwrap().mana(), 22 - 4);
}

#[test]
fn venom_bite_poisons_and_narrates() {
    let factory = factory();
    let mut system = BattleSystem::new(factory.config().clone(), ScriptedRng::constant(0));

    let grunt = factory
        .spawn("goblin", "grunt", "Snag", 2)
        .unwrap()
        .with_controller(PlayerController::new());
    let grunt = system.add_combatant(Team::Red, grunt);
    let mage = system.add_combatant(Team::Blue, factory.spawn("elf", "mage", "Ione", 1).unwrap());

    let bite = system.entity(grunt).unwrap().find_skill("venom_bite").unwrap();
    system
        .supply_choice(
            grunt,
            Action::UseSkill {
                skill: bite,
                target: mage,
            },
        )
        .unwrap();
    let outcome = system.advance_one_turn().unwrap();

    let poison = StatusKind::Named("poison".into());
    let mage_entity = system.entity(mage).unwrap();
    assert!(mage_entity.has_status(&poison));
    // 12 speed at -20%
    assert_eq!(mage_entity.stats().speed, 9);
    assert!(outcome.messages.contains(&Message::Notification {
        text: "Ione is poisoned".into(),
    }));
}

#[test]
fn npc_skirmish_runs_to_completion() {
    let factory = factory();
    let mut system = BattleSystem::new(factory.config().clone(), PcgRng::seeded(2024));

    let lineup = [
        (Team::Blue, "human", "knight", "Aldric"),
        (Team::Blue, "human", "cleric", "Mira"),
        (Team::Blue, "elf", "mage", "Ione"),
        (Team::Red, "goblin", "grunt", "Snag"),
        (Team::Red, "goblin", "shaman", "Zix"),
        (Team::Red, "orc", "brute", "Gor"),
    ];
    for (seed, (team, kind, variant, name)) in lineup.into_iter().enumerate() {
        let controller = NpcController::from_config(factory.config(), PcgRng::seeded(seed as u64));
        let entity = factory
            .spawn(kind, variant, name, 3)
            .unwrap()
            .with_controller(controller);
        system.add_combatant(team, entity);
    }

    let mut turns = 0;
    while !system.is_battle_over() {
        let outcome = system.advance_one_turn().unwrap();
        assert!(outcome.turn_finished);
        turns += 1;
        assert!(turns < 2_000, "battle did not finish");
    }
    system.end_battle();
}
