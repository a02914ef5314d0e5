#![allow(dead_code)]

use battle_core::{
    BattleConfig, BattleSystem, Entity, EntityHandle, EntityIdentity, Message, MessageLog,
    PcgRng, Pool, StatKind, Stats,
};

/// 100 hp, 20 mana, 10 tech, 10/5 attack/defense on both sides.
pub fn stats(speed: i32) -> Stats {
    Stats::default()
        .with(StatKind::MaxHealth, 100)
        .with(StatKind::MaxMana, 20)
        .with(StatKind::MaxTech, 10)
        .with(StatKind::PhysicalAttack, 10)
        .with(StatKind::PhysicalDefense, 5)
        .with(StatKind::MagicalAttack, 10)
        .with(StatKind::MagicalDefense, 5)
        .with(StatKind::Speed, speed)
}

pub fn fighter(name: &str, speed: i32) -> Entity {
    Entity::new(EntityIdentity::new("human", "fighter", name), 1, stats(speed))
}

pub fn battle() -> BattleSystem {
    BattleSystem::new(BattleConfig::default(), PcgRng::seeded(7))
}

/// Drains an entity's health to zero.
pub fn defeat(system: &mut BattleSystem, handle: EntityHandle) {
    let mut log = MessageLog::new();
    if let Some(entity) = system.entity_mut(handle) {
        entity.drain(Pool::Health, i32::MAX, &mut log);
    }
}

pub fn count(messages: &[Message], predicate: impl Fn(&Message) -> bool) -> usize {
    messages.iter().filter(|m| predicate(m)).count()
}
