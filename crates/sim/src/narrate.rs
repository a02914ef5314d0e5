//! Renders battle messages as log lines.
use battle_core::{BattleSystem, EntityHandle, Message, Pool};

fn name(system: &BattleSystem, handle: EntityHandle) -> String {
    system
        .entity(handle)
        .map(|entity| entity.name().to_owned())
        .unwrap_or_else(|| format!("{:?}", handle))
}

/// One human-readable line per message.
pub fn describe(system: &BattleSystem, message: &Message) -> String {
    match message {
        Message::SkillUsed {
            skill,
            source,
            target,
        } if source == target => format!("{} uses {}", name(system, *source), skill),
        Message::SkillUsed {
            skill,
            source,
            target,
        } => format!(
            "{} uses {} on {}",
            name(system, *source),
            skill,
            name(system, *target)
        ),
        Message::Miss { target } => format!("It misses {}", name(system, *target)),
        Message::Critical { target } => format!("A critical hit on {}!", name(system, *target)),
        Message::PoolChanged {
            entity,
            pool,
            old,
            new,
        } => {
            let verb = if new < old { "loses" } else { "gains" };
            let label = match pool {
                Pool::Health => "HP",
                Pool::Mana => "MP",
                Pool::Tech => "TP",
            };
            format!(
                "{} {} {} {} ({} -> {})",
                name(system, *entity),
                verb,
                (new - old).abs(),
                label,
                old,
                new
            )
        }
        Message::StatusApplied { entity, effect } => {
            format!("{} is affected by {}", name(system, *entity), effect)
        }
        Message::StatusRemoved { entity, effect } => {
            format!("{} is no longer affected by {}", name(system, *entity), effect)
        }
        Message::Defended { entity } => format!("{} defends", name(system, *entity)),
        Message::Fled {
            entity,
            succeeded: true,
        } => format!("{} flees the battle", name(system, *entity)),
        Message::Fled {
            entity,
            succeeded: false,
        } => format!("{} tries to flee but fails", name(system, *entity)),
        Message::Died { entity } => format!("{} falls", name(system, *entity)),
        Message::Notification { text } => text.clone(),
    }
}

pub fn narrate(system: &BattleSystem, messages: &[Message]) {
    for message in messages {
        tracing::info!("{}", describe(system, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{BattleConfig, Entity, EntityIdentity, PcgRng, StatKind, Stats, Team};

    #[test]
    fn describes_pool_changes_with_names() {
        let mut system = BattleSystem::new(BattleConfig::default(), PcgRng::seeded(0));
        let stats = Stats::default().with(StatKind::MaxHealth, 30);
        let hero = system.add_combatant(
            Team::Blue,
            Entity::new(EntityIdentity::new("human", "knight", "Aldric"), 1, stats),
        );

        let line = describe(
            &system,
            &Message::PoolChanged {
                entity: hero,
                pool: Pool::Health,
                old: 30,
                new: 12,
            },
        );
        assert_eq!(line, "Aldric loses 18 HP (30 -> 12)");
        assert_eq!(
            describe(&system, &Message::Died { entity: hero }),
            "Aldric falls"
        );
    }
}
