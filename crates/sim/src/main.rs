//! Headless battle simulator.
//!
//! Spawns two teams from content, lets AI controllers fight it out and logs
//! every message. One combatant is driven through the interactive path and
//! answered by an [`autopilot::Autopilot`].
//!
//! # Examples
//!
//! ```bash
//! BATTLE_SEED=42 RUST_LOG=info cargo run -p battle-sim
//! ```
mod autopilot;
mod config;
mod narrate;

use anyhow::{Context, Result};
use battle_content::ContentFactory;
use battle_core::{BattleSystem, NpcController, PcgRng, PlayerController, Team};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use autopilot::Autopilot;
use config::SimConfig;

/// Team, kind, variant, display name, interactive.
const LINEUP: [(Team, &str, &str, &str, bool); 6] = [
    (Team::Blue, "human", "knight", "Aldric", true),
    (Team::Blue, "human", "cleric", "Mira", false),
    (Team::Blue, "elf", "mage", "Ione", false),
    (Team::Red, "goblin", "grunt", "Snag", false),
    (Team::Red, "goblin", "shaman", "Zix", false),
    (Team::Red, "orc", "brute", "Gor", false),
];

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();
    setup_logging();

    let config = SimConfig::from_env();
    let factory = match &config.data_dir {
        Some(dir) => ContentFactory::load(dir)
            .with_context(|| format!("loading content from {}", dir.display()))?,
        None => ContentFactory::embedded().context("loading embedded content")?,
    };

    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!("Battle seed: {}", seed);

    let mut system = BattleSystem::new(factory.config().clone(), PcgRng::seeded(seed));
    for (index, (team, kind, variant, name, interactive)) in LINEUP.into_iter().enumerate() {
        let entity = factory
            .spawn(kind, variant, name, config.level)
            .with_context(|| format!("spawning {} {}", kind, variant))?;
        let entity = if interactive {
            entity.with_controller(PlayerController::new())
        } else {
            let rng = PcgRng::seeded(seed.wrapping_add(index as u64 + 1));
            entity.with_controller(NpcController::from_config(factory.config(), rng))
        };
        let handle = system.add_combatant(team, entity);
        tracing::info!("{} the {} {} joins {} as {:?}", name, kind, variant, team, handle);
    }

    let mut autopilot = Autopilot::new(seed.rotate_left(32));
    while !system.is_battle_over() {
        if system.turns_taken() >= config.max_turns {
            tracing::warn!("Turn limit of {} reached", config.max_turns);
            break;
        }

        let outcome = system.advance_one_turn()?;
        if let Some(handle) = outcome.controller_needing_input {
            let action = autopilot.choose(&system, handle)?;
            tracing::debug!("Autopilot picks {:?} for {:?}", action, handle);
            system.supply_choice(handle, action)?;
            continue;
        }
        narrate::narrate(&system, &outcome.messages);
    }

    let cleanup = system.end_battle();
    narrate::narrate(&system, &cleanup);

    match system.winner() {
        Some(team) => tracing::info!("{} wins after {} turns", team, system.turns_taken()),
        None => tracing::info!("No winner after {} turns", system.turns_taken()),
    }
    Ok(())
}

/// Setup logging to stderr, filtered by `RUST_LOG` (default: info).
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
