//! Simulation settings loaded from the environment.
use std::env;
use std::path::PathBuf;

/// Settings for one simulated battle.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// RNG seed; a random one is drawn when unset.
    pub seed: Option<u64>,
    /// Content directory; embedded content is used when unset.
    pub data_dir: Option<PathBuf>,
    /// Hard stop for battles that stall.
    pub max_turns: u64,
    /// Level of every spawned combatant.
    pub level: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            data_dir: None,
            max_turns: 500,
            level: 3,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_SEED` - RNG seed (default: random)
    /// - `BATTLE_DATA_DIR` - Content directory (default: embedded content)
    /// - `BATTLE_MAX_TURNS` - Turn limit (default: 500)
    /// - `BATTLE_LEVEL` - Combatant level (default: 3)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.seed = read_env::<u64>("BATTLE_SEED");
        config.data_dir = env::var("BATTLE_DATA_DIR").ok().map(PathBuf::from);

        if let Some(turns) = read_env::<u64>("BATTLE_MAX_TURNS") {
            config.max_turns = turns.max(1);
        }
        if let Some(level) = read_env::<u32>("BATTLE_LEVEL") {
            config.level = level.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
