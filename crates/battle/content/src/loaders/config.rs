//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = ConfigLoader::parse("semi_area_percent = 25\n").unwrap();
        assert_eq!(config.semi_area_percent, 25);
        assert_eq!(
            config.npc_defend_percent,
            BattleConfig::DEFAULT_NPC_DEFEND_PERCENT
        );
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(ConfigLoader::parse("semi_area_percent = \"half\"\n").is_err());
    }

    #[test]
    fn loads_from_disk() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "critical_bonus_percent = 100\n").unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.critical_bonus_percent, 100);
        assert!(ConfigLoader::load(&temp_dir.path().join("absent.toml")).is_err());
    }
}
