//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`BattleConfig`] from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid battle config: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            max_rounds = 30
            crit_chance_pct = 0

            [ai]
            endless_offense_step_pct = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.max_rounds, 30);
        assert_eq!(config.crit_chance_pct, 0);
        assert_eq!(config.stamina_regen, BattleConfig::DEFAULT_STAMINA_REGEN);
        assert_eq!(config.ai.endless_offense_step_pct, 20);
        assert_eq!(config.ai.endless_offense_cap_pct, 300);
    }

    #[test]
    fn rejects_inverted_hit_bounds() {
        let err = ConfigLoader::parse("hit_chance_min = 90\nhit_chance_max = 40").unwrap_err();
        assert!(err.to_string().contains("Invalid battle config"));
    }
}
