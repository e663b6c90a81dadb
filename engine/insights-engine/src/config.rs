//! Configuration for the insights engine

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the insights engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsConfig {
    /// Slope threshold separating rising/falling from stable trends
    pub trend_threshold: f64,

    /// Entries per superlative leaderboard
    pub leaderboard_size: usize,

    /// Receivers reported in the per-team target distribution
    pub wr_distribution_size: usize,

    /// Storage configuration
    pub store: StoreConfig,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Root directory backing the local blob store
    pub data_dir: PathBuf,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            trend_threshold: 0.05,
            leaderboard_size: 3,
            wr_distribution_size: 3,
            store: StoreConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("./nfl_data") }
    }
}

impl InsightsConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: InsightsConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), anyhow::Error> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_constants() {
        let config = InsightsConfig::default();
        assert_eq!(config.trend_threshold, 0.05);
        assert_eq!(config.leaderboard_size, 3);
        assert_eq!(config.wr_distribution_size, 3);
    }

    #[test]
    fn toml_round_trip() {
        let config = InsightsConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: InsightsConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.trend_threshold, config.trend_threshold);
        assert_eq!(parsed.store.data_dir, config.store.data_dir);
    }
}
