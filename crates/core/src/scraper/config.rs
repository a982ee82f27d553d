//! Scraper configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the fetch pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Seasons fetched concurrently while building the indexes.
    #[serde(default = "default_concurrency")]
    pub list_concurrency: usize,

    /// Entities (players, dates, draft years) fetched concurrently by the
    /// detail operations.
    #[serde(default = "default_concurrency")]
    pub detail_concurrency: usize,

    /// Fetch each player profile once per batch instead of once per season.
    #[serde(default)]
    pub cache_player_profiles: bool,

    /// Stat type requested when the caller does not name one.
    #[serde(default = "default_stat_type")]
    pub default_stat_type: String,
}

fn default_concurrency() -> usize {
    40
}

fn default_stat_type() -> String {
    "gameLog".to_string()
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            list_concurrency: default_concurrency(),
            detail_concurrency: default_concurrency(),
            cache_player_profiles: false,
            default_stat_type: default_stat_type(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScraperConfig::default();
        assert_eq!(config.list_concurrency, 40);
        assert_eq!(config.detail_concurrency, 40);
        assert!(!config.cache_player_profiles);
        assert_eq!(config.default_stat_type, "gameLog");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ScraperConfig = toml::from_str("detail_concurrency = 8").unwrap();
        assert_eq!(config.detail_concurrency, 8);
        assert_eq!(config.list_concurrency, 40);
    }
}
