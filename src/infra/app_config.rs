use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::{ExploreError, ExploreResult, MAX_HISTORY_ITEMS, RawTimeRange, TimeZone};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExploreConfig {
    pub org_id: i64,
    /// Zone used for users without a profile preference.
    pub default_time_zone: TimeZone,
    pub max_history_items: usize,
    /// Floor for the computed query interval.
    pub min_interval_ms: i64,
    /// Range used when neither the URL nor the pane specifies one.
    pub default_range: RawTimeRange,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            org_id: 1,
            default_time_zone: TimeZone::Browser,
            max_history_items: MAX_HISTORY_ITEMS,
            min_interval_ms: 1_000,
            default_range: RawTimeRange::default(),
        }
    }
}

pub fn load_config() -> ExploreConfig {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &std::path::Path) -> ExploreConfig {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return ExploreConfig::default();
    };
    parse_config(&contents).unwrap_or_else(|err| {
        log::warn!("Ignoring config at {}: {}", path.display(), err);
        ExploreConfig::default()
    })
}

pub fn parse_config(contents: &str) -> ExploreResult<ExploreConfig> {
    toml::from_str(contents).map_err(|err| ExploreError::Config(err.message().to_string()))
}

pub fn save_config(config: &ExploreConfig) -> std::io::Result<()> {
    save_config_to(&config_path(), config)
}

pub fn save_config_to(path: &std::path::Path, config: &ExploreConfig) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(config)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
    std::fs::write(path, contents)
}

fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("EXPLORE_SYNC_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    dirs::config_dir()
        .unwrap_or_else(|| {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(".explore-sync")
        })
        .join("explore-sync")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from(&dir.path().join("nope.toml"));
        assert_eq!(config, ExploreConfig::default());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = ExploreConfig {
            org_id: 7,
            default_time_zone: TimeZone::Offset(60),
            max_history_items: 20,
            min_interval_ms: 15_000,
            default_range: RawTimeRange::new("now-6h", "now"),
        };

        save_config_to(&path, &config).unwrap();
        assert_eq!(load_config_from(&path), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "org_id = 3\ndefault_time_zone = \"utc\"\n").unwrap();

        let config = load_config_from(&path);
        assert_eq!(config.org_id, 3);
        assert_eq!(config.default_time_zone, TimeZone::Utc);
        assert_eq!(config.default_range, RawTimeRange::default());
    }

    #[test]
    fn invalid_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "org_id = \"not a number\"").unwrap();
        assert_eq!(load_config_from(&path), ExploreConfig::default());
    }

    #[test]
    fn malformed_time_zone_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "org_id = 4\ndefault_time_zone = \"+-999999999\"\n").unwrap();
        assert_eq!(load_config_from(&path), ExploreConfig::default());

        let err = parse_config("default_time_zone = \"+05:-30\"").unwrap_err();
        assert!(matches!(err, ExploreError::Config(_)));
    }
}
