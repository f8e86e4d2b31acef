use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::index::tracker::{DEFAULT_BUS_NAME, DEFAULT_TIMEOUT};

const APP_NAME: &str = "rofi-tracker";
const CONFIG_FILE: &str = "config.json";

/// Number of rows shown per query; there is no paging past it
pub const DEFAULT_MAX_RESULTS: usize = 15;

/// Application configuration stored in the user's config directory
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Maximum number of candidates listed per invocation
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Bound on the index query, in milliseconds
    #[serde(default = "default_dbus_timeout_ms")]
    pub dbus_timeout_ms: u64,

    /// Bus name of the Tracker endpoint to query
    #[serde(default = "default_bus_name")]
    pub bus_name: String,

    /// Attach icon names to rows (shown with `rofi -show-icons`)
    #[serde(default = "default_true")]
    pub show_icons: bool,

    /// Prepend a ".." row when listing a folder
    #[serde(default = "default_true")]
    pub parent_row: bool,

    /// Non-selectable row shown when nothing matched; nothing by default
    #[serde(default)]
    pub no_results_message: Option<String>,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_dbus_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT.as_millis() as u64
}

fn default_bus_name() -> String {
    DEFAULT_BUS_NAME.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            dbus_timeout_ms: default_dbus_timeout_ms(),
            bus_name: default_bus_name(),
            show_icons: true,
            parent_row: true,
            no_results_message: None,
        }
    }
}

impl AppConfig {
    /// Load config from the default location, or return default if not found
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load config from `path`, or return default if the file doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn dbus_timeout(&self) -> Duration {
        Duration::from_millis(self.dbus_timeout_ms)
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_NAME).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.max_results, 15);
        assert_eq!(config.dbus_timeout(), Duration::from_millis(2000));
        assert_eq!(config.bus_name, "org.freedesktop.Tracker3.Miner.Files");
        assert!(config.show_icons);
        assert!(config.parent_row);
        assert_eq!(config.no_results_message, None);
    }

    #[test]
    fn test_app_config_empty_json() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_app_config_partial_json() {
        let json = r#"{"max_results": 5, "no_results_message": "no results"}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.max_results, 5);
        assert_eq!(config.no_results_message.as_deref(), Some("no results"));
        assert_eq!(config.dbus_timeout_ms, 2000); // default
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"show_icons": false, "bus_name": "org.example.Index"}"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert!(!config.show_icons);
        assert_eq!(config.bus_name, "org.example.Index");
    }

    #[test]
    fn test_load_invalid_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_config_path_ends_with_app_dir() {
        if let Ok(path) = get_config_path() {
            assert!(path.ends_with("rofi-tracker/config.json"));
        }
    }
}
