//! Process settings and query text
//!
//! rofi passes whatever the user typed (or the label of the selected row) as
//! our arguments, so argv is never parsed for options: every argument is
//! query text. Settings are read from the environment instead, e.g.
//! `ROFI_TRACKER_LIMIT=5 rofi -modi tracker:rofi-tracker -show tracker`.

use crate::utils::AppConfig;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(name = "rofi-tracker")]
#[command(about = "Search the Tracker desktop index from rofi's script mode")]
pub struct Settings {
    /// Config file (default: <config dir>/rofi-tracker/config.json)
    #[arg(long, env = "ROFI_TRACKER_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Maximum number of results, overriding the config file
    #[arg(long, env = "ROFI_TRACKER_LIMIT", value_name = "N")]
    pub limit: Option<usize>,

    /// Log debug output to stderr
    #[arg(long, env = "ROFI_TRACKER_VERBOSE")]
    pub verbose: bool,
}

impl Settings {
    /// Read settings from the environment only
    pub fn from_env() -> Result<Self, clap::Error> {
        Self::try_parse_from(["rofi-tracker"])
    }

    /// Effective configuration: the config file, then overrides on top
    ///
    /// A broken config file must not stop rofi from getting a list, so it
    /// is logged and replaced by the defaults.
    pub fn app_config(&self) -> AppConfig {
        let loaded = match &self.config {
            Some(path) => AppConfig::load_from(path),
            None => AppConfig::load(),
        };

        let mut config = loaded.unwrap_or_else(|e| {
            tracing::warn!(error = %format!("{:#}", e), "using default config");
            AppConfig::default()
        });

        if let Some(limit) = self.limit {
            config.max_results = limit;
        }
        config
    }
}

/// Query words from argv (without the program name), taken verbatim
pub fn query_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<String> {
    args.into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}
