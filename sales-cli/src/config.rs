//! TOML configuration for the command-line calculator.
//!
//! ```toml
//! [logging]
//! level = "info"
//! file = "salescut.log"
//!
//! [clipboard]
//! command = "wl-copy"
//!
//! [accounts.Horizon]
//! user = "horizon"
//! password = "secret"
//!
//! [accounts."RR-Advisor"]
//! user = "rr"
//! password = "secret"
//! ```
//!
//! Every section is optional. Accounts from `SALESCUT_*` environment
//! variables fill in profiles the file does not list.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sales_core::AccountBook;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "salescut.toml";

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub clipboard: ClipboardConfig,
    pub accounts: AccountBook,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set (a level or any filter directive).
    pub level: String,

    /// Log file appended to alongside stderr output.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Clipboard sink settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Command the summary is piped into (e.g. `pbcopy`, `xclip -selection clipboard`).
    pub command: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads the configuration file.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// [`DEFAULT_CONFIG_PATH`] is tried and a missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_PATH), false),
        };

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if !required && e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file; using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), accounts = config.accounts.len(), "loaded config");
        Ok(config)
    }

    /// Adds accounts from `env` for profiles this configuration does not list.
    pub fn with_env_accounts(
        mut self,
        env: AccountBook,
    ) -> Self {
        self.accounts.merge_missing(env);
        self
    }
}
