//! Configuration
//!
//! Optional TOML file. Every field may be omitted; command-line flags take
//! precedence over anything read here.
//!
//! ```toml
//! [shell]
//! cwd = "/home/user"
//! weather_delay_ms = 1000
//! storage_key = "terminalFS"
//!
//! [storage]
//! path = "vterm-state.json"
//!
//! [logging]
//! level = "warn"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::session::ShellOptions;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellSection {
    pub cwd: Option<String>,
    pub weather_delay_ms: Option<u64>,
    pub storage_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageSection {
    /// JSON state file
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// Filter directive, e.g. `info` or `vterm=debug`
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub shell: ShellSection,
    pub storage: StorageSection,
    pub logging: LoggingSection,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn shell_options(&self) -> ShellOptions {
        ShellOptions {
            cwd: self.shell.cwd.clone(),
            weather_delay: self.shell.weather_delay_ms.map(Duration::from_millis),
            storage_key: self.shell.storage_key.clone(),
        }
    }
}
