//! Loader configuration
//!
//! Read from a TOML file such as:
//!
//! ```toml
//! channel = "https://example.com/channels"
//! timeout_secs = 30
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Location used when none is configured.
pub const DEFAULT_CHANNEL_LOCATION: &str = "./channels";

/// Where channels live and how to reach them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Filesystem path or `http(s)://` base URL holding channel data
    pub channel: String,
    /// Per-request timeout for the HTTP backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL_LOCATION.to_string(),
            timeout_secs: None,
        }
    }
}

impl LoaderConfig {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Error::io(path, e)
            }
        })?;
        Self::from_toml(path, &content)
    }

    fn from_toml(path: &Path, content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if config.channel.trim().is_empty() {
            return Err(Error::InvalidConfig {
                path: path.to_path_buf(),
                message: "channel location must not be empty".to_string(),
            });
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
