//! Service configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::{Error, Result};

/// Default maximum number of cached robots.txt documents.
pub const DEFAULT_CACHE_MAX_SIZE_RECORDS: usize = 10_000;

/// Default time-to-live of a cached document, in hours.
pub const DEFAULT_CACHED_EXPIRES_HOURS: u64 = 24;

/// Configuration for a [`super::RobotExclusionService`].
///
/// Every field has a default, so a config file only needs the keys it
/// overrides:
///
/// ```yaml
/// cache_max_size_records: 500
/// cached_expires_hours: 6
/// user_agent: examplebot/1.0
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotExclusionConfig {
    /// Maximum number of origins kept in the cache
    pub cache_max_size_records: usize,
    /// Hours a cached document lives after it was loaded
    pub cached_expires_hours: u64,
    /// User-Agent header sent when fetching robots.txt
    pub user_agent: String,
    /// Connect and read timeout for downloads, in seconds
    pub read_timeout_secs: u64,
    /// Bytes of a robots.txt body that are parsed; the rest is ignored
    pub max_file_size_bytes: u64,
}

impl Default for RobotExclusionConfig {
    fn default() -> Self {
        Self {
            cache_max_size_records: DEFAULT_CACHE_MAX_SIZE_RECORDS,
            cached_expires_hours: DEFAULT_CACHED_EXPIRES_HOURS,
            user_agent: concat!("robots-exclusion/", env!("CARGO_PKG_VERSION")).to_string(),
            read_timeout_secs: 30,
            max_file_size_bytes: 512 * 1024,
        }
    }
}

impl RobotExclusionConfig {
    /// Load a YAML (`.yml`/`.yaml`) or JSON (`.json`) config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => serde_yaml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => {
                return Err(Error::Config(format!(
                    "unsupported config file extension: {:?}",
                    path
                )))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Set the maximum number of cached documents.
    pub fn with_cache_max_size_records(mut self, records: usize) -> Self {
        self.cache_max_size_records = records;
        self
    }

    /// Set the cache time-to-live in hours.
    pub fn with_cached_expires_hours(mut self, hours: u64) -> Self {
        self.cached_expires_hours = hours;
        self
    }

    /// Set the User-Agent header used for downloads.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Cache time-to-live.
    pub fn time_to_live(&self) -> Duration {
        Duration::from_secs(self.cached_expires_hours.saturating_mul(3600))
    }

    /// Download timeout.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.cache_max_size_records == 0 {
            return Err(Error::Config(
                "cache_max_size_records must be greater than zero".to_string(),
            ));
        }
        if self.cached_expires_hours == 0 {
            return Err(Error::Config(
                "cached_expires_hours must be greater than zero".to_string(),
            ));
        }
        if self.max_file_size_bytes == 0 {
            return Err(Error::Config(
                "max_file_size_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
