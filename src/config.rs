//! Runtime configuration, from defaults overridden by environment variables

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::constants::{DATA_DIR_NAME, DEFAULT_CHECK_ENDPOINT, DEFAULT_TIMEOUT_SECS, TEMPLATE_COLLECTION};

pub const ENV_CHECK_ENDPOINT: &str = "DEVBOX_CHECK_ENDPOINT";
pub const ENV_DATA_DIR: &str = "DEVBOX_DATA_DIR";
pub const ENV_TIMEOUT_SECS: &str = "DEVBOX_TIMEOUT_SECS";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Execution backend URL receiving dispatch payloads
    pub check_endpoint: String,
    /// Root for the template store and log file
    pub data_dir: PathBuf,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            check_endpoint: String::from(DEFAULT_CHECK_ENDPOINT),
            data_dir: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(DATA_DIR_NAME),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(endpoint) = lookup(ENV_CHECK_ENDPOINT).filter(|v| !v.is_empty()) {
            config.check_endpoint = endpoint;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS).filter(|v| !v.is_empty()) {
            let secs: u64 = secs
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .with_context(|| format!("{} must be a positive whole number of seconds, got '{}'", ENV_TIMEOUT_SECS, secs))?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn template_dir(&self) -> PathBuf {
        self.data_dir.join(TEMPLATE_COLLECTION)
    }
}
