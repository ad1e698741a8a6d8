//! # Client Configuration
//!
//! Settings for the API connection, reminder polling and banner behaviour.
//! An optional YAML file provides a base; environment variables override it.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::features::reminders::DismissPolicy;

/// Default backend address
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
/// Default due-reminder poll period (5 minutes)
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5 * 60;
/// Default HTTP request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Backend base URL, without trailing slash
    pub api_base_url: String,
    /// Seconds between due-reminder polls
    pub poll_interval_secs: u64,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// How banner dismissal behaves when the reminder set changes
    pub dismiss_policy: DismissPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_URL.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            dismiss_policy: DismissPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration: YAML file from `RESOLUTIONS_CONFIG` (if set), then env overrides
    pub fn from_env() -> Result<Self> {
        let path = std::env::var("RESOLUTIONS_CONFIG").ok();
        Self::from_sources(path.as_deref(), |key| std::env::var(key).ok())
    }

    /// Layer `lookup` overrides on top of an optional YAML file and validate the result
    pub fn from_sources<F>(path: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = match path {
            Some(path) => Self::read(path)?,
            None => Config::default(),
        };
        let config = base.with_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a YAML file
    pub fn load(path: &str) -> Result<Self> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    fn read(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Apply overrides from a key lookup (the environment in production)
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("RESOLUTIONS_API_URL") {
            self.api_base_url = url;
        }
        if let Some(secs) = lookup("RESOLUTIONS_POLL_SECS") {
            self.poll_interval_secs = secs
                .trim()
                .parse()
                .map_err(|_| anyhow!("RESOLUTIONS_POLL_SECS must be a number: {}", secs))?;
        }
        if let Some(secs) = lookup("RESOLUTIONS_TIMEOUT_SECS") {
            self.request_timeout_secs = secs
                .trim()
                .parse()
                .map_err(|_| anyhow!("RESOLUTIONS_TIMEOUT_SECS must be a number: {}", secs))?;
        }
        if let Some(policy) = lookup("RESOLUTIONS_DISMISS_POLICY") {
            self.dismiss_policy = policy.parse()?;
        }
        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let url = self.api_base_url.trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow!(
                "API base URL must start with http:// or https://: {}",
                self.api_base_url
            ));
        }
        if self.poll_interval_secs == 0 {
            return Err(anyhow!("Poll interval must be greater than zero"));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("Request timeout must be greater than zero"));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
