//! # Configuration
//!
//! Explicit, validated configuration for the addressing core. Defaults mirror
//! the activity options observed in production use (3 attempts, exponential
//! backoff, capped interval); environment variables with the `AGENT_CORE`
//! prefix override individual fields, e.g.
//! `AGENT_CORE__ACTIVITY__RETRY_MAX_ATTEMPTS=5`.

use crate::execution::engine::{ActivityOptions, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration loading failures.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Configuration error: {message}")]
    Invalid { message: String },
}

impl From<config::ConfigError> for ConfigurationError {
    fn from(err: config::ConfigError) -> Self {
        Self::Invalid {
            message: err.to_string(),
        }
    }
}

/// Activity invocation knobs applied by the dual-mode executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityConfig {
    pub start_to_close_timeout_seconds: u64,
    pub retry_max_attempts: u32,
    pub retry_initial_interval_ms: u64,
    pub retry_backoff_coefficient: f64,
    pub retry_max_interval_ms: u64,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            start_to_close_timeout_seconds: 60,
            retry_max_attempts: 3,
            retry_initial_interval_ms: 1_000,
            retry_backoff_coefficient: 2.0,
            retry_max_interval_ms: 30_000,
        }
    }
}

impl ActivityConfig {
    /// Materialize engine-facing activity options.
    pub fn to_options(&self) -> ActivityOptions {
        ActivityOptions {
            start_to_close_timeout: Duration::from_secs(self.start_to_close_timeout_seconds),
            retry: RetryPolicy {
                max_attempts: self.retry_max_attempts,
                initial_interval: Duration::from_millis(self.retry_initial_interval_ms),
                backoff_coefficient: self.retry_backoff_coefficient,
                max_interval: Duration::from_millis(self.retry_max_interval_ms),
            },
        }
    }
}

/// Top-level configuration for the addressing core.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentCoreConfig {
    #[serde(default)]
    pub activity: ActivityConfig,
}

impl AgentCoreConfig {
    /// Load configuration: built-in defaults layered with `AGENT_CORE`
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigurationError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&AgentCoreConfig::default())?)
            .add_source(config::Environment::with_prefix("AGENT_CORE").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
