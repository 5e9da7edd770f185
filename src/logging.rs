//! # Structured Logging
//!
//! Environment-aware tracing bootstrap for agent processes. Every pipeline
//! decision in this crate logs structured fields (workflow type, tenant,
//! request id) so failures correlate across the distributed system; this
//! module only installs the subscriber that renders them.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging once per process.
///
/// The filter comes from `AGENT_CORE_LOG`, falling back to `RUST_LOG`, then
/// to an environment-based default. Tolerates an already-installed global
/// subscriber (e.g. set by the embedding host).
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_env("AGENT_CORE_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(default_log_level(&get_environment())));

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true));

        if subscriber.try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized");
        }
    });
}

/// Deployment environment from environment variables.
fn get_environment() -> String {
    std::env::var("AGENT_CORE_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Default log level per environment.
fn default_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}
