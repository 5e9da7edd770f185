//! # Crate-Level Error Handling
//!
//! Umbrella error for embedders that hold one error type across the whole
//! addressing core. Each subsystem keeps its own structured taxonomy; this
//! wraps them with transparent conversions.

use thiserror::Error;

/// Any failure surfaced by the addressing core.
#[derive(Error, Debug)]
pub enum AgentCoreError {
    #[error(transparent)]
    Routing(#[from] crate::routing::errors::RoutingError),

    #[error(transparent)]
    Registry(#[from] crate::registry::errors::RegistryError),

    #[error(transparent)]
    Messaging(#[from] crate::messaging::errors::MessagingError),

    #[error(transparent)]
    A2a(#[from] crate::a2a::errors::A2aError),

    #[error(transparent)]
    Execution(#[from] crate::execution::errors::ExecutionError),

    #[error(transparent)]
    Configuration(#[from] crate::config::ConfigurationError),
}

pub type Result<T> = std::result::Result<T, AgentCoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::errors::RoutingError;

    #[test]
    fn test_subsystem_errors_convert() {
        let err: AgentCoreError = RoutingError::tenant_required("Sales:Support").into();
        assert!(matches!(err, AgentCoreError::Routing(_)));
        assert!(format!("{err}").contains("Sales:Support"));
    }
}
