//! # Routing Error Types
//!
//! Failure taxonomy for address encoding/decoding and task queue resolution,
//! using thiserror for structured error types.

use thiserror::Error;

/// Errors raised by the identity codec and task queue resolver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// The address string violates the minimum-segment invariant. Fatal to
    /// the operation, never retried.
    #[error("Malformed workflow address: '{address}': {reason}")]
    MalformedAddress { address: String, reason: String },

    /// A caller-supplied component was empty or otherwise unusable.
    #[error("Invalid address component: {reason}")]
    InvalidArgument { reason: String },

    /// Attempted to resolve a routing key for a non-system-scoped workflow
    /// without a tenant. Configuration/programming error, fatal.
    #[error("Tenant id is required to dispatch non-system-scoped workflow type '{workflow_type}'")]
    TenantRequired { workflow_type: String },
}

impl RoutingError {
    /// Create a malformed address error
    pub fn malformed_address(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedAddress {
            address: address.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Create a tenant required error
    pub fn tenant_required(workflow_type: impl Into<String>) -> Self {
        Self::TenantRequired {
            workflow_type: workflow_type.into(),
        }
    }
}

/// Result type alias for routing operations
pub type RoutingResult<T> = Result<T, RoutingError>;
