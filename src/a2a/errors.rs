//! # Cross-Workflow Call Error Types
//!
//! Failure taxonomy for the agent-to-agent call layer.
//!
//! The load-bearing distinction is [`A2aError::UpdateRejected`] versus
//! [`A2aError::CallFailed`]: a rejection happened before any state mutation,
//! a failure may have happened after one. Callers never have to guess whether
//! a side effect occurred.

use crate::execution::errors::ExecutionError;
use thiserror::Error;

/// Errors raised by signal/query/update calls and update dispatch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum A2aError {
    /// The target address failed to parse; nothing was submitted.
    #[error("Invalid call target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },

    /// The addressed workflow instance does not exist.
    #[error("Call target workflow '{workflow_id}' not found")]
    TargetNotFound { workflow_id: String },

    /// An update validator rejected the request before any state mutation.
    #[error("Update '{operation}' rejected before execution: {reason}")]
    UpdateRejected { operation: String, reason: String },

    /// Operation name outside the registered set.
    #[error("Unknown update operation: '{operation}'")]
    UnknownOperation { operation: String },

    /// The call exceeded its timeout. Retry only if the operation is idempotent.
    #[error("Call '{operation}' timed out after {timeout_seconds}s")]
    CallTimeout {
        operation: String,
        timeout_seconds: u64,
    },

    /// The ambient cancellation token fired. Never retried.
    #[error("Call '{operation}' was cancelled")]
    Cancelled { operation: String },

    /// The call ran and failed; a side effect may have occurred.
    #[error("Call '{operation}' failed: {message}")]
    CallFailed { operation: String, message: String },

    /// Arguments or results could not be serialized.
    #[error("Call serialization error: {message}")]
    Serialization { message: String },
}

impl A2aError {
    /// Create an invalid target error
    pub fn invalid_target(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Create an update rejection error
    pub fn update_rejected(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UpdateRejected {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown operation error
    pub fn unknown_operation(operation: impl Into<String>) -> Self {
        Self::UnknownOperation {
            operation: operation.into(),
        }
    }

    /// Create a call failure error
    pub fn call_failed(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CallFailed {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

impl From<ExecutionError> for A2aError {
    fn from(err: ExecutionError) -> Self {
        match err {
            ExecutionError::Cancelled { operation } => A2aError::Cancelled { operation },
            ExecutionError::Timeout {
                operation,
                timeout_seconds,
            } => A2aError::CallTimeout {
                operation,
                timeout_seconds,
            },
            ExecutionError::TargetNotFound { workflow_id, .. } => {
                A2aError::TargetNotFound { workflow_id }
            }
            ExecutionError::Rejected { operation, reason } => {
                A2aError::UpdateRejected { operation, reason }
            }
            ExecutionError::OperationFailed { operation, message } => {
                A2aError::CallFailed { operation, message }
            }
        }
    }
}

impl From<serde_json::Error> for A2aError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

/// Result type alias for cross-workflow call operations
pub type A2aResult<T> = Result<T, A2aError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_error_mapping_preserves_kinds() {
        let err: A2aError = ExecutionError::Rejected {
            operation: "a2a.update".to_string(),
            reason: "empty id".to_string(),
        }
        .into();
        assert!(matches!(err, A2aError::UpdateRejected { .. }));

        let err: A2aError = ExecutionError::TargetNotFound {
            operation: "a2a.query".to_string(),
            workflow_id: "t1:Sales:Support".to_string(),
        }
        .into();
        assert!(matches!(err, A2aError::TargetNotFound { .. }));

        let err: A2aError = ExecutionError::Cancelled {
            operation: "a2a.signal".to_string(),
        }
        .into();
        assert!(matches!(err, A2aError::Cancelled { .. }));
    }
}
