//! # Execution Error Types
//!
//! Failures crossing the dual-mode executor, plus the error surface of the
//! external workflow engine.
//!
//! The engine reports untagged failures ([`EngineError`] /
//! [`ExecutionFailure`]); the executor tags them with the operation name once
//! per call ([`ExecutionError`]) so every failure can be correlated in logs
//! without each call site repeating itself. Engine-specific kinds
//! (target-not-found, update rejection, cancellation) survive the tagging so
//! higher layers can still branch on them.

use thiserror::Error;

/// Errors surfaced by the external workflow engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The addressed workflow instance does not exist.
    #[error("Workflow '{workflow_id}' not found")]
    TargetNotFound { workflow_id: String },

    /// An update validator rejected the request before any state mutation.
    #[error("Update rejected: {reason}")]
    UpdateRejected { reason: String },

    /// The call or activity exceeded its timeout.
    #[error("Engine call timed out after {timeout_seconds}s")]
    Timeout { timeout_seconds: u64 },

    /// The ambient cancellation token fired. Never retried.
    #[error("Engine call was cancelled")]
    Cancelled,

    /// Transport or engine-internal failure.
    #[error("Engine transport error: {message}")]
    Transport { message: String },
}

impl EngineError {
    /// Create a target not found error
    pub fn target_not_found(workflow_id: impl Into<String>) -> Self {
        Self::TargetNotFound {
            workflow_id: workflow_id.into(),
        }
    }

    /// Create an update rejection error
    pub fn update_rejected(reason: impl Into<String>) -> Self {
        Self::UpdateRejected {
            reason: reason.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// An execution-path failure before the operation tag is attached.
///
/// Both executor paths produce this; [`ExecutionFailure::tagged`] turns it
/// into the uniform, operation-tagged [`ExecutionError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionFailure {
    Cancelled,
    Timeout { timeout_seconds: u64 },
    TargetNotFound { workflow_id: String },
    Rejected { reason: String },
    Failed { message: String },
}

impl ExecutionFailure {
    /// Create a generic failure
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Attach the operation name, producing the uniform executor error.
    pub fn tagged(self, operation: &str) -> ExecutionError {
        let operation = operation.to_string();
        match self {
            ExecutionFailure::Cancelled => ExecutionError::Cancelled { operation },
            ExecutionFailure::Timeout { timeout_seconds } => ExecutionError::Timeout {
                operation,
                timeout_seconds,
            },
            ExecutionFailure::TargetNotFound { workflow_id } => ExecutionError::TargetNotFound {
                operation,
                workflow_id,
            },
            ExecutionFailure::Rejected { reason } => ExecutionError::Rejected { operation, reason },
            ExecutionFailure::Failed { message } => ExecutionError::OperationFailed {
                operation,
                message,
            },
        }
    }
}

impl From<EngineError> for ExecutionFailure {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Cancelled => ExecutionFailure::Cancelled,
            EngineError::Timeout { timeout_seconds } => {
                ExecutionFailure::Timeout { timeout_seconds }
            }
            EngineError::TargetNotFound { workflow_id } => {
                ExecutionFailure::TargetNotFound { workflow_id }
            }
            EngineError::UpdateRejected { reason } => ExecutionFailure::Rejected { reason },
            EngineError::Transport { message } => ExecutionFailure::Failed { message },
        }
    }
}

/// Uniform, operation-tagged failure from the dual-mode executor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Operation '{operation}' was cancelled")]
    Cancelled { operation: String },

    #[error("Operation '{operation}' timed out after {timeout_seconds}s")]
    Timeout {
        operation: String,
        timeout_seconds: u64,
    },

    #[error("Operation '{operation}' targeted unknown workflow '{workflow_id}'")]
    TargetNotFound {
        operation: String,
        workflow_id: String,
    },

    #[error("Operation '{operation}' was rejected before execution: {reason}")]
    Rejected { operation: String, reason: String },

    #[error("Operation '{operation}' failed: {message}")]
    OperationFailed { operation: String, message: String },
}

impl ExecutionError {
    /// Operation name this failure was tagged with.
    pub fn operation(&self) -> &str {
        match self {
            ExecutionError::Cancelled { operation }
            | ExecutionError::Timeout { operation, .. }
            | ExecutionError::TargetNotFound { operation, .. }
            | ExecutionError::Rejected { operation, .. }
            | ExecutionError::OperationFailed { operation, .. } => operation,
        }
    }
}

/// Result type alias for executor operations
pub type ExecutionResult<T> = Result<T, ExecutionError>;
