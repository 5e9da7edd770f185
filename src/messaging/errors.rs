//! # Messaging Error Types
//!
//! Failure taxonomy for the inbound message pipeline, using thiserror for
//! structured error types instead of `Box<dyn Error>` patterns.
//!
//! Validation and lookup failures in the pipeline are recovered locally into
//! user-visible responses and never surface through these types; what remains
//! here is the genuinely fatal or executor-propagated side.

use crate::execution::errors::{ExecutionError, ExecutionFailure};
use crate::routing::errors::RoutingError;
use thiserror::Error;

/// Errors raised by message processing and response delivery.
#[derive(Error, Debug)]
pub enum MessagingError {
    /// No handler registration exists for a workflow type at execution time.
    #[error("No handler registered for workflow type '{workflow_type}'")]
    HandlerNotFound { workflow_type: String },

    /// An application handler returned a failure.
    #[error("Handler for workflow type '{workflow_type}' failed: {message}")]
    HandlerFailed {
        workflow_type: String,
        message: String,
    },

    /// Message payload could not be serialized or deserialized.
    #[error("Message serialization error: {message}")]
    Serialization { message: String },

    /// The platform client failed to deliver an outbound response.
    #[error("Response delivery failed: {message}")]
    ResponseDelivery { message: String },

    /// An activity dispatcher received an operation name outside the known set.
    #[error("Unknown messaging operation: '{operation}'")]
    UnknownOperation { operation: String },

    /// Address decoding failed.
    #[error(transparent)]
    Routing(#[from] RoutingError),

    /// The dual-mode executor failed the dispatch.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl MessagingError {
    /// Create a handler not found error
    pub fn handler_not_found(workflow_type: impl Into<String>) -> Self {
        Self::HandlerNotFound {
            workflow_type: workflow_type.into(),
        }
    }

    /// Create a handler failure error
    pub fn handler_failed(workflow_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HandlerFailed {
            workflow_type: workflow_type.into(),
            message: message.into(),
        }
    }

    /// Create a response delivery error
    pub fn response_delivery(message: impl Into<String>) -> Self {
        Self::ResponseDelivery {
            message: message.into(),
        }
    }

    /// Create an unknown operation error
    pub fn unknown_operation(operation: impl Into<String>) -> Self {
        Self::UnknownOperation {
            operation: operation.into(),
        }
    }
}

impl From<serde_json::Error> for MessagingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

/// Messaging failures entering the dual-mode executor collapse to an untagged
/// failure; the executor re-tags them with the operation name.
impl From<MessagingError> for ExecutionFailure {
    fn from(err: MessagingError) -> Self {
        ExecutionFailure::Failed {
            message: err.to_string(),
        }
    }
}

/// Result type alias for messaging operations
pub type MessagingResult<T> = Result<T, MessagingError>;
