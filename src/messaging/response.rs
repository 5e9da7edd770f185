//! # Outbound Responses
//!
//! Outgoing chat/error responses and the platform-client seam used to deliver
//! them.
//!
//! The concrete delivery transport (authenticated HTTP to the remote
//! platform) is an external collaborator; this crate only defines the
//! [`MessageResponder`] trait and routes calls to it through the dual-mode
//! executor so delivery never happens directly from deterministic workflow
//! code.

use crate::constants::ops;
use crate::execution::errors::ExecutionFailure;
use crate::execution::executor::DualModeExecutor;
use crate::messaging::errors::{MessagingError, MessagingResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Whether a response is a normal reply or a visible error notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseKind {
    Chat,
    Error,
}

/// One outbound response to a conversation participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutgoingResponse {
    pub kind: ResponseKind,
    pub participant_id: String,
    pub request_id: String,
    pub thread_id: Option<String>,
    pub workflow_id: String,
    pub workflow_type: String,
    pub text: Option<String>,
    pub data: Option<serde_json::Value>,
}

impl OutgoingResponse {
    /// A normal chat reply.
    pub fn chat(
        participant_id: impl Into<String>,
        request_id: impl Into<String>,
        workflow_id: impl Into<String>,
        workflow_type: impl Into<String>,
    ) -> Self {
        Self::new(ResponseKind::Chat, participant_id, request_id, workflow_id, workflow_type)
    }

    /// A visible error notice.
    pub fn error(
        participant_id: impl Into<String>,
        request_id: impl Into<String>,
        workflow_id: impl Into<String>,
        workflow_type: impl Into<String>,
    ) -> Self {
        Self::new(ResponseKind::Error, participant_id, request_id, workflow_id, workflow_type)
    }

    fn new(
        kind: ResponseKind,
        participant_id: impl Into<String>,
        request_id: impl Into<String>,
        workflow_id: impl Into<String>,
        workflow_type: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            participant_id: participant_id.into(),
            request_id: request_id.into(),
            thread_id: None,
            workflow_id: workflow_id.into(),
            workflow_type: workflow_type.into(),
            text: None,
            data: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_thread_id(mut self, thread_id: Option<String>) -> Self {
        self.thread_id = thread_id;
        self
    }

    pub fn with_data(mut self, data: Option<serde_json::Value>) -> Self {
        self.data = data;
        self
    }
}

/// Delivery seam to the remote platform.
#[async_trait]
pub trait MessageResponder: Send + Sync {
    async fn deliver(&self, response: &OutgoingResponse) -> MessagingResult<()>;
}

/// Sends responses through the dual-mode executor: an activity inside
/// workflow context, a direct responder call everywhere else.
#[derive(Clone)]
pub struct ResponseSender {
    responder: Arc<dyn MessageResponder>,
    executor: Arc<DualModeExecutor>,
}

impl ResponseSender {
    pub fn new(responder: Arc<dyn MessageResponder>, executor: Arc<DualModeExecutor>) -> Self {
        Self { responder, executor }
    }

    /// Deliver one response under the send-response operation name.
    pub async fn send(&self, outgoing: OutgoingResponse) -> MessagingResult<()> {
        let payload = serde_json::to_value(&outgoing)?;
        let responder = Arc::clone(&self.responder);
        let direct = async move {
            responder
                .deliver(&outgoing)
                .await
                .map_err(ExecutionFailure::from)
        };

        self.executor
            .execute_via_activity::<(), _>(ops::SEND_CHAT_RESPONSE, payload, direct)
            .await
            .map_err(MessagingError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_fills_optional_fields() {
        let response = OutgoingResponse::error("user-1", "req-1", "acme:Sales:Support", "Sales:Support")
            .with_text("no handler registered")
            .with_thread_id(Some("thread-9".to_string()));

        assert_eq!(response.kind, ResponseKind::Error);
        assert_eq!(response.text.as_deref(), Some("no handler registered"));
        assert_eq!(response.thread_id.as_deref(), Some("thread-9"));
        assert!(response.data.is_none());
    }

    #[test]
    fn test_response_round_trips_json() {
        let response = OutgoingResponse::chat("user-1", "req-1", "acme:Sales:Support", "Sales:Support")
            .with_text("hello");
        let json = serde_json::to_value(&response).unwrap();
        let back: OutgoingResponse = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind, ResponseKind::Chat);
        assert_eq!(back.text.as_deref(), Some("hello"));
    }
}
