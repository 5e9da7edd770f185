//! # Message Structures
//!
//! Wire formats for messages arriving at a workflow instance and the
//! self-contained request object handed to application handlers.
//!
//! These types are created by the transport layer on arrival, consumed exactly
//! once by the processor, and never persisted by this layer; durable state is
//! the workflow engine's concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of an inbound message.
///
/// The external contract is string-typed; unknown strings fail
/// deserialization at the boundary rather than leaking into dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    /// Conversational message routed to a chat handler.
    Chat,
    /// Structured data message. Shape exists but routing is a documented
    /// non-goal of the current pipeline.
    Data,
    /// Conversation handoff between agents. Same status as `Data`.
    Handoff,
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MessageType::Chat => "Chat",
            MessageType::Data => "Data",
            MessageType::Handoff => "Handoff",
        };
        f.write_str(name)
    }
}

/// One prior turn of the conversation, fetched alongside the message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub sender: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Payload of an inbound message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePayload {
    /// Agent the message is addressed to.
    pub agent: Option<String>,
    /// Conversation thread identifier.
    pub thread_id: Option<String>,
    /// Remote participant the response goes back to.
    pub participant_id: String,
    /// Conversational text.
    pub text: Option<String>,
    /// Correlation id; auto-generated at ingestion when absent.
    pub request_id: Option<String>,
    /// Free-form routing hint from the sender.
    pub hint: Option<String>,
    /// Caller-declared scope of the request.
    pub scope: Option<String>,
    /// Structured payload data.
    pub data: Option<serde_json::Value>,
    /// Message kind; only `Chat` currently dispatches.
    pub message_type: MessageType,
    /// Bearer token or similar credential passed through to the handler.
    pub authorization: Option<String>,
    /// Prior conversation turns.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// A message as delivered to a hosting workflow instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub payload: MessagePayload,
    /// Agent name of the sender, when sent workflow-to-workflow.
    pub source_agent: Option<String>,
    /// Workflow id of the sender.
    pub source_workflow_id: Option<String>,
    /// Workflow type of the sender.
    pub source_workflow_type: Option<String>,
}

impl InboundMessage {
    /// Guarantee the request id invariant: non-empty at processing time.
    ///
    /// Returns the effective request id.
    pub fn ensure_request_id(&mut self) -> String {
        match &self.payload.request_id {
            Some(id) if !id.trim().is_empty() => id.clone(),
            _ => {
                let generated = Uuid::new_v4().to_string();
                self.payload.request_id = Some(generated.clone());
                generated
            }
        }
    }
}

/// Self-contained dispatch object handed to a registered handler.
///
/// Carries everything the handler needs; deliberately no handler closure
/// inside. Handlers are re-resolved from the process-local registry in the
/// execution context that owns them, so this struct stays serializable across
/// the activity boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerRequest {
    pub text: Option<String>,
    pub participant_id: String,
    pub request_id: String,
    pub scope: Option<String>,
    pub hint: Option<String>,
    pub data: Option<serde_json::Value>,
    pub tenant_id: String,
    pub workflow_id: String,
    pub workflow_type: String,
    pub authorization: Option<String>,
    pub thread_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat_payload() -> MessagePayload {
        MessagePayload {
            agent: Some("Sales".to_string()),
            thread_id: Some("thread-1".to_string()),
            participant_id: "user-1".to_string(),
            text: Some("Hi".to_string()),
            request_id: None,
            hint: None,
            scope: None,
            data: None,
            message_type: MessageType::Chat,
            authorization: None,
            history: vec![],
        }
    }

    #[test]
    fn test_ensure_request_id_generates_when_absent() {
        let mut message = InboundMessage {
            payload: chat_payload(),
            source_agent: None,
            source_workflow_id: None,
            source_workflow_type: None,
        };

        let id = message.ensure_request_id();
        assert!(!id.is_empty());
        assert_eq!(message.payload.request_id.as_deref(), Some(id.as_str()));

        // Second call is stable
        assert_eq!(message.ensure_request_id(), id);
    }

    #[test]
    fn test_ensure_request_id_replaces_blank() {
        let mut payload = chat_payload();
        payload.request_id = Some("   ".to_string());
        let mut message = InboundMessage {
            payload,
            source_agent: None,
            source_workflow_id: None,
            source_workflow_type: None,
        };

        let id = message.ensure_request_id();
        assert!(!id.trim().is_empty());
        assert_ne!(id, "   ");
    }

    #[test]
    fn test_message_type_rejects_unknown_strings() {
        assert!(serde_json::from_str::<MessageType>("\"Chat\"").is_ok());
        assert!(serde_json::from_str::<MessageType>("\"Telemetry\"").is_err());
    }

    #[test]
    fn test_payload_round_trips_json() {
        let payload = chat_payload();
        let json = serde_json::to_string(&payload).unwrap();
        let back: MessagePayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back.participant_id, "user-1");
        assert_eq!(back.message_type, MessageType::Chat);
    }
}
