//! # Messaging Activities
//!
//! Activity bodies for the messaging pipeline: the non-deterministic half of
//! message dispatch that runs outside the engine's replay path.
//!
//! ## Overview
//!
//! [`MessagingActivities`] owns the process-local handler registry and the
//! platform responder. The inbound processor submits work to it either
//! directly or through the engine's activity mechanism; an agent process
//! registers [`MessagingActivities::dispatch`] with its engine worker so the
//! activity path lands here too. Handlers are resolved from the registry at
//! execution time, never serialized into requests, because handler closures
//! only exist in the process that registered them.

use crate::constants::ops;
use crate::messaging::errors::{MessagingError, MessagingResult};
use crate::messaging::message::HandlerRequest;
use crate::messaging::response::{MessageResponder, OutgoingResponse};
use crate::registry::handler_registry::HandlerRegistry;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Activity implementations for message dispatch and response delivery.
pub struct MessagingActivities {
    handlers: Arc<HandlerRegistry>,
    responder: Arc<dyn MessageResponder>,
}

impl MessagingActivities {
    pub fn new(handlers: Arc<HandlerRegistry>, responder: Arc<dyn MessageResponder>) -> Self {
        Self {
            handlers,
            responder,
        }
    }

    /// Handler registry backing this process.
    pub fn handlers(&self) -> &Arc<HandlerRegistry> {
        &self.handlers
    }

    /// Resolve and invoke the chat handler for the request's workflow type,
    /// then deliver its reply (if any) to the participant.
    pub async fn process_chat_message(&self, request: HandlerRequest) -> MessagingResult<()> {
        let record = self
            .handlers
            .resolve(&request.workflow_type)
            .ok_or_else(|| MessagingError::handler_not_found(&request.workflow_type))?;
        let chat = record
            .chat
            .as_ref()
            .ok_or_else(|| MessagingError::handler_not_found(&request.workflow_type))?;

        debug!(
            workflow_type = %request.workflow_type,
            tenant_id = %request.tenant_id,
            request_id = %request.request_id,
            "Invoking chat handler"
        );

        let reply = chat.handle(request.clone()).await?;
        if let Some(outgoing) = reply_to_response(&request, reply) {
            self.responder.deliver(&outgoing).await?;
        }
        Ok(())
    }

    /// Deliver one already-built response.
    pub async fn send_chat_response(&self, outgoing: OutgoingResponse) -> MessagingResult<()> {
        self.responder.deliver(&outgoing).await
    }

    /// Engine-facing entry point: dispatch one activity invocation by
    /// operation name. Unknown names fail fast at this boundary.
    pub async fn dispatch(&self, operation: &str, payload: Value) -> MessagingResult<Value> {
        match operation {
            ops::PROCESS_CHAT_MESSAGE => {
                let request: HandlerRequest = serde_json::from_value(payload)?;
                self.process_chat_message(request).await?;
                Ok(Value::Null)
            }
            ops::SEND_CHAT_RESPONSE => {
                let outgoing: OutgoingResponse = serde_json::from_value(payload)?;
                self.send_chat_response(outgoing).await?;
                Ok(Value::Null)
            }
            other => {
                warn!(operation = other, "Rejected unknown messaging operation");
                Err(MessagingError::unknown_operation(other))
            }
        }
    }
}

/// Map a handler reply to an outbound response.
///
/// `null` means the handler chose not to reply. A string reply becomes the
/// response text; an object reply contributes its `text` field (when present)
/// and rides along whole as structured data.
fn reply_to_response(request: &HandlerRequest, reply: Value) -> Option<OutgoingResponse> {
    if reply.is_null() {
        return None;
    }

    let base = OutgoingResponse::chat(
        request.participant_id.clone(),
        request.request_id.clone(),
        request.workflow_id.clone(),
        request.workflow_type.clone(),
    )
    .with_thread_id(request.thread_id.clone());

    Some(match reply {
        Value::String(text) => base.with_text(text),
        Value::Object(ref map) => {
            let text = map.get("text").and_then(|v| v.as_str()).map(String::from);
            let mut response = base.with_data(Some(reply.clone()));
            if let Some(text) = text {
                response = response.with_text(text);
            }
            response
        }
        other => base.with_data(Some(other)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> HandlerRequest {
        HandlerRequest {
            text: Some("Hi".to_string()),
            participant_id: "user-1".to_string(),
            request_id: "req-1".to_string(),
            scope: None,
            hint: None,
            data: None,
            tenant_id: "acme".to_string(),
            workflow_id: "acme:Sales:Support:x".to_string(),
            workflow_type: "Sales:Support".to_string(),
            authorization: None,
            thread_id: Some("thread-1".to_string()),
        }
    }

    #[test]
    fn test_null_reply_means_no_response() {
        assert!(reply_to_response(&request(), Value::Null).is_none());
    }

    #[test]
    fn test_string_reply_becomes_text() {
        let response = reply_to_response(&request(), Value::String("hello".into())).unwrap();
        assert_eq!(response.text.as_deref(), Some("hello"));
        assert_eq!(response.participant_id, "user-1");
        assert_eq!(response.thread_id.as_deref(), Some("thread-1"));
    }

    #[test]
    fn test_object_reply_contributes_text_and_data() {
        let reply = serde_json::json!({ "text": "hello", "score": 3 });
        let response = reply_to_response(&request(), reply.clone()).unwrap();
        assert_eq!(response.text.as_deref(), Some("hello"));
        assert_eq!(response.data, Some(reply));
    }
}
