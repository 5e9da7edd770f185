//! # Inbound Message Processor
//!
//! State machine that authenticates and dispatches one inbound message to the
//! registered application handler. One pass per message, terminal on the
//! first failure.
//!
//! ## Pipeline
//!
//! 1. Type filter: only conversational (`Chat`) messages proceed; others are
//!    logged and dropped.
//! 2. Tenant decode: from the hosting workflow's own address, not the
//!    message. Decode failure is fatal for this message: there is no safe way
//!    to know whom to notify, so nothing is sent.
//! 3. Handler lookup by workflow type: a miss produces a visible error
//!    response to the participant.
//! 4. Tenant isolation check: the single cross-tenant enforcement point;
//!    violations produce a visible response and an audit log entry.
//! 5. Identity match check: guards against serving a message addressed to a
//!    different agent.
//! 6. Dispatch: a self-contained request object goes to the dual-mode
//!    executor; the handler is re-resolved from the registry in the execution
//!    context that owns it.
//!
//! Steps 1–5 recover locally (drop or visible response) and never fail the
//! hosting workflow instance. Step 6's internal failures belong to the
//! executor's retry policy and propagate from [`MessageProcessor::process`].

use crate::constants::ops;
use crate::execution::engine::WorkflowInfo;
use crate::execution::errors::ExecutionFailure;
use crate::execution::executor::DualModeExecutor;
use crate::messaging::activities::MessagingActivities;
use crate::messaging::errors::MessagingResult;
use crate::messaging::message::{HandlerRequest, InboundMessage, MessageType};
use crate::messaging::response::{MessageResponder, OutgoingResponse, ResponseSender};
use crate::registry::handler_registry::{
    validate_identity_match, validate_tenant_isolation, HandlerRegistry,
};
use crate::routing::identity::extract_tenant_id;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Why a message was dropped without a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Message type outside the currently handled set.
    UnsupportedType(MessageType),
    /// The hosting workflow's own address failed to decode.
    UndecodableAddress,
}

/// Why a message was rejected with a visible error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    HandlerNotFound,
    TenantIsolation,
    IdentityMismatch,
}

/// Terminal state of one pass through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The registered handler ran.
    Handled,
    /// Silently dropped (logged, no response).
    Dropped(DropReason),
    /// Rejected with a visible error response to the participant.
    Rejected(RejectionKind),
}

/// Validates and dispatches inbound messages for one agent process.
pub struct MessageProcessor {
    activities: Arc<MessagingActivities>,
    executor: Arc<DualModeExecutor>,
    responses: ResponseSender,
}

impl MessageProcessor {
    pub fn new(
        handlers: Arc<HandlerRegistry>,
        responder: Arc<dyn MessageResponder>,
        executor: Arc<DualModeExecutor>,
    ) -> Self {
        let activities = Arc::new(MessagingActivities::new(handlers, Arc::clone(&responder)));
        let responses = ResponseSender::new(responder, Arc::clone(&executor));
        Self {
            activities,
            executor,
            responses,
        }
    }

    /// Activity dispatcher to register with the engine worker, so the
    /// activity path of dispatch lands on the same registry and responder.
    pub fn activities(&self) -> Arc<MessagingActivities> {
        Arc::clone(&self.activities)
    }

    /// Run one inbound message through the pipeline.
    ///
    /// `hosting` is the engine-provided identity of the workflow instance the
    /// message arrived at.
    pub async fn process(
        &self,
        hosting: &WorkflowInfo,
        mut message: InboundMessage,
    ) -> MessagingResult<DispatchOutcome> {
        let request_id = message.ensure_request_id();

        // 1. Type filter: deliberate scope limitation of the current pipeline
        if message.payload.message_type != MessageType::Chat {
            debug!(
                message_type = %message.payload.message_type,
                request_id = %request_id,
                workflow_type = %hosting.workflow_type,
                "Dropping non-conversational message"
            );
            return Ok(DispatchOutcome::Dropped(DropReason::UnsupportedType(
                message.payload.message_type,
            )));
        }

        // 2. Tenant comes from the hosting workflow's own address
        let tenant_id = match extract_tenant_id(&hosting.workflow_id) {
            Ok(tenant) => tenant,
            Err(err) => {
                // No safe way to know whom to notify; log and abort
                error!(
                    workflow_id = %hosting.workflow_id,
                    request_id = %request_id,
                    error = %err,
                    "Cannot decode tenant from hosting workflow address"
                );
                return Ok(DispatchOutcome::Dropped(DropReason::UndecodableAddress));
            }
        };

        // 3. Handler lookup by workflow type
        let record = match self.activities.handlers().resolve(&hosting.workflow_type) {
            Some(record) => record,
            None => {
                info!(
                    workflow_type = %hosting.workflow_type,
                    request_id = %request_id,
                    "No handler registered for workflow type"
                );
                self.reject(
                    hosting,
                    &message,
                    &request_id,
                    format!(
                        "No handler is registered for workflow type '{}'",
                        hosting.workflow_type
                    ),
                )
                .await?;
                return Ok(DispatchOutcome::Rejected(RejectionKind::HandlerNotFound));
            }
        };

        // 4. Tenant isolation: the single cross-tenant enforcement point
        if !validate_tenant_isolation(&tenant_id, record.tenant_id.as_deref(), record.system_scoped)
        {
            error!(
                workflow_type = %hosting.workflow_type,
                tenant_id = %tenant_id,
                handler_tenant = record.tenant_id.as_deref().unwrap_or("<none>"),
                request_id = %request_id,
                "Tenant isolation violation"
            );
            self.reject(
                hosting,
                &message,
                &request_id,
                format!("Tenant isolation violation for tenant '{tenant_id}'"),
            )
            .await?;
            return Ok(DispatchOutcome::Rejected(RejectionKind::TenantIsolation));
        }

        // 5. Identity match, when the message names a target agent
        if let Some(agent) = message.payload.agent.as_deref() {
            if !validate_identity_match(agent, &record.agent_name) {
                error!(
                    message_agent = agent,
                    handler_agent = %record.agent_name,
                    request_id = %request_id,
                    "Agent identity mismatch"
                );
                self.reject(
                    hosting,
                    &message,
                    &request_id,
                    format!(
                        "Message addressed to agent '{agent}' cannot be served by agent '{}'",
                        record.agent_name
                    ),
                )
                .await?;
                return Ok(DispatchOutcome::Rejected(RejectionKind::IdentityMismatch));
            }
        }

        // 6. Dispatch through the dual-mode executor
        let request = HandlerRequest {
            text: message.payload.text.clone(),
            participant_id: message.payload.participant_id.clone(),
            request_id: request_id.clone(),
            scope: message.payload.scope.clone(),
            hint: message.payload.hint.clone(),
            data: message.payload.data.clone(),
            tenant_id,
            workflow_id: hosting.workflow_id.clone(),
            workflow_type: hosting.workflow_type.clone(),
            authorization: message.payload.authorization.clone(),
            thread_id: message.payload.thread_id.clone(),
        };
        let payload = serde_json::to_value(&request)?;

        let activities = Arc::clone(&self.activities);
        let direct = async move {
            activities
                .process_chat_message(request)
                .await
                .map_err(ExecutionFailure::from)
        };

        self.executor
            .execute_via_activity::<(), _>(ops::PROCESS_CHAT_MESSAGE, payload, direct)
            .await?;

        debug!(
            workflow_type = %hosting.workflow_type,
            request_id = %request_id,
            "Message dispatched"
        );
        Ok(DispatchOutcome::Handled)
    }

    /// Send a visible rejection to the participant.
    async fn reject(
        &self,
        hosting: &WorkflowInfo,
        message: &InboundMessage,
        request_id: &str,
        text: String,
    ) -> MessagingResult<()> {
        let outgoing = OutgoingResponse::error(
            message.payload.participant_id.clone(),
            request_id,
            hosting.workflow_id.clone(),
            hosting.workflow_type.clone(),
        )
        .with_thread_id(message.payload.thread_id.clone())
        .with_text(text);

        self.responses.send(outgoing).await
    }
}
