//! # Handler Registry & Tenant Validation
//!
//! Per-workflow-type handler metadata store plus the tenant and identity
//! validation rules the message pipeline enforces before any handler runs.
//!
//! ## Overview
//!
//! An agent process registers its chat/data/webhook handlers once per
//! workflow type at startup; registration is an upsert so a restarted process
//! can re-register its own handlers without error. Records are stored as
//! `Arc` snapshots and treated as immutable once read during a single
//! message's processing.
//!
//! [`validate_tenant_isolation`] is the single tenant-boundary enforcement
//! point in the system: every cross-tenant request passes through it before
//! any handler executes.

use crate::messaging::errors::MessagingResult;
use crate::messaging::message::HandlerRequest;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Handler for conversational messages.
#[async_trait]
pub trait ChatHandler: Send + Sync {
    /// Handle one chat request; a non-null return value is sent back to the
    /// participant as the reply.
    async fn handle(&self, request: HandlerRequest) -> MessagingResult<Value>;
}

/// Handler for structured data messages.
#[async_trait]
pub trait DataHandler: Send + Sync {
    async fn handle(&self, request: HandlerRequest) -> MessagingResult<Value>;
}

/// Handler for inbound webhook deliveries.
#[async_trait]
pub trait WebhookHandler: Send + Sync {
    async fn handle(&self, request: HandlerRequest) -> MessagingResult<Value>;
}

/// Registration record for one workflow type.
///
/// At most one active record per workflow type; re-registration overwrites.
#[derive(Clone)]
pub struct HandlerRegistration {
    /// Agent that owns the handlers.
    pub agent_name: String,
    /// Tenant the handlers serve; `None` only for system-scoped types.
    pub tenant_id: Option<String>,
    /// Whether instances of this type are shared across tenants.
    pub system_scoped: bool,
    pub chat: Option<Arc<dyn ChatHandler>>,
    pub data: Option<Arc<dyn DataHandler>>,
    pub webhook: Option<Arc<dyn WebhookHandler>>,
}

impl HandlerRegistration {
    /// Record with only a chat handler, the common case.
    pub fn chat_only(
        agent_name: impl Into<String>,
        tenant_id: Option<String>,
        system_scoped: bool,
        chat: Arc<dyn ChatHandler>,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            tenant_id,
            system_scoped,
            chat: Some(chat),
            data: None,
            webhook: None,
        }
    }
}

impl std::fmt::Debug for HandlerRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistration")
            .field("agent_name", &self.agent_name)
            .field("tenant_id", &self.tenant_id)
            .field("system_scoped", &self.system_scoped)
            .field("chat", &self.chat.is_some())
            .field("data", &self.data.is_some())
            .field("webhook", &self.webhook.is_some())
            .finish()
    }
}

/// Process-local registry of handler registrations keyed by workflow type.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    records: DashMap<String, Arc<HandlerRegistration>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert the registration for a workflow type. Never errors; a process
    /// restart legitimately re-registers its own handlers.
    pub fn register(&self, workflow_type: impl Into<String>, registration: HandlerRegistration) {
        let workflow_type = workflow_type.into();
        let replaced = self
            .records
            .insert(workflow_type.clone(), Arc::new(registration))
            .is_some();
        info!(
            workflow_type = %workflow_type,
            replaced = replaced,
            "Registered handlers for workflow type"
        );
    }

    /// Snapshot of the registration for a workflow type.
    pub fn resolve(&self, workflow_type: &str) -> Option<Arc<HandlerRegistration>> {
        self.records
            .get(workflow_type)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Workflow types with an active registration, sorted.
    pub fn registered_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.records.iter().map(|e| e.key().clone()).collect();
        types.sort();
        types
    }

    /// Remove every registration. Test/reset use only.
    pub fn clear(&self) {
        self.records.clear();
    }
}

/// Tenant-boundary check: always passes for system-scoped types, otherwise
/// requires exact tenant equality with the registration record.
pub fn validate_tenant_isolation(
    candidate_tenant: &str,
    record_tenant: Option<&str>,
    system_scoped: bool,
) -> bool {
    if system_scoped {
        return true;
    }
    matches!(record_tenant, Some(tenant) if tenant == candidate_tenant)
}

/// Identity check guarding against a message addressed to agent A being
/// served by agent B's worker pool (possible when routing keys collide).
/// Whitespace-trimmed, case-sensitive equality.
pub fn validate_identity_match(message_agent: &str, record_agent: &str) -> bool {
    message_agent.trim() == record_agent.trim()
}
