//! # System Constants
//!
//! Core constants and enums that define the operational boundaries of the
//! agent addressing and routing system.
//!
//! The string values here form the cross-process contract: workflow addresses,
//! task queue names, and activity operation names all flow across process and
//! language boundaries, so the canonical strings live in one place and the
//! rest of the crate works with typed wrappers.

use serde::{Deserialize, Serialize};

/// Delimiter between segments of a workflow address (`tenant:agent:flow:postfix`).
pub const ADDRESS_DELIMITER: char = ':';

/// Agent segment of workflow types that belong to the shared platform
/// namespace. Task queue resolution rewrites this segment to the concrete
/// agent name so every agent gets its own worker pool for platform flows.
pub const PLATFORM_AGENT: &str = "Platform";

/// Canonical operation names for activity invocations.
///
/// These tag every dual-mode execution for diagnostics and are the names the
/// engine-side activity dispatchers match on.
pub mod ops {
    // Messaging operations
    pub const PROCESS_CHAT_MESSAGE: &str = "messaging.process_chat_message";
    pub const SEND_CHAT_RESPONSE: &str = "messaging.send_chat_response";

    // Cross-workflow (A2A) operations
    pub const A2A_SIGNAL: &str = "a2a.signal";
    pub const A2A_QUERY: &str = "a2a.query";
    pub const A2A_UPDATE: &str = "a2a.update";
}

/// Named built-in workflow kinds hosted under a shared workflow type.
///
/// Several built-ins can share one workflow type; the routing key resolver
/// appends the kind name (`EffectiveType-{name}`) so each gets a distinct
/// worker pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuiltinWorkflow {
    /// Conversation router hosted by every agent.
    Router,
    /// Scheduling convenience workflow.
    Scheduler,
}

impl BuiltinWorkflow {
    /// Name suffix used in routing keys.
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinWorkflow::Router => "Router",
            BuiltinWorkflow::Scheduler => "Scheduler",
        }
    }
}

impl std::fmt::Display for BuiltinWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
