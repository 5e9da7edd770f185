//! # Agent-to-Agent Call Layer
//!
//! Cross-workflow signal/query/update calls addressed by workflow address.
//!
//! ## Overview
//!
//! One workflow instance invokes operations on another by constructing a
//! target address and going through the [`AgentCallService`]; calls are
//! mediated by the dual-mode executor so workflow code never performs direct
//! I/O. The callee side registers update operations (optionally gated by a
//! pre-mutation validator) in an [`UpdateRegistry`].

pub mod call_service;
pub mod errors;
pub mod update_registry;

pub use call_service::{A2aActivities, A2aCallRequest, AgentCallService};
pub use errors::{A2aError, A2aResult};
pub use update_registry::{UpdateHandler, UpdateRegistry, UpdateValidator};
