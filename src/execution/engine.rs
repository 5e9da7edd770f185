//! # Workflow Engine Interfaces
//!
//! The surface this crate consumes from the durable workflow engine, kept as
//! traits so the core is testable without a live engine and portable across
//! engine SDKs.
//!
//! The engine is an external collaborator: it owns persistence, replay, and
//! at-least-once delivery. This crate only assumes the primitives below.

use crate::execution::errors::EngineResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Engine-provided identity of the currently executing workflow instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowInfo {
    /// Full workflow address (`tenant:agent:flow[:postfix...]`).
    pub workflow_id: String,
    /// Workflow type (`Agent:Flow`).
    pub workflow_type: String,
}

impl WorkflowInfo {
    pub fn new(workflow_id: impl Into<String>, workflow_type: impl Into<String>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            workflow_type: workflow_type.into(),
        }
    }
}

/// Retry policy for activity invocations.
///
/// Defaults mirror the messaging and document activity options: 3 attempts
/// with exponential backoff and a capped interval. Configurable via
/// [`crate::config::ActivityConfig`], not hard constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_interval: Duration,
    pub backoff_coefficient: f64,
    pub max_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_interval: Duration::from_secs(1),
            backoff_coefficient: 2.0,
            max_interval: Duration::from_secs(30),
        }
    }
}

/// Options for one activity invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityOptions {
    pub start_to_close_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for ActivityOptions {
    fn default() -> Self {
        Self {
            start_to_close_timeout: Duration::from_secs(60),
            retry: RetryPolicy::default(),
        }
    }
}

/// Cross-workflow call primitives, addressed by workflow identifier.
///
/// Signals are at-most-once submissions from the caller's perspective; the
/// callee may observe them zero or more times under at-least-once delivery,
/// so signal handlers must be idempotent. Queries are read-only. Updates are
/// synchronous and may be rejected by a callee-side validator before any
/// state mutation.
#[async_trait]
pub trait WorkflowClient: Send + Sync {
    async fn signal(&self, workflow_id: &str, name: &str, args: Vec<Value>) -> EngineResult<()>;

    async fn query(&self, workflow_id: &str, name: &str, args: Vec<Value>) -> EngineResult<Value>;

    async fn update(&self, workflow_id: &str, name: &str, args: Vec<Value>) -> EngineResult<Value>;
}

/// The engine's activity primitive: an engine-tracked unit of potentially
/// non-deterministic work with its own timeout and retry policy.
#[async_trait]
pub trait ActivityRunner: Send + Sync {
    async fn run_activity(
        &self,
        operation: &str,
        options: &ActivityOptions,
        payload: Value,
    ) -> EngineResult<Value>;
}
