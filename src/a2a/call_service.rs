//! # Cross-Workflow Call Service
//!
//! Signal, query, and update primitives addressed by workflow address,
//! usable from workflow code and plain services alike.
//!
//! ## Overview
//!
//! Every call validates its target address locally, then routes through the
//! dual-mode executor: inside workflow context the call becomes an engine
//! activity (so replay stays deterministic), outside it goes straight to the
//! engine client. [`A2aActivities`] holds the activity bodies an agent
//! process registers with its engine worker; both paths end at the same
//! [`WorkflowClient`].
//!
//! Delivery semantics: signals are at-most-once submissions from the caller's
//! perspective but may reach the callee more than once under at-least-once
//! delivery, so signal handlers must be idempotent. Queries are read-only and
//! freely retryable. Update rejections are pre-mutation and surface as
//! [`A2aError::UpdateRejected`].

use crate::a2a::errors::{A2aError, A2aResult};
use crate::constants::ops;
use crate::execution::engine::WorkflowClient;
use crate::execution::errors::{EngineError, EngineResult, ExecutionFailure};
use crate::execution::executor::DualModeExecutor;
use crate::routing::identity::WorkflowAddress;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// One cross-workflow call as it crosses the activity boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct A2aCallRequest {
    pub target_workflow_id: String,
    pub operation: String,
    pub args: Vec<Value>,
}

/// Cross-workflow call API addressed by workflow address.
pub struct AgentCallService {
    client: Arc<dyn WorkflowClient>,
    executor: Arc<DualModeExecutor>,
}

impl AgentCallService {
    pub fn new(client: Arc<dyn WorkflowClient>, executor: Arc<DualModeExecutor>) -> Self {
        Self { client, executor }
    }

    /// Activity dispatcher to register with the engine worker.
    pub fn activities(&self) -> A2aActivities {
        A2aActivities {
            client: Arc::clone(&self.client),
        }
    }

    /// Fire-and-forget notification; does not block on handler completion.
    pub async fn send_signal(&self, target: &str, name: &str, args: Vec<Value>) -> A2aResult<()> {
        let request = self.call_request(target, name, args)?;
        let payload = serde_json::to_value(&request)?;

        let client = Arc::clone(&self.client);
        let direct = async move {
            client
                .signal(&request.target_workflow_id, &request.operation, request.args)
                .await
                .map_err(ExecutionFailure::from)
        };

        self.executor
            .execute_via_activity::<(), _>(ops::A2A_SIGNAL, payload, direct)
            .await
            .map_err(A2aError::from)
    }

    /// Read-only request against the target's state; must not mutate, safe to
    /// retry freely.
    pub async fn query<T: DeserializeOwned>(
        &self,
        target: &str,
        name: &str,
        args: Vec<Value>,
    ) -> A2aResult<T> {
        let request = self.call_request(target, name, args)?;
        let payload = serde_json::to_value(&request)?;

        let client = Arc::clone(&self.client);
        let direct = async move {
            client
                .query(&request.target_workflow_id, &request.operation, request.args)
                .await
                .map_err(ExecutionFailure::from)
        };

        let raw: Value = self
            .executor
            .execute_via_activity(ops::A2A_QUERY, payload, direct)
            .await
            .map_err(A2aError::from)?;
        Ok(serde_json::from_value(raw)?)
    }

    /// Synchronous state mutation, optionally gated by a callee-side
    /// validator. Rejections surface as [`A2aError::UpdateRejected`] and
    /// guarantee no side effect occurred.
    pub async fn update<T: DeserializeOwned>(
        &self,
        target: &str,
        name: &str,
        args: Vec<Value>,
    ) -> A2aResult<T> {
        let request = self.call_request(target, name, args)?;
        let payload = serde_json::to_value(&request)?;

        let client = Arc::clone(&self.client);
        let direct = async move {
            client
                .update(&request.target_workflow_id, &request.operation, request.args)
                .await
                .map_err(ExecutionFailure::from)
        };

        let raw: Value = self
            .executor
            .execute_via_activity(ops::A2A_UPDATE, payload, direct)
            .await
            .map_err(A2aError::from)?;
        Ok(serde_json::from_value(raw)?)
    }

    /// Validate the target address and assemble the call request. Malformed
    /// targets fail fast here and never reach the engine.
    fn call_request(&self, target: &str, name: &str, args: Vec<Value>) -> A2aResult<A2aCallRequest> {
        let address = WorkflowAddress::parse(target)
            .map_err(|err| A2aError::invalid_target(target, err.to_string()))?;
        debug!(
            target = %address,
            operation = name,
            "Prepared cross-workflow call"
        );
        Ok(A2aCallRequest {
            target_workflow_id: address.to_string(),
            operation: name.to_string(),
            args,
        })
    }
}

/// Activity bodies for cross-workflow calls. The engine worker registers
/// [`A2aActivities::dispatch`] so the activity path lands on the same client
/// as direct calls.
#[derive(Clone)]
pub struct A2aActivities {
    client: Arc<dyn WorkflowClient>,
}

impl A2aActivities {
    pub fn new(client: Arc<dyn WorkflowClient>) -> Self {
        Self { client }
    }

    /// Dispatch one activity invocation by operation name. This is the
    /// engine-facing boundary, so failures stay in engine terms.
    pub async fn dispatch(&self, operation: &str, payload: Value) -> EngineResult<Value> {
        let request: A2aCallRequest = serde_json::from_value(payload)
            .map_err(|e| EngineError::transport(format!("malformed call payload: {e}")))?;

        match operation {
            ops::A2A_SIGNAL => {
                self.client
                    .signal(&request.target_workflow_id, &request.operation, request.args)
                    .await?;
                Ok(Value::Null)
            }
            ops::A2A_QUERY => {
                self.client
                    .query(&request.target_workflow_id, &request.operation, request.args)
                    .await
            }
            ops::A2A_UPDATE => {
                self.client
                    .update(&request.target_workflow_id, &request.operation, request.args)
                    .await
            }
            other => Err(EngineError::transport(format!(
                "unknown call operation '{other}'"
            ))),
        }
    }
}
