//! # Dual-Mode Activity Executor
//!
//! One call-site API that routes work through one of two paths depending on
//! whether the caller is itself running inside deterministic workflow code.
//!
//! ## Overview
//!
//! Inside workflow context, direct network or file I/O would break the
//! engine's deterministic replay contract, so the call is delegated to the
//! engine's activity mechanism with its own timeout and retry policy. Outside
//! workflow context (plain request-handling code, or inside an activity body
//! already) the underlying service is invoked directly.
//!
//! Selection happens once per call by inspecting the injected
//! [`ExecutionContext`]; failures from either path propagate as a uniform
//! [`ExecutionError`] tagged with the operation name. Cancellation surfaces
//! as its own error kind and is never retried here; retry is the engine's
//! concern on the activity path.

use crate::execution::context::ExecutionContext;
use crate::execution::engine::{ActivityOptions, ActivityRunner};
use crate::execution::errors::{ExecutionFailure, ExecutionResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// Routes each call through the engine's activity mechanism or a direct
/// invocation, based on the ambient execution context.
pub struct DualModeExecutor {
    context: Arc<dyn ExecutionContext>,
    runner: Arc<dyn ActivityRunner>,
    options: ActivityOptions,
}

impl DualModeExecutor {
    pub fn new(
        context: Arc<dyn ExecutionContext>,
        runner: Arc<dyn ActivityRunner>,
        options: ActivityOptions,
    ) -> Self {
        Self {
            context,
            runner,
            options,
        }
    }

    /// Activity options applied to engine-mediated invocations.
    pub fn options(&self) -> &ActivityOptions {
        &self.options
    }

    /// Run one operation through the appropriate path.
    ///
    /// `activity` is the engine-mediated invocation, `direct` the plain one;
    /// exactly one of the two futures is polled. Both yield untagged
    /// [`ExecutionFailure`]s which are tagged with `operation` here.
    pub async fn execute<T, FA, FD>(
        &self,
        operation: &str,
        activity: FA,
        direct: FD,
    ) -> ExecutionResult<T>
    where
        FA: Future<Output = Result<T, ExecutionFailure>>,
        FD: Future<Output = Result<T, ExecutionFailure>>,
    {
        let in_workflow = self.context.in_workflow();
        debug!(
            operation = operation,
            path = if in_workflow { "activity" } else { "direct" },
            "Executing operation"
        );

        let result = if in_workflow {
            activity.await
        } else {
            direct.await
        };
        result.map_err(|failure| failure.tagged(operation))
    }

    /// Convenience for the common shape: the activity path submits `payload`
    /// to the engine under `operation` and deserializes the raw result, the
    /// direct path runs the supplied future.
    pub async fn execute_via_activity<T, FD>(
        &self,
        operation: &str,
        payload: Value,
        direct: FD,
    ) -> ExecutionResult<T>
    where
        T: DeserializeOwned,
        FD: Future<Output = Result<T, ExecutionFailure>>,
    {
        let activity = async {
            let raw = self
                .runner
                .run_activity(operation, &self.options, payload)
                .await
                .map_err(ExecutionFailure::from)?;
            serde_json::from_value(raw)
                .map_err(|e| ExecutionFailure::failed(format!("activity result decode: {e}")))
        };

        self.execute(operation, activity, direct).await
    }
}
