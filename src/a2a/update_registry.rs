//! # Update Dispatch with Validation
//!
//! Callee-side registry of update handlers and their pre-mutation validators.
//!
//! ## Overview
//!
//! An update may be gated by a validator registered under the same operation
//! name. Dispatch runs two explicit phases: pure validation that can only
//! reject or proceed, then a separate mutation step. The handler is not even
//! looked at until validation passes, so "no side effect on rejection" is
//! enforced structurally rather than by exception discipline.
//!
//! Operation names arrive as strings from the cross-process contract; they
//! are checked against the registered set at this boundary and unknown names
//! fail fast.

use crate::a2a::errors::{A2aError, A2aResult};
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Pre-mutation gate for one update operation. Pure: no state access, no I/O.
pub trait UpdateValidator: Send + Sync {
    /// `Err(reason)` rejects the update before any state change.
    fn validate(&self, args: &[Value]) -> Result<(), String>;
}

/// The mutation step of one update operation.
#[async_trait]
pub trait UpdateHandler: Send + Sync {
    async fn apply(&self, args: Vec<Value>) -> A2aResult<Value>;
}

#[derive(Clone)]
struct UpdateEntry {
    validator: Option<Arc<dyn UpdateValidator>>,
    handler: Arc<dyn UpdateHandler>,
}

/// Registry of update operations for one workflow type.
#[derive(Default)]
pub struct UpdateRegistry {
    entries: DashMap<String, UpdateEntry>,
}

impl UpdateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an unguarded update operation. Upsert.
    pub fn register(&self, name: impl Into<String>, handler: Arc<dyn UpdateHandler>) {
        self.insert(name.into(), None, handler);
    }

    /// Register an update operation gated by a validator. Upsert.
    pub fn register_with_validator(
        &self,
        name: impl Into<String>,
        validator: Arc<dyn UpdateValidator>,
        handler: Arc<dyn UpdateHandler>,
    ) {
        self.insert(name.into(), Some(validator), handler);
    }

    fn insert(
        &self,
        name: String,
        validator: Option<Arc<dyn UpdateValidator>>,
        handler: Arc<dyn UpdateHandler>,
    ) {
        let guarded = validator.is_some();
        self.entries.insert(name.clone(), UpdateEntry { validator, handler });
        info!(operation = %name, guarded = guarded, "Registered update operation");
    }

    /// Registered operation names, sorted.
    pub fn registered_operations(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Run one update: validate, then mutate.
    pub async fn dispatch(&self, name: &str, args: Vec<Value>) -> A2aResult<Value> {
        let entry = match self.entries.get(name) {
            Some(entry) => entry.value().clone(),
            None => {
                warn!(operation = name, "Rejected unknown update operation");
                return Err(A2aError::unknown_operation(name));
            }
        };

        // Phase 1: pure validation, may only reject or proceed
        if let Some(validator) = &entry.validator {
            if let Err(reason) = validator.validate(&args) {
                debug!(operation = name, reason = %reason, "Update rejected by validator");
                return Err(A2aError::update_rejected(name, reason));
            }
        }

        // Phase 2: mutation
        entry.handler.apply(args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Rejects requests whose first argument lacks a non-empty "id" field.
    struct RequiresId;

    impl UpdateValidator for RequiresId {
        fn validate(&self, args: &[Value]) -> Result<(), String> {
            let id = args
                .first()
                .and_then(|arg| arg.get("id"))
                .and_then(|id| id.as_str())
                .unwrap_or("");
            if id.trim().is_empty() {
                Err("id must not be empty".to_string())
            } else {
                Ok(())
            }
        }
    }

    /// Counts applications so tests can prove rejection means "never happened".
    struct CountingHandler {
        applied: AtomicUsize,
    }

    #[async_trait]
    impl UpdateHandler for CountingHandler {
        async fn apply(&self, args: Vec<Value>) -> A2aResult<Value> {
            self.applied.fetch_add(1, Ordering::SeqCst);
            Ok(json!({ "processed": args.first().cloned().unwrap_or(Value::Null) }))
        }
    }

    fn counting_registry() -> (UpdateRegistry, Arc<CountingHandler>) {
        let handler = Arc::new(CountingHandler {
            applied: AtomicUsize::new(0),
        });
        let registry = UpdateRegistry::new();
        registry.register_with_validator("ProcessDataSync", Arc::new(RequiresId), handler.clone());
        (registry, handler)
    }

    #[tokio::test]
    async fn test_rejection_happens_before_any_mutation() {
        let (registry, handler) = counting_registry();

        let err = registry
            .dispatch("ProcessDataSync", vec![json!({ "id": "" })])
            .await
            .unwrap_err();
        assert!(matches!(err, A2aError::UpdateRejected { .. }));
        assert_eq!(handler.applied.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_valid_update_applies() {
        let (registry, handler) = counting_registry();

        let result = registry
            .dispatch("ProcessDataSync", vec![json!({ "id": "order-7" })])
            .await
            .unwrap();
        assert_eq!(result["processed"]["id"], "order-7");
        assert_eq!(handler.applied.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_operation_fails_fast() {
        let (registry, handler) = counting_registry();

        let err = registry.dispatch("Nonexistent", vec![]).await.unwrap_err();
        assert!(matches!(err, A2aError::UnknownOperation { .. }));
        assert_eq!(handler.applied.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unguarded_registration_skips_validation() {
        let handler = Arc::new(CountingHandler {
            applied: AtomicUsize::new(0),
        });
        let registry = UpdateRegistry::new();
        registry.register("Touch", handler.clone());

        registry.dispatch("Touch", vec![]).await.unwrap();
        assert_eq!(handler.applied.load(Ordering::SeqCst), 1);
    }
}
