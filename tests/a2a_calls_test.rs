//! Cross-workflow call tests against the in-memory engine: signal, query,
//! update with validator gating, and both executor paths.

mod common;

use agent_core::a2a::call_service::AgentCallService;
use agent_core::a2a::errors::A2aError;
use agent_core::a2a::update_registry::{UpdateHandler, UpdateRegistry, UpdateValidator};
use agent_core::a2a::A2aResult;
use async_trait::async_trait;
use common::{direct_executor, workflow_executor, DispatchingRunner, InMemoryEngine, UnusedRunner};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const TARGET: &str = "acme:Billing:Invoices:main";

fn direct_service(engine: Arc<InMemoryEngine>) -> AgentCallService {
    AgentCallService::new(engine, direct_executor(Arc::new(UnusedRunner)))
}

/// Rejects payloads whose first argument lacks a non-empty "order_id" field.
struct RequiresOrderId;

impl UpdateValidator for RequiresOrderId {
    fn validate(&self, args: &[Value]) -> Result<(), String> {
        let order_id = args
            .first()
            .and_then(|arg| arg.get("order_id"))
            .and_then(|id| id.as_str())
            .unwrap_or("");
        if order_id.trim().is_empty() {
            Err("order_id must not be empty".to_string())
        } else {
            Ok(())
        }
    }
}

struct CountingUpdateHandler {
    applied: AtomicUsize,
}

#[async_trait]
impl UpdateHandler for CountingUpdateHandler {
    async fn apply(&self, args: Vec<Value>) -> A2aResult<Value> {
        self.applied.fetch_add(1, Ordering::SeqCst);
        Ok(json!({ "accepted": args.first().cloned().unwrap_or(Value::Null) }))
    }
}

fn guarded_updates() -> (Arc<UpdateRegistry>, Arc<CountingUpdateHandler>) {
    let handler = Arc::new(CountingUpdateHandler {
        applied: AtomicUsize::new(0),
    });
    let registry = Arc::new(UpdateRegistry::new());
    registry.register_with_validator("SubmitOrder", Arc::new(RequiresOrderId), handler.clone());
    (registry, handler)
}

#[tokio::test]
async fn test_signal_reaches_target_instance() {
    let engine = InMemoryEngine::new();
    engine.spawn_instance(TARGET);
    let service = direct_service(Arc::clone(&engine));

    service
        .send_signal(TARGET, "Notify", vec![json!({ "event": "shipped" })])
        .await
        .unwrap();

    let signals = engine.signals();
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].0, TARGET);
    assert_eq!(signals[0].1, "Notify");
}

#[tokio::test]
async fn test_malformed_target_fails_before_submission() {
    let engine = InMemoryEngine::new();
    let service = direct_service(Arc::clone(&engine));

    let err = service
        .send_signal("no-colons", "Notify", vec![])
        .await
        .unwrap_err();

    assert!(matches!(err, A2aError::InvalidTarget { .. }));
    assert!(engine.signals().is_empty());
}

#[tokio::test]
async fn test_unknown_target_surfaces_not_found() {
    let engine = InMemoryEngine::new();
    let service = direct_service(engine);

    let err = service
        .send_signal("acme:Billing:Invoices:gone", "Notify", vec![])
        .await
        .unwrap_err();

    match err {
        A2aError::TargetNotFound { workflow_id } => {
            assert_eq!(workflow_id, "acme:Billing:Invoices:gone");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_query_returns_target_state() {
    let engine = InMemoryEngine::new();
    engine.spawn_instance(TARGET);
    let service = direct_service(engine);

    let result: Value = service
        .query(TARGET, "GetStatus", vec![json!("open")])
        .await
        .unwrap();

    assert_eq!(result["query"], "GetStatus");
    assert_eq!(result["args"][0], "open");
}

#[tokio::test]
async fn test_rejected_update_has_no_side_effect() {
    let engine = InMemoryEngine::new();
    let (updates, handler) = guarded_updates();
    engine.spawn_instance_with_updates(TARGET, updates);
    let service = direct_service(engine);

    let err = service
        .update::<Value>(TARGET, "SubmitOrder", vec![json!({ "order_id": "" })])
        .await
        .unwrap_err();

    match err {
        A2aError::UpdateRejected { reason, .. } => {
            assert!(reason.contains("order_id"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(handler.applied.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_valid_update_applies_and_returns_result() {
    let engine = InMemoryEngine::new();
    let (updates, handler) = guarded_updates();
    engine.spawn_instance_with_updates(TARGET, updates);
    let service = direct_service(engine);

    let result: Value = service
        .update(TARGET, "SubmitOrder", vec![json!({ "order_id": "ord-42" })])
        .await
        .unwrap();

    assert_eq!(result["accepted"]["order_id"], "ord-42");
    assert_eq!(handler.applied.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unknown_update_operation_fails() {
    let engine = InMemoryEngine::new();
    let (updates, handler) = guarded_updates();
    engine.spawn_instance_with_updates(TARGET, updates);
    let service = direct_service(engine);

    let err = service
        .update::<Value>(TARGET, "Nonexistent", vec![])
        .await
        .unwrap_err();

    assert!(matches!(err, A2aError::CallFailed { .. }));
    assert_eq!(handler.applied.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_workflow_context_routes_calls_through_activities() {
    let engine = InMemoryEngine::new();
    engine.spawn_instance(TARGET);

    let runner = DispatchingRunner::new();
    let service = AgentCallService::new(engine.clone(), workflow_executor(runner.clone()));
    runner.wire_a2a(service.activities());

    service
        .send_signal(TARGET, "Notify", vec![json!({ "event": "paid" })])
        .await
        .unwrap();

    let signals = engine.signals();
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].1, "Notify");

    let result: Value = service.query(TARGET, "GetStatus", vec![]).await.unwrap();
    assert_eq!(result["query"], "GetStatus");
}

#[tokio::test]
async fn test_update_rejection_survives_activity_path() {
    let engine = InMemoryEngine::new();
    let (updates, handler) = guarded_updates();
    engine.spawn_instance_with_updates(TARGET, updates);

    let runner = DispatchingRunner::new();
    let service = AgentCallService::new(engine.clone(), workflow_executor(runner.clone()));
    runner.wire_a2a(service.activities());

    let err = service
        .update::<Value>(TARGET, "SubmitOrder", vec![json!({ "order_id": " " })])
        .await
        .unwrap_err();

    assert!(matches!(err, A2aError::UpdateRejected { .. }));
    assert_eq!(handler.applied.load(Ordering::SeqCst), 0);
}
