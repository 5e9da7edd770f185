//! Shared fixtures for integration tests: an in-memory workflow engine and a
//! recording platform responder, so the full pipeline runs without external
//! services.

#![allow(dead_code)]

use agent_core::a2a::call_service::A2aActivities;
use agent_core::a2a::update_registry::UpdateRegistry;
use agent_core::a2a::A2aError;
use agent_core::execution::context::FixedExecutionContext;
use agent_core::execution::engine::{ActivityOptions, ActivityRunner, WorkflowClient};
use agent_core::execution::errors::{EngineError, EngineResult};
use agent_core::execution::executor::DualModeExecutor;
use agent_core::messaging::activities::MessagingActivities;
use agent_core::messaging::errors::MessagingResult;
use agent_core::messaging::message::{
    HandlerRequest, InboundMessage, MessagePayload, MessageType,
};
use agent_core::messaging::response::{MessageResponder, OutgoingResponse};
use agent_core::registry::handler_registry::ChatHandler;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

/// Platform responder that records every delivered response.
#[derive(Default)]
pub struct RecordingResponder {
    delivered: Mutex<Vec<OutgoingResponse>>,
}

impl RecordingResponder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn delivered(&self) -> Vec<OutgoingResponse> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageResponder for RecordingResponder {
    async fn deliver(&self, response: &OutgoingResponse) -> MessagingResult<()> {
        self.delivered.lock().unwrap().push(response.clone());
        Ok(())
    }
}

/// Chat handler that counts invocations and replies with a fixed value.
pub struct CountingChatHandler {
    pub calls: AtomicUsize,
    reply: Value,
}

impl CountingChatHandler {
    pub fn replying(reply: Value) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            reply,
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatHandler for CountingChatHandler {
    async fn handle(&self, _request: HandlerRequest) -> MessagingResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

/// In-memory workflow engine: known instances, recorded signals, echo queries,
/// and updates dispatched through a per-instance [`UpdateRegistry`].
#[derive(Default)]
pub struct InMemoryEngine {
    instances: DashMap<String, ()>,
    updates: DashMap<String, Arc<UpdateRegistry>>,
    signals: Mutex<Vec<(String, String, Vec<Value>)>>,
}

impl InMemoryEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn spawn_instance(&self, workflow_id: &str) {
        self.instances.insert(workflow_id.to_string(), ());
    }

    pub fn spawn_instance_with_updates(&self, workflow_id: &str, updates: Arc<UpdateRegistry>) {
        self.spawn_instance(workflow_id);
        self.updates.insert(workflow_id.to_string(), updates);
    }

    pub fn signals(&self) -> Vec<(String, String, Vec<Value>)> {
        self.signals.lock().unwrap().clone()
    }

    fn require_instance(&self, workflow_id: &str) -> EngineResult<()> {
        if self.instances.contains_key(workflow_id) {
            Ok(())
        } else {
            Err(EngineError::target_not_found(workflow_id))
        }
    }
}

#[async_trait]
impl WorkflowClient for InMemoryEngine {
    async fn signal(&self, workflow_id: &str, name: &str, args: Vec<Value>) -> EngineResult<()> {
        self.require_instance(workflow_id)?;
        self.signals
            .lock()
            .unwrap()
            .push((workflow_id.to_string(), name.to_string(), args));
        Ok(())
    }

    async fn query(&self, workflow_id: &str, name: &str, args: Vec<Value>) -> EngineResult<Value> {
        self.require_instance(workflow_id)?;
        Ok(json!({ "query": name, "args": args }))
    }

    async fn update(&self, workflow_id: &str, name: &str, args: Vec<Value>) -> EngineResult<Value> {
        self.require_instance(workflow_id)?;
        let registry = self
            .updates
            .get(workflow_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| EngineError::transport("no update operations registered"))?;

        registry.dispatch(name, args).await.map_err(|err| match err {
            A2aError::UpdateRejected { reason, .. } => EngineError::update_rejected(reason),
            other => EngineError::transport(other.to_string()),
        })
    }
}

/// Activity runner that lands invocations on the same dispatchers an agent
/// process would register with its engine worker. Wired after construction
/// because the dispatchers themselves need an executor.
#[derive(Default)]
pub struct DispatchingRunner {
    messaging: OnceLock<Arc<MessagingActivities>>,
    a2a: OnceLock<A2aActivities>,
}

impl DispatchingRunner {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn wire_messaging(&self, activities: Arc<MessagingActivities>) {
        let _ = self.messaging.set(activities);
    }

    pub fn wire_a2a(&self, activities: A2aActivities) {
        let _ = self.a2a.set(activities);
    }
}

#[async_trait]
impl ActivityRunner for DispatchingRunner {
    async fn run_activity(
        &self,
        operation: &str,
        _options: &ActivityOptions,
        payload: Value,
    ) -> EngineResult<Value> {
        if operation.starts_with("messaging.") {
            let activities = self
                .messaging
                .get()
                .ok_or_else(|| EngineError::transport("messaging activities not wired"))?;
            activities
                .dispatch(operation, payload)
                .await
                .map_err(|err| EngineError::transport(err.to_string()))
        } else if operation.starts_with("a2a.") {
            let activities = self
                .a2a
                .get()
                .ok_or_else(|| EngineError::transport("a2a activities not wired"))?;
            activities.dispatch(operation, payload).await
        } else {
            Err(EngineError::transport(format!(
                "unknown activity operation '{operation}'"
            )))
        }
    }
}

/// Runner for direct-context tests, where the activity path must stay cold.
pub struct UnusedRunner;

#[async_trait]
impl ActivityRunner for UnusedRunner {
    async fn run_activity(
        &self,
        operation: &str,
        _options: &ActivityOptions,
        _payload: Value,
    ) -> EngineResult<Value> {
        Err(EngineError::transport(format!(
            "activity path must not be used (operation '{operation}')"
        )))
    }
}

/// Executor for plain request-handling code (direct path).
pub fn direct_executor(runner: Arc<dyn ActivityRunner>) -> Arc<DualModeExecutor> {
    Arc::new(DualModeExecutor::new(
        Arc::new(FixedExecutionContext::direct()),
        runner,
        ActivityOptions::default(),
    ))
}

/// Executor for deterministic workflow code (activity path).
pub fn workflow_executor(runner: Arc<dyn ActivityRunner>) -> Arc<DualModeExecutor> {
    Arc::new(DualModeExecutor::new(
        Arc::new(FixedExecutionContext::workflow()),
        runner,
        ActivityOptions::default(),
    ))
}

/// A conversational message addressed (optionally) to a named agent.
pub fn chat_message(agent: Option<&str>) -> InboundMessage {
    InboundMessage {
        payload: MessagePayload {
            agent: agent.map(String::from),
            thread_id: Some("thread-1".to_string()),
            participant_id: "user-1".to_string(),
            text: Some("Hello there".to_string()),
            request_id: None,
            hint: None,
            scope: None,
            data: None,
            message_type: MessageType::Chat,
            authorization: None,
            history: vec![],
        },
        source_agent: None,
        source_workflow_id: None,
        source_workflow_type: None,
    }
}
