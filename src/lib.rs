#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Agent Core
//!
//! Multi-tenant addressing and message-routing layer for independently
//! deployed agent processes running on a durable, replay-based workflow
//! engine.
//!
//! ## Overview
//!
//! The engine (an external collaborator) guarantees at-least-once delivery,
//! deterministic replay, and durable state for long-running workflow
//! instances. This crate adds what agents need on top of it:
//!
//! - A tenant-safe addressing scheme that encodes tenant, agent, and
//!   workflow-type identity into one opaque identifier and derives routing
//!   keys (task queues) from it.
//! - An inbound-message validation and dispatch pipeline that authenticates
//!   and routes messages arriving at a workflow instance to an
//!   application-supplied handler.
//! - A cross-workflow call layer (signal / query / update) addressed by
//!   workflow address, with validation-before-execution semantics for
//!   updates.
//! - A dual-mode execution strategy that runs the same business logic either
//!   through the engine's activity primitive (inside deterministic workflow
//!   code) or directly (everywhere else).
//!
//! ## Module Organization
//!
//! - [`routing`] - Workflow address codec and task queue resolution
//! - [`registry`] - Instance and handler registries, tenant validation
//! - [`messaging`] - Inbound message pipeline and outbound responses
//! - [`a2a`] - Cross-workflow signal/query/update calls
//! - [`execution`] - Dual-mode executor and engine interfaces
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging bootstrap
//! - [`error`] - Crate-level error handling
//!
//! ## Quick Start
//!
//! ```rust
//! use agent_core::registry::{HandlerRegistry, InstanceRegistry};
//! use agent_core::routing::identity::build_agent_address;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Addressing
//! let target = build_agent_address("Sales", "Support", "acme", &["abc123"])?;
//! assert_eq!(target, "acme:Sales:Support:abc123");
//!
//! // Isolated, injectable registries
//! let agents: InstanceRegistry<String> = InstanceRegistry::rejecting_duplicates("agent");
//! agents.register("Sales", "handle".to_string())?;
//! let handlers = HandlerRegistry::new();
//! assert!(handlers.resolve("Sales:Support").is_none());
//! # Ok(())
//! # }
//! ```

pub mod a2a;
pub mod config;
pub mod constants;
pub mod error;
pub mod execution;
pub mod logging;
pub mod messaging;
pub mod registry;
pub mod routing;

pub use a2a::{A2aError, AgentCallService, UpdateRegistry};
pub use config::{ActivityConfig, AgentCoreConfig};
pub use constants::{BuiltinWorkflow, ADDRESS_DELIMITER, PLATFORM_AGENT};
pub use error::{AgentCoreError, Result};
pub use execution::{
    ActivityOptions, DualModeExecutor, EngineError, ExecutionContext, ExecutionError,
    FixedExecutionContext, RetryPolicy, WorkflowClient, WorkflowInfo,
};
pub use messaging::{
    DispatchOutcome, InboundMessage, MessagePayload, MessageProcessor, MessageResponder,
    MessageType, MessagingError,
};
pub use registry::{HandlerRegistration, HandlerRegistry, InstanceRegistry, RegistryError};
pub use routing::{RoutingError, TaskQueue, TaskQueueSpec, WorkflowAddress};
