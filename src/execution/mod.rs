//! # Execution Layer
//!
//! Dual-mode execution on top of the external durable workflow engine.
//!
//! ## Overview
//!
//! The engine enforces deterministic, single-threaded replay inside workflow
//! code; all non-deterministic work (network I/O, clock reads) must go
//! through its activity primitive. This module presents one call-site API,
//! the [`DualModeExecutor`], that picks the activity path inside workflow
//! context and a direct invocation everywhere else, plus the traits this
//! crate consumes from the engine ([`WorkflowClient`], [`ActivityRunner`],
//! [`ExecutionContext`]).

pub mod context;
pub mod engine;
pub mod errors;
pub mod executor;

pub use context::{ExecutionContext, FixedExecutionContext};
pub use engine::{ActivityOptions, ActivityRunner, RetryPolicy, WorkflowClient, WorkflowInfo};
pub use errors::{EngineError, EngineResult, ExecutionError, ExecutionFailure, ExecutionResult};
pub use executor::DualModeExecutor;
