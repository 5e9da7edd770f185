//! # Addressing and Routing
//!
//! Tenant-safe workflow addressing and task queue resolution.
//!
//! ## Overview
//!
//! Every workflow instance is addressed by a colon-delimited composite string
//! (`tenant:agent:flow[:postfix...]`) that encodes tenant, agent, and workflow
//! type in one opaque identifier. This module owns both directions of that
//! contract:
//!
//! - [`identity`] encodes and decodes workflow addresses (pure, stateless).
//! - [`task_queue`] derives the dispatch key that selects which worker pool
//!   may claim work for a workflow type, enforcing tenant-exclusive pools for
//!   non-system-scoped workflows.
//!
//! ## Usage
//!
//! ```rust
//! use agent_core::routing::identity::{build_address, extract_tenant_id, extract_workflow_type};
//! use agent_core::routing::task_queue::{TaskQueue, TaskQueueSpec};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let address = build_address("Sales:Support", "acme", &["abc123"])?;
//! assert_eq!(extract_tenant_id(&address)?, "acme");
//! assert_eq!(extract_workflow_type(&address)?, "Sales:Support");
//!
//! let queue = TaskQueue::resolve(&TaskQueueSpec {
//!     workflow_type: "Sales:Support",
//!     system_scoped: false,
//!     tenant_id: Some("acme"),
//!     agent_name: None,
//!     builtin_name: None,
//! })?;
//! assert_eq!(queue, "acme:Sales:Support");
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod identity;
pub mod task_queue;

pub use errors::{RoutingError, RoutingResult};
pub use identity::{
    build_address, build_agent_address, extract_tenant_id, extract_workflow_type, WorkflowAddress,
};
pub use task_queue::{TaskQueue, TaskQueueSpec};
