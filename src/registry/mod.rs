//! # Registry Infrastructure
//!
//! Process-local registries for live instances and message handlers.
//!
//! ## Overview
//!
//! Two registry families serve the addressing core:
//!
//! - [`InstanceRegistry`]: thread-safe name-to-handle maps for agents (unique
//!   names, duplicates rejected) and workflows (restart re-registration
//!   overwrites).
//! - [`HandlerRegistry`]: per-workflow-type handler metadata consulted by the
//!   inbound message pipeline, together with the tenant-isolation and
//!   identity-match validators.
//!
//! All registries are injectable values rather than hidden static state, so
//! tests instantiate isolated registries per case. They are the only mutable
//! shared state in this core; every mutation goes through their own
//! internally-synchronized operations.

pub mod errors;
pub mod handler_registry;
pub mod instance_registry;

pub use errors::{RegistryError, RegistryResult};
pub use handler_registry::{
    validate_identity_match, validate_tenant_isolation, ChatHandler, DataHandler,
    HandlerRegistration, HandlerRegistry, WebhookHandler,
};
pub use instance_registry::{InstanceRegistry, RegistrationPolicy};
