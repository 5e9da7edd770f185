//! # Task Queue Resolution
//!
//! Derives the dispatch key (task queue name) that selects which pool of
//! workers may claim work for a workflow type.
//!
//! ## Overview
//!
//! System-scoped workflow types are shared across tenants and dispatch on the
//! effective workflow type alone. Everything else is tenant-exclusive: the
//! routing key is `tenant:workflow_type`, and resolution fails hard when no
//! tenant is supplied. That failure is a security invariant, not a soft
//! default: a tenant-scoped workflow must never land on a shared queue.
//!
//! Two rewrites produce the effective type before scoping:
//!
//! - A workflow type under the shared platform namespace
//!   ([`crate::constants::PLATFORM_AGENT`]) has its agent segment substituted
//!   with the concrete agent name.
//! - A named built-in workflow kind appends its name
//!   (`EffectiveType-{builtin}`) to disambiguate multiple built-ins sharing
//!   one type.

use crate::constants::{ADDRESS_DELIMITER, PLATFORM_AGENT};
use crate::routing::errors::{RoutingError, RoutingResult};

/// Inputs to task queue resolution.
#[derive(Debug, Clone, Copy)]
pub struct TaskQueueSpec<'a> {
    /// Workflow type, bare (`Support`) or agent-qualified (`Sales:Support`).
    pub workflow_type: &'a str,
    /// Whether instances of this type are shared across all tenants.
    pub system_scoped: bool,
    /// Tenant id; required unless `system_scoped`.
    pub tenant_id: Option<&'a str>,
    /// Concrete agent name, used to rewrite platform-namespace types.
    pub agent_name: Option<&'a str>,
    /// Built-in workflow kind name appended to the effective type.
    pub builtin_name: Option<&'a str>,
}

/// Task queue name resolver. Deterministic and pure given its inputs.
pub struct TaskQueue;

impl TaskQueue {
    /// Resolve the routing key for a workflow type.
    pub fn resolve(spec: &TaskQueueSpec<'_>) -> RoutingResult<String> {
        let workflow_type = spec.workflow_type.trim();
        if workflow_type.is_empty() {
            return Err(RoutingError::invalid_argument(
                "workflow type cannot be empty",
            ));
        }

        let effective = Self::effective_type(workflow_type, spec.agent_name, spec.builtin_name);

        if spec.system_scoped {
            return Ok(effective);
        }

        match spec.tenant_id.map(str::trim) {
            Some(tenant) if !tenant.is_empty() => {
                Ok(format!("{tenant}{ADDRESS_DELIMITER}{effective}"))
            }
            _ => Err(RoutingError::tenant_required(workflow_type)),
        }
    }

    /// Apply the platform-namespace and built-in rewrites.
    fn effective_type(
        workflow_type: &str,
        agent_name: Option<&str>,
        builtin_name: Option<&str>,
    ) -> String {
        let mut effective = match (workflow_type.split_once(ADDRESS_DELIMITER), agent_name) {
            (Some((agent, flow)), Some(concrete))
                if agent.trim() == PLATFORM_AGENT && !concrete.trim().is_empty() =>
            {
                format!("{}{}{}", concrete.trim(), ADDRESS_DELIMITER, flow.trim())
            }
            _ => workflow_type.to_string(),
        };

        if let Some(builtin) = builtin_name.map(str::trim) {
            if !builtin.is_empty() {
                effective = format!("{effective}-{builtin}");
            }
        }
        effective
    }
}
