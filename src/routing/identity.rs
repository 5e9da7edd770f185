//! # Workflow Identity Codec
//!
//! Encodes and decodes the composite workflow address string
//! (`tenant:agent:flow[:postfix...]`).
//!
//! ## Overview
//!
//! The address is the cross-process contract for naming a workflow instance:
//! segment 0 is always the tenant id, segment 1 (or segments 1 and 2 joined)
//! is the workflow type, and any trailing segments are a free-form postfix
//! such as a unique instance suffix. Decoding is a pure function with no side
//! effects; the same address always yields the same `(tenant, workflow_type)`
//! pair.
//!
//! Tenant ids must never contain the delimiter; workflow types carry at most
//! one embedded delimiter (`Agent:Flow`). Both are rejected at build time so
//! decode never has to disambiguate.

use crate::constants::ADDRESS_DELIMITER;
use crate::routing::errors::{RoutingError, RoutingResult};

/// Minimum number of colon-delimited segments in a valid address.
const MIN_SEGMENTS: usize = 2;

/// Extract the tenant id (segment 0) from a workflow address.
pub fn extract_tenant_id(address: &str) -> RoutingResult<String> {
    let segments = split_address(address)?;
    Ok(segments[0].to_string())
}

/// Extract the workflow type from a workflow address.
///
/// With exactly two segments the type is segment 1 alone; with three or more
/// the type is segments 1 and 2 joined (`Agent:Flow`).
pub fn extract_workflow_type(address: &str) -> RoutingResult<String> {
    let segments = split_address(address)?;
    if segments.len() >= 3 {
        Ok(format!(
            "{}{}{}",
            segments[1], ADDRESS_DELIMITER, segments[2]
        ))
    } else {
        Ok(segments[1].to_string())
    }
}

/// Compose a workflow address from a workflow type and tenant id.
///
/// Empty or whitespace postfix parts are silently omitted; all parts are
/// trimmed. Fails with an invalid-argument error when the workflow type or
/// tenant id is empty, when the tenant id contains the delimiter, or when the
/// workflow type carries more than one embedded delimiter (which would break
/// the decode rules). A single-segment workflow type cannot be combined with
/// a postfix: the postfix segment would decode as part of the type.
pub fn build_address(
    workflow_type: &str,
    tenant_id: &str,
    postfix: &[&str],
) -> RoutingResult<String> {
    let workflow_type = workflow_type.trim();
    let tenant_id = tenant_id.trim();

    if workflow_type.is_empty() {
        return Err(RoutingError::invalid_argument(
            "workflow type cannot be empty",
        ));
    }
    if tenant_id.is_empty() {
        return Err(RoutingError::invalid_argument("tenant id cannot be empty"));
    }
    if tenant_id.contains(ADDRESS_DELIMITER) {
        return Err(RoutingError::invalid_argument(format!(
            "tenant id '{tenant_id}' must not contain '{ADDRESS_DELIMITER}'"
        )));
    }
    if workflow_type.matches(ADDRESS_DELIMITER).count() > 1 {
        return Err(RoutingError::invalid_argument(format!(
            "workflow type '{workflow_type}' has more than two segments"
        )));
    }

    let parts: Vec<&str> = postfix
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();
    if !parts.is_empty() && !workflow_type.contains(ADDRESS_DELIMITER) {
        return Err(RoutingError::invalid_argument(format!(
            "single-segment workflow type '{workflow_type}' cannot carry a postfix; \
             the postfix would decode as part of the type"
        )));
    }

    let mut address = format!("{tenant_id}{ADDRESS_DELIMITER}{workflow_type}");
    for part in parts {
        address.push(ADDRESS_DELIMITER);
        address.push_str(part);
    }
    Ok(address)
}

/// Compose a workflow address on behalf of a specific agent.
///
/// A two-part `Agent:Flow` workflow type is normalized down to its flow
/// segment before composing, so the agent segment is never duplicated when
/// the resolving agent's own name is prefixed.
pub fn build_agent_address(
    agent_name: &str,
    workflow_type: &str,
    tenant_id: &str,
    postfix: &[&str],
) -> RoutingResult<String> {
    let agent_name = agent_name.trim();
    if agent_name.is_empty() {
        return Err(RoutingError::invalid_argument("agent name cannot be empty"));
    }
    if agent_name.contains(ADDRESS_DELIMITER) {
        return Err(RoutingError::invalid_argument(format!(
            "agent name '{agent_name}' must not contain '{ADDRESS_DELIMITER}'"
        )));
    }

    let flow = match workflow_type.trim().rsplit(ADDRESS_DELIMITER).next() {
        Some(flow) if !flow.trim().is_empty() => flow.trim(),
        _ => {
            return Err(RoutingError::invalid_argument(
                "workflow type cannot be empty",
            ))
        }
    };

    let qualified = format!("{agent_name}{ADDRESS_DELIMITER}{flow}");
    build_address(&qualified, tenant_id, postfix)
}

/// Parsed form of a workflow address.
///
/// `parse` enforces the same minimum-segment invariant as the extraction
/// functions; `Display` reproduces the original string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowAddress {
    tenant_id: String,
    workflow_type: String,
    postfix: Vec<String>,
}

impl WorkflowAddress {
    /// Parse an address string into its components.
    pub fn parse(address: &str) -> RoutingResult<Self> {
        let segments = split_address(address)?;
        let (workflow_type, postfix_start) = if segments.len() >= 3 {
            (
                format!("{}{}{}", segments[1], ADDRESS_DELIMITER, segments[2]),
                3,
            )
        } else {
            (segments[1].to_string(), 2)
        };

        Ok(Self {
            tenant_id: segments[0].to_string(),
            workflow_type,
            postfix: segments[postfix_start..]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        })
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn workflow_type(&self) -> &str {
        &self.workflow_type
    }

    pub fn postfix(&self) -> &[String] {
        &self.postfix
    }
}

impl std::fmt::Display for WorkflowAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.tenant_id, ADDRESS_DELIMITER, self.workflow_type
        )?;
        for part in &self.postfix {
            write!(f, "{ADDRESS_DELIMITER}{part}")?;
        }
        Ok(())
    }
}

/// Split and validate an address against the minimum-segment invariant.
fn split_address(address: &str) -> RoutingResult<Vec<&str>> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(RoutingError::malformed_address(
            address,
            "address cannot be empty",
        ));
    }

    let segments: Vec<&str> = trimmed.split(ADDRESS_DELIMITER).collect();
    if segments.len() < MIN_SEGMENTS {
        return Err(RoutingError::malformed_address(
            address,
            format!("expected at least {MIN_SEGMENTS} ':'-delimited segments"),
        ));
    }
    Ok(segments)
}
