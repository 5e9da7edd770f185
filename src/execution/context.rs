//! # Execution Context
//!
//! Ambient "am I inside deterministic workflow code" flag, modeled as an
//! injectable trait rather than a runtime type check so the dual-mode branch
//! is testable without a real engine.

/// Ambient execution context consumed from the engine.
pub trait ExecutionContext: Send + Sync {
    /// True when the caller is running inside deterministic workflow code,
    /// where direct I/O is forbidden and work must route through activities.
    fn in_workflow(&self) -> bool;
}

/// A context with a fixed answer. Covers plain request-handling services
/// (never inside workflow code) and tests of either branch.
#[derive(Debug, Clone, Copy)]
pub struct FixedExecutionContext {
    in_workflow: bool,
}

impl FixedExecutionContext {
    /// Context for code running inside deterministic workflow code.
    pub fn workflow() -> Self {
        Self { in_workflow: true }
    }

    /// Context for ordinary request-handling code or activity bodies.
    pub fn direct() -> Self {
        Self { in_workflow: false }
    }
}

impl ExecutionContext for FixedExecutionContext {
    fn in_workflow(&self) -> bool {
        self.in_workflow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_contexts() {
        assert!(FixedExecutionContext::workflow().in_workflow());
        assert!(!FixedExecutionContext::direct().in_workflow());
    }
}
