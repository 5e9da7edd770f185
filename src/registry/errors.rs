//! Error types for registry operations.

use thiserror::Error;

/// Registry operation failures.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Duplicate {kind} registration: '{key}' is already registered")]
    DuplicateRegistration { kind: &'static str, key: String },

    #[error("No {kind} registered under '{key}' (known: {known:?})")]
    NotFound {
        kind: &'static str,
        key: String,
        known: Vec<String>,
    },
}

impl RegistryError {
    pub fn duplicate(kind: &'static str, key: impl Into<String>) -> Self {
        Self::DuplicateRegistration {
            kind,
            key: key.into(),
        }
    }

    pub fn not_found(kind: &'static str, key: impl Into<String>, known: Vec<String>) -> Self {
        Self::NotFound {
            kind,
            key: key.into(),
            known,
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_lists_known_keys() {
        let err = RegistryError::not_found("agent", "Billing", vec!["Sales".to_string()]);
        let rendered = format!("{err}");
        assert!(rendered.contains("Billing"));
        assert!(rendered.contains("Sales"));
    }

    #[test]
    fn test_duplicate_names_the_kind() {
        let err = RegistryError::duplicate("agent", "Sales");
        assert!(format!("{err}").contains("agent"));
    }
}
