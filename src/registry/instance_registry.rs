//! # Instance Registry
//!
//! Thread-safe name-to-handle map used for live agent and workflow instances.
//!
//! ## Overview
//!
//! The same structure backs two registries with different collision rules:
//! agents are unique per process (a duplicate name is a programming error and
//! is rejected atomically), while workflow instances overwrite on
//! re-registration because a restarted workflow legitimately replaces its
//! previous handle.
//!
//! Registries are plain injectable values; each test constructs its own.

use crate::registry::errors::{RegistryError, RegistryResult};
use dashmap::DashMap;
use tracing::debug;

/// Collision behavior when a key is registered twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationPolicy {
    /// Second registration under the same key fails.
    RejectDuplicates,
    /// Second registration replaces the first.
    Overwrite,
}

/// Concurrent map from instance name to a handle of type `T`.
#[derive(Debug)]
pub struct InstanceRegistry<T> {
    entries: DashMap<String, T>,
    policy: RegistrationPolicy,
    kind: &'static str,
}

impl<T: Clone> InstanceRegistry<T> {
    /// Registry that rejects duplicate names (agent semantics).
    pub fn rejecting_duplicates(kind: &'static str) -> Self {
        Self {
            entries: DashMap::new(),
            policy: RegistrationPolicy::RejectDuplicates,
            kind,
        }
    }

    /// Registry where re-registration overwrites (workflow semantics).
    pub fn overwriting(kind: &'static str) -> Self {
        Self {
            entries: DashMap::new(),
            policy: RegistrationPolicy::Overwrite,
            kind,
        }
    }

    /// Register a handle under `name`, applying the collision policy.
    ///
    /// Under [`RegistrationPolicy::RejectDuplicates`] the check-and-insert is
    /// atomic: concurrent registrations of the same name admit exactly one.
    pub fn register(&self, name: impl Into<String>, handle: T) -> RegistryResult<()> {
        let name = name.into();
        match self.policy {
            RegistrationPolicy::RejectDuplicates => match self.entries.entry(name.clone()) {
                dashmap::mapref::entry::Entry::Occupied(_) => {
                    Err(RegistryError::duplicate(self.kind, name))
                }
                dashmap::mapref::entry::Entry::Vacant(slot) => {
                    slot.insert(handle);
                    debug!(kind = self.kind, name = %name, "Registered instance");
                    Ok(())
                }
            },
            RegistrationPolicy::Overwrite => {
                let replaced = self.entries.insert(name.clone(), handle).is_some();
                debug!(kind = self.kind, name = %name, replaced, "Registered instance");
                Ok(())
            }
        }
    }

    /// Look up a handle, listing known names in the error on a miss.
    pub fn get(&self, name: &str) -> RegistryResult<T> {
        self.try_get(name).ok_or_else(|| {
            let mut known: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
            known.sort();
            RegistryError::not_found(self.kind, name, known)
        })
    }

    /// Look up a handle without constructing an error on a miss.
    pub fn try_get(&self, name: &str) -> Option<T> {
        self.entries.get(name).map(|entry| entry.value().clone())
    }

    /// Snapshot of every registered handle.
    pub fn get_all(&self) -> Vec<(String, T)> {
        self.entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect()
    }

    /// Remove every entry. Test/reset use only.
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
