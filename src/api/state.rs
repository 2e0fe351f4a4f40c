//! Application state for the SplitBill API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, SplitPolicy};
use crate::directory::{GroupDirectory, InMemoryGroupDirectory};
use crate::store::{ExpenseStore, InMemoryExpenseStore};

/// Shared application state.
///
/// Holds the split policy and the collaborators the handlers call: the
/// group directory and the expense store.
#[derive(Clone)]
pub struct AppState {
    policy: Arc<SplitPolicy>,
    directory: Arc<dyn GroupDirectory>,
    store: Arc<dyn ExpenseStore>,
}

impl AppState {
    /// Creates application state from explicit collaborators.
    pub fn new(
        policy: SplitPolicy,
        directory: Arc<dyn GroupDirectory>,
        store: Arc<dyn ExpenseStore>,
    ) -> Self {
        Self {
            policy: Arc::new(policy),
            directory,
            store,
        }
    }

    /// Creates application state from loaded configuration, with a group
    /// directory seeded from it and an empty in-memory expense store.
    pub fn from_config(config: &ConfigLoader) -> Self {
        Self::new(
            config.policy().clone(),
            Arc::new(InMemoryGroupDirectory::new(config.groups().to_vec())),
            Arc::new(InMemoryExpenseStore::new()),
        )
    }

    /// Returns the split policy.
    pub fn policy(&self) -> &SplitPolicy {
        &self.policy
    }

    /// Returns the group directory.
    pub fn directory(&self) -> &dyn GroupDirectory {
        self.directory.as_ref()
    }

    /// Returns the expense store.
    pub fn store(&self) -> &dyn ExpenseStore {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_from_config_seeds_directory() {
        let config = ConfigLoader::load("./config/splitbill").unwrap();
        let state = AppState::from_config(&config);

        assert_eq!(state.policy().decimal_places, 2);
        assert!(state.directory().group("flat-4b").is_ok());
        assert!(state.store().list_for_group("flat-4b").unwrap().is_empty());
    }
}
