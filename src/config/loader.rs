//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the split
//! policy and seed groups from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::Group;

use super::types::{GroupsConfig, SplitPolicy};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/splitbill/
/// ├── policy.yaml   # decimal places, rounding mode, tolerance
/// └── groups.yaml   # groups the directory is seeded with
/// ```
///
/// # Example
///
/// ```no_run
/// use splitbill::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/splitbill").unwrap();
/// println!("{} seed groups", loader.groups().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: SplitPolicy,
    groups: Vec<Group>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing or contains invalid YAML,
    /// if the policy fails [`SplitPolicy::validate`], or if two groups share
    /// an id.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<SplitPolicy>(&path.join("policy.yaml"))?;
        let groups_config = Self::load_yaml::<GroupsConfig>(&path.join("groups.yaml"))?;

        Self::from_parts(policy, groups_config.groups)
    }

    /// Builds a loader from already-parsed parts, applying the same checks as [`ConfigLoader::load`].
    pub fn from_parts(policy: SplitPolicy, groups: Vec<Group>) -> EngineResult<Self> {
        policy.validate()?;

        let mut seen = HashSet::new();
        for group in &groups {
            if !seen.insert(group.id.as_str()) {
                return Err(EngineError::InvalidConfig {
                    field: "groups".to_string(),
                    message: format!("duplicate group id '{}'", group.id),
                });
            }
        }

        Ok(Self { policy, groups })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the split policy.
    pub fn policy(&self) -> &SplitPolicy {
        &self.policy
    }

    /// Returns the seed groups.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }
}
