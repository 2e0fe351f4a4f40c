//! Group directory.
//!
//! The split engine never decides who belongs to a group; it asks a
//! [`GroupDirectory`]. The in-memory implementation is seeded from
//! `groups.yaml` at startup.

use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::{Group, Participant};

/// Read access to groups and their members.
pub trait GroupDirectory: Send + Sync {
    /// Gets a group by id.
    fn group(&self, group_id: &str) -> EngineResult<Group>;

    /// Returns the members of a group, in the order they were added.
    fn participants(&self, group_id: &str) -> EngineResult<Vec<Participant>>;

    /// Returns every group the participant belongs to.
    fn groups_for(&self, participant_id: &str) -> Vec<Group>;
}

/// Directory backed by a fixed list of groups.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGroupDirectory {
    groups: Vec<Group>,
    index: HashMap<String, usize>,
}

impl InMemoryGroupDirectory {
    /// Builds a directory over the given groups.
    ///
    /// If two groups share an id the first one wins.
    pub fn new(groups: Vec<Group>) -> Self {
        let mut index = HashMap::with_capacity(groups.len());
        for (position, group) in groups.iter().enumerate() {
            index.entry(group.id.clone()).or_insert(position);
        }
        Self { groups, index }
    }

    fn find(&self, group_id: &str) -> EngineResult<&Group> {
        self.index
            .get(group_id)
            .and_then(|&position| self.groups.get(position))
            .ok_or_else(|| EngineError::GroupNotFound {
                group_id: group_id.to_string(),
            })
    }
}

impl GroupDirectory for InMemoryGroupDirectory {
    fn group(&self, group_id: &str) -> EngineResult<Group> {
        self.find(group_id).cloned()
    }

    fn participants(&self, group_id: &str) -> EngineResult<Vec<Participant>> {
        Ok(self.find(group_id)?.members.clone())
    }

    fn groups_for(&self, participant_id: &str) -> Vec<Group> {
        self.groups
            .iter()
            .filter(|g| g.is_member(participant_id))
            .cloned()
            .collect()
    }
}
