//! Group and participant models.
//!
//! A [`Group`] is the set of people an expense can be split between. The
//! calculator only ever sees participant ids; display names are carried for
//! the callers that render them.

use serde::{Deserialize, Serialize};

/// A group member eligible to owe part of an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Opaque identifier.
    pub id: String,
    /// Name shown to other members.
    pub display_name: String,
}

/// A group of participants sharing expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier for the group.
    pub id: String,
    /// The group name.
    pub name: String,
    /// Optional free-text description.
    #[serde(default)]
    pub description: String,
    /// The participant who created the group.
    pub created_by: String,
    /// Group members, in the order they were added.
    pub members: Vec<Participant>,
}

impl Group {
    /// Returns true if the participant belongs to this group.
    ///
    /// # Examples
    ///
    /// ```
    /// use splitbill::models::{Group, Participant};
    ///
    /// let group = Group {
    ///     id: "flat".to_string(),
    ///     name: "Flat 4B".to_string(),
    ///     description: String::new(),
    ///     created_by: "alice".to_string(),
    ///     members: vec![Participant {
    ///         id: "alice".to_string(),
    ///         display_name: "Alice".to_string(),
    ///     }],
    /// };
    /// assert!(group.is_member("alice"));
    /// assert!(!group.is_member("bob"));
    /// ```
    pub fn is_member(&self, participant_id: &str) -> bool {
        self.members.iter().any(|m| m.id == participant_id)
    }

    /// Returns the member ids in the order they were added.
    pub fn member_ids(&self) -> Vec<String> {
        self.members.iter().map(|m| m.id.clone()).collect()
    }
}
