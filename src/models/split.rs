//! Split input and output models.
//!
//! This module defines the immutable [`SplitInput`] the calculator consumes,
//! the [`ManualEntry`] overrides it may carry, and the [`SplitLine`] the
//! calculator produces for each participant.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount the user typed for one participant.
///
/// An entry with amount zero is treated as "not manually set" and the
/// participant takes part in the equal split instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualEntry {
    /// The participant the amount belongs to.
    pub participant_id: String,
    /// The amount the participant owes.
    pub amount: Decimal,
}

impl ManualEntry {
    /// Creates a manual entry.
    pub fn new(participant_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            participant_id: participant_id.into(),
            amount,
        }
    }
}

/// One participant's share of an expense.
///
/// This is also the wire format of a finalized split: `{ participant_id, amount }`.
///
/// # Example
///
/// ```
/// use splitbill::models::SplitLine;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let line = SplitLine::new("alice", Decimal::from_str("33.34").unwrap());
/// assert_eq!(line.participant_id, "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitLine {
    /// The participant who owes this share.
    pub participant_id: String,
    /// The amount owed, with two decimal places.
    pub amount: Decimal,
}

impl SplitLine {
    /// Creates a split line.
    pub fn new(participant_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            participant_id: participant_id.into(),
            amount,
        }
    }
}

/// Everything the calculator needs to split one expense.
///
/// `participants` is ordered by selection: the last participant without a
/// manual entry absorbs the rounding remainder.
///
/// # Example
///
/// ```
/// use splitbill::models::SplitInput;
/// use rust_decimal::Decimal;
///
/// let input = SplitInput::new(Decimal::new(5000, 2), ["alice", "bob"])
///     .with_manual_entry("alice", Decimal::new(2000, 2));
/// assert_eq!(input.participants, vec!["alice", "bob"]);
/// assert_eq!(input.manual_entries.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitInput {
    /// The expense total.
    pub total: Decimal,
    /// Selected participant ids, in selection order.
    pub participants: Vec<String>,
    /// Amounts typed for individual participants.
    #[serde(default)]
    pub manual_entries: Vec<ManualEntry>,
}

impl SplitInput {
    /// Creates an input with no manual entries.
    pub fn new<I, S>(total: Decimal, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            total,
            participants: participants.into_iter().map(Into::into).collect(),
            manual_entries: Vec::new(),
        }
    }

    /// Returns the input with a manual entry appended.
    pub fn with_manual_entry(mut self, participant_id: impl Into<String>, amount: Decimal) -> Self {
        self.manual_entries.push(ManualEntry::new(participant_id, amount));
        self
    }
}
