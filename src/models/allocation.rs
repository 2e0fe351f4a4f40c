//! Allocation result models.
//!
//! This module contains the [`SplitAllocation`] returned by
//! `calculation::allocate_split` and the [`AuditStep`] records that explain
//! how it was reached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::saturating_sum;

use super::SplitLine;

/// A single step in the audit trail recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A complete split plus the figures it was derived from.
///
/// # Example
///
/// ```
/// use splitbill::models::{SplitAllocation, SplitLine};
/// use rust_decimal::Decimal;
///
/// let allocation = SplitAllocation {
///     lines: vec![SplitLine::new("alice", Decimal::new(1000, 2))],
///     manual_total: Decimal::ZERO,
///     remaining: Decimal::new(1000, 2),
///     auto_count: 1,
///     base_share: Some(Decimal::new(1000, 2)),
///     remainder_participant: Some("alice".to_string()),
///     audit_steps: vec![],
/// };
/// assert_eq!(allocation.total(), Decimal::new(1000, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitAllocation {
    /// One line per participant, in selection order.
    pub lines: Vec<SplitLine>,
    /// Sum of the manual entries that were applied.
    pub manual_total: Decimal,
    /// Total minus the manual entries; shared by the auto participants.
    pub remaining: Decimal,
    /// Number of participants without a manual entry.
    pub auto_count: usize,
    /// The equal share given to every auto participant but the last.
    pub base_share: Option<Decimal>,
    /// The auto participant that absorbed the rounding remainder.
    pub remainder_participant: Option<String>,
    /// Decisions taken while computing the split.
    pub audit_steps: Vec<AuditStep>,
}

impl SplitAllocation {
    /// Returns the sum of all split lines, saturating at [`Decimal::MAX`].
    pub fn total(&self) -> Decimal {
        saturating_sum(self.lines.iter().map(|line| line.amount))
    }

    /// Returns the amount assigned to a participant, if any.
    pub fn amount_for(&self, participant_id: &str) -> Option<Decimal> {
        self.lines
            .iter()
            .find(|line| line.participant_id == participant_id)
            .map(|line| line.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_allocation() -> SplitAllocation {
        SplitAllocation {
            lines: vec![
                SplitLine::new("alice", dec("33.33")),
                SplitLine::new("bob", dec("33.33")),
                SplitLine::new("carol", dec("33.34")),
            ],
            manual_total: dec("0.00"),
            remaining: dec("100.00"),
            auto_count: 3,
            base_share: Some(dec("33.33")),
            remainder_participant: Some("carol".to_string()),
            audit_steps: vec![],
        }
    }

    #[test]
    fn test_total_sums_lines() {
        assert_eq!(sample_allocation().total(), dec("100.00"));
    }

    #[test]
    fn test_amount_for_known_and_unknown_participant() {
        let allocation = sample_allocation();
        assert_eq!(allocation.amount_for("carol"), Some(dec("33.34")));
        assert_eq!(allocation.amount_for("dave"), None);
    }

    #[test]
    fn test_serialize_allocation_uses_string_decimals() {
        let json = serde_json::to_value(sample_allocation()).unwrap();
        assert_eq!(json["remaining"], "100.00");
        assert_eq!(json["base_share"], "33.33");
        assert_eq!(json["lines"][2]["amount"], "33.34");
        assert_eq!(json["remainder_participant"], "carol");
    }
}
