//! Split validation.
//!
//! [`validate_split`] is the gate every split passes before it is submitted,
//! however it was produced: fully manual, fully automatic, or mixed.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use crate::config::SplitPolicy;
use crate::error::{ValidationError, ValidationResult};
use crate::models::SplitLine;

use super::rounding::{is_within_tolerance, round_amount, saturating_sum};

/// Checks that a split is complete and balanced.
///
/// # Arguments
///
/// * `total` - The expense total
/// * `participants` - The current selection; order does not matter here
/// * `lines` - The split to check
/// * `policy` - Rounding and tolerance rules
///
/// # Errors
///
/// Checks run in this order and the first failure is returned:
/// - `InvalidAmount` if the total is not positive after rounding
/// - `NoParticipants` if the selection is empty
/// - `MissingParticipant` if a selected participant has no line, a line names
///   an unselected participant, or a participant has more than one line
/// - `NegativeAmount` for the first line below zero
/// - `SplitMismatch` if the rounded sum of the lines is further than the
///   tolerance from the total; a sum beyond the decimal range is reported as
///   [`Decimal::MAX`]
///
/// # Examples
///
/// ```
/// use splitbill::calculation::validate_split;
/// use splitbill::config::SplitPolicy;
/// use splitbill::error::ValidationError;
/// use splitbill::models::SplitLine;
/// use rust_decimal::Decimal;
///
/// let selection = vec!["alice".to_string(), "bob".to_string(), "carol".to_string()];
/// let lines = vec![
///     SplitLine::new("alice", Decimal::new(5000, 2)),
///     SplitLine::new("bob", Decimal::new(5000, 2)),
/// ];
///
/// let result = validate_split(Decimal::new(10000, 2), &selection, &lines, &SplitPolicy::default());
/// assert!(matches!(result, Err(ValidationError::MissingParticipant { .. })));
/// ```
pub fn validate_split(
    total: Decimal,
    participants: &[String],
    lines: &[SplitLine],
    policy: &SplitPolicy,
) -> ValidationResult<()> {
    let rounded_total = round_amount(total, policy);
    if rounded_total <= Decimal::ZERO {
        return Err(ValidationError::InvalidAmount {
            input: total.to_string(),
        });
    }

    if participants.is_empty() {
        return Err(ValidationError::NoParticipants);
    }

    check_coverage(participants, lines)?;

    if let Some(line) = lines.iter().find(|l| l.amount < Decimal::ZERO) {
        return Err(ValidationError::NegativeAmount {
            participant_id: line.participant_id.clone(),
            amount: line.amount,
        });
    }

    let sum = round_amount(saturating_sum(lines.iter().map(|l| l.amount)), policy);
    if !is_within_tolerance(sum - rounded_total, policy) {
        return Err(ValidationError::SplitMismatch {
            total: rounded_total,
            sum,
        });
    }

    Ok(())
}

/// Fails unless every selected participant has exactly one line and no line
/// names anyone else.
fn check_coverage(participants: &[String], lines: &[SplitLine]) -> ValidationResult<()> {
    let selected: HashSet<&str> = participants.iter().map(String::as_str).collect();

    let mut line_counts: HashMap<&str, usize> = HashMap::new();
    for line in lines {
        *line_counts.entry(line.participant_id.as_str()).or_default() += 1;
    }

    let mut missing = Vec::new();
    let mut seen_selected = HashSet::new();
    for id in participants {
        if seen_selected.insert(id.as_str()) && !line_counts.contains_key(id.as_str()) {
            missing.push(id.clone());
        }
    }

    let mut unexpected = Vec::new();
    let mut duplicated = Vec::new();
    let mut reported = HashSet::new();
    for line in lines {
        let id = line.participant_id.as_str();
        if !reported.insert(id) {
            continue;
        }
        if !selected.contains(id) {
            unexpected.push(id.to_string());
        } else if line_counts[id] > 1 {
            duplicated.push(id.to_string());
        }
    }

    if missing.is_empty() && unexpected.is_empty() && duplicated.is_empty() {
        return Ok(());
    }

    Err(ValidationError::MissingParticipant {
        missing,
        unexpected,
        duplicated,
    })
}
