//! Split allocation.
//!
//! This module provides [`allocate_split`], which divides an expense total
//! between the selected participants: manual entries are kept as typed and
//! what remains is shared equally by everyone else, with the rounding
//! remainder concentrated on the last of them in selection order.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use crate::config::SplitPolicy;
use crate::error::{ValidationError, ValidationResult};
use crate::models::{AuditStep, SplitAllocation, SplitInput, SplitLine};

use super::rounding::{is_within_tolerance, round_amount, saturating_sum, truncate_amount};

/// Computes a split and returns only its lines.
///
/// This is [`allocate_split`] without the breakdown and audit steps.
///
/// # Examples
///
/// ```
/// use splitbill::calculation::auto_split;
/// use splitbill::config::SplitPolicy;
/// use splitbill::models::SplitInput;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let input = SplitInput::new(Decimal::from_str("100.00").unwrap(), ["alice", "bob", "carol"]);
/// let lines = auto_split(&input, &SplitPolicy::default()).unwrap();
///
/// let amounts: Vec<String> = lines.iter().map(|l| l.amount.to_string()).collect();
/// assert_eq!(amounts, vec!["33.33", "33.33", "33.34"]);
/// ```
pub fn auto_split(input: &SplitInput, policy: &SplitPolicy) -> ValidationResult<Vec<SplitLine>> {
    Ok(allocate_split(input, policy)?.lines)
}

/// Divides an expense total between the selected participants.
///
/// # Rules
///
/// 1. Participants with a manual entry greater than zero keep that amount.
///    Entries for unselected participants are ignored; when a participant has
///    several entries the last one wins. Duplicate participant ids collapse to
///    their first position.
/// 2. `remaining = round(total - round(sum(manual)))`. A remaining below zero
///    by more than the tolerance fails with `SplitExceedsTotal`; within the
///    tolerance it counts as zero.
/// 3. Every auto participant but the last gets `base = round(remaining / n)`;
///    the last gets `round(remaining - base * (n - 1))`, so the auto shares add
///    up to `remaining` exactly. If that would leave the last share negative,
///    `base` is truncated instead of rounded.
/// 4. With no auto participants, a remaining outside the tolerance fails with
///    `SplitBelowTotal`.
///
/// # Errors
///
/// - `InvalidAmount` if the total is not positive after rounding
/// - `NoParticipants` if no participant is selected
/// - `NegativeAmount` if a selected participant's manual entry is negative
/// - `SplitExceedsTotal` / `SplitBelowTotal` as described above
///
/// # Examples
///
/// ```
/// use splitbill::calculation::allocate_split;
/// use splitbill::config::SplitPolicy;
/// use splitbill::models::SplitInput;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let input = SplitInput::new(dec("50.00"), ["alice", "bob"])
///     .with_manual_entry("alice", dec("20.00"));
///
/// let allocation = allocate_split(&input, &SplitPolicy::default()).unwrap();
/// assert_eq!(allocation.amount_for("bob"), Some(dec("30.00")));
/// assert_eq!(allocation.remaining, dec("30.00"));
/// ```
pub fn allocate_split(input: &SplitInput, policy: &SplitPolicy) -> ValidationResult<SplitAllocation> {
    let total = round_amount(input.total, policy);
    if total <= Decimal::ZERO {
        return Err(ValidationError::InvalidAmount {
            input: input.total.to_string(),
        });
    }

    let participants = distinct_in_order(&input.participants);
    if participants.is_empty() {
        return Err(ValidationError::NoParticipants);
    }

    let manual_amounts = collect_manual_amounts(input, &participants, policy)?;

    let (manual, auto): (Vec<&str>, Vec<&str>) = participants
        .iter()
        .copied()
        .partition(|id| manual_amounts.contains_key(id));

    let mut audit_steps = vec![AuditStep {
        step_number: 1,
        rule_id: "participant_partition".to_string(),
        rule_name: "Participant Partition".to_string(),
        input: serde_json::json!({
            "participants": participants,
            "manual_entries": input.manual_entries.len()
        }),
        output: serde_json::json!({
            "manual": manual,
            "auto": auto
        }),
        reasoning: format!(
            "{} participant(s) with a manual amount, {} sharing the remainder",
            manual.len(),
            auto.len()
        ),
    }];

    let manual_total = round_amount(saturating_sum(manual_amounts.values().copied()), policy);
    let mut remaining = round_amount(total - manual_total, policy);

    if remaining < Decimal::ZERO {
        if !is_within_tolerance(remaining, policy) {
            return Err(ValidationError::SplitExceedsTotal {
                total,
                allocated: manual_total,
            });
        }
        remaining = round_amount(Decimal::ZERO, policy);
    }

    audit_steps.push(AuditStep {
        step_number: 2,
        rule_id: "remaining_balance".to_string(),
        rule_name: "Remaining Balance".to_string(),
        input: serde_json::json!({
            "total": total.to_string(),
            "manual_total": manual_total.to_string()
        }),
        output: serde_json::json!({
            "remaining": remaining.to_string()
        }),
        reasoning: format!("${} - ${} = ${}", total, manual_total, remaining),
    });

    let mut base_share = None;
    let mut remainder_participant = None;
    let mut remainder_share = Decimal::ZERO;

    match auto.last() {
        Some(&last_id) => {
            let (base, last) = share_remaining(remaining, auto.len(), policy).ok_or_else(|| {
                ValidationError::InvalidAmount {
                    input: input.total.to_string(),
                }
            })?;

            audit_steps.push(AuditStep {
                step_number: 3,
                rule_id: "equal_share".to_string(),
                rule_name: "Equal Share".to_string(),
                input: serde_json::json!({
                    "remaining": remaining.to_string(),
                    "auto_count": auto.len()
                }),
                output: serde_json::json!({
                    "base_share": base.to_string(),
                    "remainder_participant": last_id,
                    "remainder_share": last.to_string()
                }),
                reasoning: format!(
                    "${} / {} = ${} each; '{}' receives ${}",
                    remaining,
                    auto.len(),
                    base,
                    last_id,
                    last
                ),
            });

            base_share = Some(base);
            remainder_participant = Some(last_id.to_string());
            remainder_share = last;
        }
        None => {
            if !is_within_tolerance(remaining, policy) {
                return Err(ValidationError::SplitBelowTotal {
                    total,
                    allocated: manual_total,
                });
            }

            audit_steps.push(AuditStep {
                step_number: 3,
                rule_id: "manual_reconciliation".to_string(),
                rule_name: "Manual Reconciliation".to_string(),
                input: serde_json::json!({
                    "total": total.to_string(),
                    "manual_total": manual_total.to_string()
                }),
                output: serde_json::json!({
                    "difference": remaining.to_string(),
                    "reconciled": true
                }),
                reasoning: format!(
                    "All participants entered manually; ${} is within the ${} tolerance",
                    remaining, policy.tolerance
                ),
            });
        }
    }

    let lines = participants
        .iter()
        .map(|&id| {
            let amount = match manual_amounts.get(id) {
                Some(&manual_amount) => manual_amount,
                None if remainder_participant.as_deref() == Some(id) => remainder_share,
                None => base_share.unwrap_or_default(),
            };
            SplitLine::new(id, amount)
        })
        .collect();

    Ok(SplitAllocation {
        lines,
        manual_total,
        remaining,
        auto_count: auto.len(),
        base_share,
        remainder_participant,
        audit_steps,
    })
}

/// Returns `(base, last)` such that `base * (count - 1) + last == remaining`.
///
/// Returns `None` only if the shares cannot be represented.
fn share_remaining(
    remaining: Decimal,
    count: usize,
    policy: &SplitPolicy,
) -> Option<(Decimal, Decimal)> {
    let count = Decimal::from(count);
    let others = count - Decimal::ONE;
    let last_share = |base: Decimal| {
        base.checked_mul(others)
            .and_then(|given| remaining.checked_sub(given))
            .map(|last| round_amount(last, policy))
    };

    let base = round_amount(remaining / count, policy);
    if let Some(last) = last_share(base).filter(|last| *last >= Decimal::ZERO) {
        return Some((base, last));
    }

    let base = truncate_amount(remaining / count, policy);
    last_share(base).map(|last| (base, last))
}

/// Drops repeated ids, keeping each at its first position.
fn distinct_in_order(participants: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    participants
        .iter()
        .map(String::as_str)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Maps selected participants to their effective manual amount.
///
/// Only amounts that are non-zero after rounding are kept.
fn collect_manual_amounts<'a>(
    input: &'a SplitInput,
    participants: &[&'a str],
    policy: &SplitPolicy,
) -> ValidationResult<HashMap<&'a str, Decimal>> {
    let selected: HashSet<&str> = participants.iter().copied().collect();

    let mut latest: HashMap<&str, Decimal> = HashMap::new();
    for entry in &input.manual_entries {
        if selected.contains(entry.participant_id.as_str()) {
            latest.insert(entry.participant_id.as_str(), entry.amount);
        }
    }

    let mut manual_amounts = HashMap::new();
    for &id in participants {
        let Some(&amount) = latest.get(id) else {
            continue;
        };
        if amount < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount {
                participant_id: id.to_string(),
                amount,
            });
        }

        let amount = round_amount(amount, policy);
        if !amount.is_zero() {
            manual_amounts.insert(id, amount);
        }
    }

    Ok(manual_amounts)
}
