//! Rounding rules shared by allocation and validation.
//!
//! Every intermediate amount is rounded to the policy's decimal places, not
//! only the presented values, so sums never drift.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::SplitPolicy;

/// Rounds an amount to the policy's decimal places using its rounding mode.
///
/// The result always carries exactly `decimal_places` fractional digits and
/// zero is never negative.
///
/// # Examples
///
/// ```
/// use splitbill::calculation::round_amount;
/// use splitbill::config::SplitPolicy;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let policy = SplitPolicy::default();
/// let rounded = round_amount(Decimal::from_str("33.335").unwrap(), &policy);
/// assert_eq!(rounded.to_string(), "33.34");
///
/// let padded = round_amount(Decimal::from(30), &policy);
/// assert_eq!(padded.to_string(), "30.00");
/// ```
pub fn round_amount(value: Decimal, policy: &SplitPolicy) -> Decimal {
    let rounded = value.round_dp_with_strategy(policy.decimal_places, policy.rounding.strategy());
    with_fixed_scale(rounded, policy.decimal_places)
}

/// Cuts an amount to the policy's decimal places, rounding toward zero.
pub fn truncate_amount(value: Decimal, policy: &SplitPolicy) -> Decimal {
    let truncated = value.round_dp_with_strategy(policy.decimal_places, RoundingStrategy::ToZero);
    with_fixed_scale(truncated, policy.decimal_places)
}

/// Returns true if `difference` is no further from zero than the policy tolerance.
///
/// The comparison is inclusive: a difference equal to the tolerance passes.
pub fn is_within_tolerance(difference: Decimal, policy: &SplitPolicy) -> bool {
    difference.abs() <= policy.tolerance
}

/// Adds up non-negative amounts, saturating at [`Decimal::MAX`] instead of overflowing.
///
/// A saturated sum is larger than any total, so callers report it through
/// their ordinary "too much" error.
pub fn saturating_sum<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .unwrap_or(Decimal::MAX)
}

fn with_fixed_scale(mut value: Decimal, scale: u32) -> Decimal {
    value.rescale(scale);
    if value.is_zero() {
        value.set_sign_positive(true);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoundingMode;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn half_even() -> SplitPolicy {
        SplitPolicy {
            rounding: RoundingMode::HalfEven,
            ..SplitPolicy::default()
        }
    }

    #[test]
    fn test_round_half_up_at_midpoint() {
        let policy = SplitPolicy::default();
        assert_eq!(round_amount(dec("0.005"), &policy), dec("0.01"));
        assert_eq!(round_amount(dec("2.675"), &policy), dec("2.68"));
        assert_eq!(round_amount(dec("0.125"), &policy), dec("0.13"));
    }

    #[test]
    fn test_round_half_even_at_midpoint() {
        let policy = half_even();
        assert_eq!(round_amount(dec("0.005"), &policy), dec("0.00"));
        assert_eq!(round_amount(dec("0.015"), &policy), dec("0.02"));
        assert_eq!(round_amount(dec("0.125"), &policy), dec("0.12"));
    }

    #[test]
    fn test_round_non_terminating_division() {
        let policy = SplitPolicy::default();
        assert_eq!(round_amount(dec("100") / dec("3"), &policy), dec("33.33"));
        assert_eq!(round_amount(dec("200") / dec("3"), &policy), dec("66.67"));
    }

    #[test]
    fn test_round_pads_scale_to_two_places() {
        let policy = SplitPolicy::default();
        assert_eq!(round_amount(dec("30"), &policy).to_string(), "30.00");
        assert_eq!(round_amount(dec("7.5"), &policy).to_string(), "7.50");
    }

    #[test]
    fn test_round_never_yields_negative_zero() {
        let policy = SplitPolicy::default();
        let rounded = round_amount(dec("-0.001"), &policy);
        assert!(rounded.is_zero());
        assert!(!rounded.is_sign_negative());
        assert_eq!(rounded.to_string(), "0.00");
    }

    #[test]
    fn test_truncate_rounds_toward_zero() {
        let policy = SplitPolicy::default();
        assert_eq!(truncate_amount(dec("0.0075"), &policy), dec("0.00"));
        assert_eq!(truncate_amount(dec("33.339"), &policy), dec("33.33"));
    }

    #[test]
    fn test_saturating_sum_adds_amounts() {
        assert_eq!(saturating_sum(vec![dec("1.10"), dec("2.25")]), dec("3.35"));
        assert_eq!(saturating_sum(Vec::new()), Decimal::ZERO);
    }

    #[test]
    fn test_saturating_sum_caps_at_max() {
        let huge = dec("60000000000000000000000000000");
        assert_eq!(saturating_sum(vec![huge, huge]), Decimal::MAX);
        assert_eq!(saturating_sum(vec![Decimal::MAX, dec("0.01")]), Decimal::MAX);
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        let policy = SplitPolicy::default();
        assert!(is_within_tolerance(dec("0.01"), &policy));
        assert!(is_within_tolerance(dec("-0.01"), &policy));
        assert!(is_within_tolerance(Decimal::ZERO, &policy));
        assert!(!is_within_tolerance(dec("0.02"), &policy));
        assert!(!is_within_tolerance(dec("-0.011"), &policy));
    }
}
