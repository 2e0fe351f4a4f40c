//! Parsing of amounts typed by users.
//!
//! Raw text never reaches the calculator: totals and manual entries are parsed
//! here first, and anything that is not a plain decimal number is rejected.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{ValidationError, ValidationResult};

/// Parses the expense total typed by the user.
///
/// Surrounding whitespace is ignored. Empty, non-numeric, zero, and negative
/// input fail with `InvalidAmount`.
///
/// # Examples
///
/// ```
/// use splitbill::calculation::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount(" 12.50 ").unwrap(), Decimal::new(1250, 2));
/// assert!(parse_amount("twelve").is_err());
/// assert!(parse_amount("").is_err());
/// assert!(parse_amount("-3").is_err());
/// ```
pub fn parse_amount(raw: &str) -> ValidationResult<Decimal> {
    let invalid = || ValidationError::InvalidAmount {
        input: raw.to_string(),
    };

    let amount = parse_decimal(raw).ok_or_else(invalid)?;
    if amount <= Decimal::ZERO {
        return Err(invalid());
    }

    Ok(amount)
}

/// Parses the amount typed for one participant.
///
/// Blank input and zero mean "not manually set" and yield `None`.
///
/// # Errors
///
/// - `InvalidAmount` if the text is not a number
/// - `NegativeAmount` if the number is below zero
///
/// # Examples
///
/// ```
/// use splitbill::calculation::parse_manual_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_manual_amount("bob", "").unwrap(), None);
/// assert_eq!(parse_manual_amount("bob", "0").unwrap(), None);
/// assert_eq!(parse_manual_amount("bob", "7.5").unwrap(), Some(Decimal::new(75, 1)));
/// assert!(parse_manual_amount("bob", "-1").is_err());
/// ```
pub fn parse_manual_amount(participant_id: &str, raw: &str) -> ValidationResult<Option<Decimal>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let amount = parse_decimal(raw).ok_or_else(|| ValidationError::InvalidAmount {
        input: raw.to_string(),
    })?;

    if amount < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount {
            participant_id: participant_id.to_string(),
            amount,
        });
    }

    Ok((!amount.is_zero()).then_some(amount))
}

/// Accepts an optional sign, digits and at most one decimal point.
fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let mut has_digit = false;
    let mut points = 0;
    for c in unsigned.chars() {
        match c {
            '0'..='9' => has_digit = true,
            '.' => points += 1,
            _ => return None,
        }
    }
    if !has_digit || points > 1 {
        return None;
    }

    let unsigned = unsigned.trim_end_matches('.');
    let normalized = match (negative, unsigned.starts_with('.')) {
        (true, true) => format!("-0{}", unsigned),
        (true, false) => format!("-{}", unsigned),
        (false, true) => format!("0{}", unsigned),
        (false, false) => unsigned.to_string(),
    };

    Decimal::from_str(&normalized).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_amount_accepts_plain_decimals() {
        assert_eq!(parse_amount("100").unwrap(), dec("100"));
        assert_eq!(parse_amount("100.00").unwrap(), dec("100.00"));
        assert_eq!(parse_amount(".5").unwrap(), dec("0.5"));
        assert_eq!(parse_amount("5.").unwrap(), dec("5"));
        assert_eq!(parse_amount("\t42.10\n").unwrap(), dec("42.10"));
    }

    #[test]
    fn test_parse_amount_rejects_missing_input() {
        for raw in ["", "   ", "."] {
            match parse_amount(raw) {
                Err(ValidationError::InvalidAmount { input }) => assert_eq!(input, raw),
                other => panic!("Expected InvalidAmount for {:?}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_parse_amount_rejects_non_numeric_input() {
        for raw in ["abc", "12,50", "1.2.3", "NaN", "inf", "1e3", "$5", "1_000"] {
            assert!(
                matches!(parse_amount(raw), Err(ValidationError::InvalidAmount { .. })),
                "expected {:?} to be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_parse_amount_rejects_zero_and_negative() {
        assert!(matches!(
            parse_amount("0"),
            Err(ValidationError::InvalidAmount { .. })
        ));
        assert!(matches!(
            parse_amount("0.00"),
            Err(ValidationError::InvalidAmount { .. })
        ));
        assert!(matches!(
            parse_amount("-20"),
            Err(ValidationError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_parse_manual_amount_blank_is_unset() {
        assert_eq!(parse_manual_amount("a", "").unwrap(), None);
        assert_eq!(parse_manual_amount("a", "  ").unwrap(), None);
    }

    #[test]
    fn test_parse_manual_amount_zero_is_unset() {
        assert_eq!(parse_manual_amount("a", "0.00").unwrap(), None);
    }

    #[test]
    fn test_parse_manual_amount_negative_names_participant() {
        match parse_manual_amount("bob", "-4.20") {
            Err(ValidationError::NegativeAmount {
                participant_id,
                amount,
            }) => {
                assert_eq!(participant_id, "bob");
                assert_eq!(amount, dec("-4.20"));
            }
            other => panic!("Expected NegativeAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_manual_amount_rejects_text() {
        assert!(matches!(
            parse_manual_amount("bob", "ten"),
            Err(ValidationError::InvalidAmount { .. })
        ));
    }
}
