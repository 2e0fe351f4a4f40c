//! Error types for the SplitBill split engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! [`ValidationError`] covers every way a split can be rejected and is the only
//! error the calculator returns. [`EngineError`] wraps it together with the
//! failures of the collaborators around the calculator (configuration, group
//! directory, expense store).

use rust_decimal::Decimal;
use thiserror::Error;

/// A split was rejected.
///
/// All variants are deterministic input errors: retrying with the same input
/// produces the same error.
///
/// # Example
///
/// ```
/// use splitbill::error::ValidationError;
///
/// let error = ValidationError::NoParticipants;
/// assert_eq!(error.to_string(), "No participants selected");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The expense total is missing, non-numeric, zero, or negative.
    #[error("Invalid amount: '{input}'")]
    InvalidAmount {
        /// The rejected input, as the caller supplied it.
        input: String,
    },

    /// No participants were selected.
    #[error("No participants selected")]
    NoParticipants,

    /// Manual entries alone exceed the total.
    #[error("Manual amounts {allocated} exceed the total {total}")]
    SplitExceedsTotal {
        /// The expense total.
        total: Decimal,
        /// The sum of the manual entries.
        allocated: Decimal,
    },

    /// Every participant has a manual entry and together they fall short of the total.
    #[error("Manual amounts {allocated} fall short of the total {total}")]
    SplitBelowTotal {
        /// The expense total.
        total: Decimal,
        /// The sum of the manual entries.
        allocated: Decimal,
    },

    /// The split lines do not cover exactly the selected participants.
    #[error(
        "Split does not match the selected participants (missing: [{}], unexpected: [{}], duplicated: [{}])",
        missing.join(", "),
        unexpected.join(", "),
        duplicated.join(", ")
    )]
    MissingParticipant {
        /// Selected participants with no split line.
        missing: Vec<String>,
        /// Split lines for participants that are not selected.
        unexpected: Vec<String>,
        /// Participants with more than one split line.
        duplicated: Vec<String>,
    },

    /// A split line or manual entry is negative.
    #[error("Negative amount {amount} for participant '{participant_id}'")]
    NegativeAmount {
        /// The participant the amount belongs to.
        participant_id: String,
        /// The negative amount.
        amount: Decimal,
    },

    /// The split lines do not add up to the total.
    #[error("Split lines sum to {sum} but the total is {total}")]
    SplitMismatch {
        /// The expense total.
        total: Decimal,
        /// The sum of all split lines.
        sum: Decimal,
    },
}

/// A type alias for Results that return ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The error type for everything outside the pure calculator.
///
/// # Example
///
/// ```
/// use splitbill::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// No group with this id exists in the directory.
    #[error("Group not found: {group_id}")]
    GroupNotFound {
        /// The requested group id.
        group_id: String,
    },

    /// A participant is not a member of the group.
    #[error("Participant '{participant_id}' is not a member of group '{group_id}'")]
    NotAGroupMember {
        /// The group that was checked.
        group_id: String,
        /// The participant that is not a member.
        participant_id: String,
    },

    /// No expense with this id exists in the store.
    #[error("Expense not found: {expense_id}")]
    ExpenseNotFound {
        /// The requested expense id.
        expense_id: String,
    },

    /// Only the payer may delete an expense.
    #[error("Participant '{participant_id}' may not delete expense '{expense_id}'")]
    DeleteNotPermitted {
        /// The expense that was targeted.
        expense_id: String,
        /// The participant who asked for the deletion.
        participant_id: String,
    },

    /// The expense store could not be accessed.
    #[error("Expense store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the failure.
        message: String,
    },

    /// The split was rejected by the calculator.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_invalid_amount_displays_input() {
        let error = ValidationError::InvalidAmount {
            input: "abc".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid amount: 'abc'");
    }

    #[test]
    fn test_split_exceeds_total_displays_amounts() {
        let error = ValidationError::SplitExceedsTotal {
            total: dec("50.00"),
            allocated: dec("60.00"),
        };
        assert_eq!(
            error.to_string(),
            "Manual amounts 60.00 exceed the total 50.00"
        );
    }

    #[test]
    fn test_missing_participant_lists_ids() {
        let error = ValidationError::MissingParticipant {
            missing: vec!["carol".to_string()],
            unexpected: vec![],
            duplicated: vec!["alice".to_string(), "bob".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Split does not match the selected participants (missing: [carol], unexpected: [], duplicated: [alice, bob])"
        );
    }

    #[test]
    fn test_split_mismatch_displays_sum_and_total() {
        let error = ValidationError::SplitMismatch {
            total: dec("100.00"),
            sum: dec("99.97"),
        };
        assert_eq!(
            error.to_string(),
            "Split lines sum to 99.97 but the total is 100.00"
        );
    }

    #[test]
    fn test_validation_error_is_transparent_in_engine_error() {
        let error: EngineError = ValidationError::NoParticipants.into();
        assert_eq!(error.to_string(), "No participants selected");
        assert!(matches!(
            error,
            EngineError::Validation(ValidationError::NoParticipants)
        ));
    }

    #[test]
    fn test_not_a_group_member_displays_ids() {
        let error = EngineError::NotAGroupMember {
            group_id: "trip".to_string(),
            participant_id: "mallory".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Participant 'mallory' is not a member of group 'trip'"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ValidationError>();
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn rejects() -> ValidationResult<()> {
            Err(ValidationError::NoParticipants)
        }

        fn propagates() -> EngineResult<()> {
            rejects()?;
            Ok(())
        }

        assert!(matches!(
            propagates(),
            Err(EngineError::Validation(ValidationError::NoParticipants))
        ));
    }
}
