//! Configuration types for the split engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Group;

/// The largest supported number of decimal places.
const MAX_DECIMAL_PLACES: u32 = 6;

/// How amounts are rounded at every intermediate step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round half away from zero (0.005 -> 0.01).
    #[default]
    HalfUp,
    /// Round half to the nearest even digit (0.005 -> 0.00, 0.015 -> 0.02).
    HalfEven,
}

impl RoundingMode {
    /// Returns the `rust_decimal` strategy implementing this mode.
    pub fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

fn default_decimal_places() -> u32 {
    2
}

fn default_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// Numeric rules the calculator applies to every split.
///
/// Loaded from `policy.yaml`; every field has a default, so an empty file
/// yields [`SplitPolicy::default`].
///
/// # Example
///
/// ```
/// use splitbill::config::{RoundingMode, SplitPolicy};
/// use rust_decimal::Decimal;
///
/// let policy = SplitPolicy::default();
/// assert_eq!(policy.decimal_places, 2);
/// assert_eq!(policy.rounding, RoundingMode::HalfUp);
/// assert_eq!(policy.tolerance, Decimal::new(1, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitPolicy {
    /// Number of fractional digits every amount is rounded to.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Tie-breaking rule for rounding.
    #[serde(default)]
    pub rounding: RoundingMode,
    /// Largest absolute deviation between a split's sum and its total that
    /// still counts as balanced. Inclusive.
    #[serde(default = "default_tolerance")]
    pub tolerance: Decimal,
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self {
            decimal_places: default_decimal_places(),
            rounding: RoundingMode::default(),
            tolerance: default_tolerance(),
        }
    }
}

impl SplitPolicy {
    /// Checks that the policy can be applied.
    pub fn validate(&self) -> EngineResult<()> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(EngineError::InvalidConfig {
                field: "decimal_places".to_string(),
                message: format!(
                    "{} exceeds the maximum of {}",
                    self.decimal_places, MAX_DECIMAL_PLACES
                ),
            });
        }

        if self.tolerance < Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "tolerance".to_string(),
                message: format!("{} must not be negative", self.tolerance),
            });
        }

        Ok(())
    }
}

/// Groups configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupsConfig {
    /// Groups the directory starts with.
    #[serde(default)]
    pub groups: Vec<Group>,
}
