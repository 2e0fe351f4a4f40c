//! Split calculation logic for the SplitBill engine.
//!
//! This module contains the pure functions that turn an expense total, an
//! ordered participant selection and optional manual amounts into a balanced
//! split, the checks a split must pass before it is submitted, the rounding
//! rules both rely on, and the parsing of raw amount text typed by users.
//!
//! Nothing in this module performs I/O, logs, or holds state.

mod allocation;
mod amount_input;
mod rounding;
mod validation;

pub use allocation::{allocate_split, auto_split};
pub use amount_input::{parse_amount, parse_manual_amount};
pub use rounding::{is_within_tolerance, round_amount, saturating_sum, truncate_amount};
pub use validation::validate_split;
