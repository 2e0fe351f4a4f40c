//! Core data models for the SplitBill split engine.
//!
//! This module contains all the domain models used throughout the engine.

mod allocation;
mod expense;
mod group;
mod split;

pub use allocation::{AuditStep, SplitAllocation};
pub use expense::{Expense, NewExpense};
pub use group::{Group, Participant};
pub use split::{ManualEntry, SplitInput, SplitLine};
