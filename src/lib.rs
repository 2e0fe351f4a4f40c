//! SplitBill split engine
//!
//! This crate splits a group expense between its participants. A user may fix
//! the amount some participants owe; everyone else shares what remains
//! equally, with the last of them absorbing the rounding remainder. Every split
//! is checked for completeness and balance before it is stored.
//!
//! The [`calculation`] module is pure and does no I/O. The [`api`] module
//! exposes it over HTTP together with a group directory and an expense store.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod directory;
pub mod error;
pub mod models;
pub mod store;
