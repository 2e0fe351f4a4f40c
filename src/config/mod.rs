//! Configuration loading and management for the SplitBill split engine.
//!
//! This module loads the split policy (decimal places, rounding mode and
//! reconciliation tolerance) and the seed groups for the group directory
//! from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use splitbill::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/splitbill").unwrap();
//! println!("Rounding to {} places", config.policy().decimal_places);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{GroupsConfig, RoundingMode, SplitPolicy};
