//! Configuration loading and management for the Leave Management Engine.
//!
//! This module loads the reminder policy, allowance defaults and public
//! holidays from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("{} public holidays", config.public_holidays().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AllowancePolicy, HolidaysConfig, LeaveConfig, PolicyConfig, ReminderPolicy};
