//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading leave
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use tracing::info;

use crate::error::{LeaveError, LeaveResult};
use crate::models::PublicHoliday;

use super::types::{AllowancePolicy, HolidaysConfig, LeaveConfig, PolicyConfig, ReminderPolicy};

/// Loads and provides access to leave configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── policy.yaml    # Reminder rules and allowance defaults
/// └── holidays.yaml  # Public holidays
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Remind after {} days", loader.reminder_policy().min_days_before_reminding);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: LeaveConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if a file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> LeaveResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<PolicyConfig>(&path.join("policy.yaml"))?;
        let holidays = Self::load_yaml::<HolidaysConfig>(&path.join("holidays.yaml"))?;

        info!(
            path = %path.display(),
            public_holidays = holidays.public_holidays.len(),
            "Loaded leave configuration"
        );

        Ok(Self {
            config: LeaveConfig::new(policy, holidays),
        })
    }

    /// Wraps an already built configuration.
    pub fn from_config(config: LeaveConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> LeaveResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| LeaveError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| LeaveError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &LeaveConfig {
        &self.config
    }

    /// Returns the reminder rules.
    pub fn reminder_policy(&self) -> ReminderPolicy {
        self.config.policy().reminder
    }

    /// Returns the allowance defaults.
    pub fn allowance_policy(&self) -> AllowancePolicy {
        self.config.policy().allowance
    }

    /// Returns every configured public holiday.
    pub fn public_holidays(&self) -> &[PublicHoliday] {
        self.config.public_holidays()
    }

    /// Returns the public holidays falling in `year`.
    pub fn public_holidays_in_year(&self, year: i32) -> Vec<PublicHoliday> {
        self.config
            .public_holidays()
            .iter()
            .filter(|h| h.date.year() == year)
            .cloned()
            .collect()
    }

    /// Checks if a date is a configured public holiday.
    pub fn is_public_holiday(&self, date: NaiveDate) -> bool {
        crate::models::is_public_holiday(self.config.public_holidays(), date)
    }
}
