//! Configuration types for leave management.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::PublicHoliday;

/// When the owner of a waiting application may remind the deciders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ReminderPolicy {
    /// Days that must pass after applying before the first reminder.
    pub min_days_before_reminding: u32,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self {
            min_days_before_reminding: 2,
        }
    }
}

/// Default vacation entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AllowancePolicy {
    /// Vacation days per full year.
    pub annual_vacation_days: Decimal,
    /// Upper bound for days carried over from the previous year.
    pub max_carry_over_days: Decimal,
}

impl Default for AllowancePolicy {
    fn default() -> Self {
        Self {
            annual_vacation_days: Decimal::new(30, 0),
            max_carry_over_days: Decimal::new(10, 0),
        }
    }
}

/// Policy configuration from policy.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyConfig {
    /// Reminder rules.
    #[serde(default)]
    pub reminder: ReminderPolicy,
    /// Allowance defaults.
    #[serde(default)]
    pub allowance: AllowancePolicy,
}

/// Public holidays configuration from holidays.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HolidaysConfig {
    /// Non-working days that cost no vacation.
    #[serde(default)]
    pub public_holidays: Vec<PublicHoliday>,
}

/// The complete configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct LeaveConfig {
    policy: PolicyConfig,
    /// Sorted by date.
    public_holidays: Vec<PublicHoliday>,
}

impl LeaveConfig {
    /// Creates a LeaveConfig from its component parts.
    pub fn new(policy: PolicyConfig, holidays: HolidaysConfig) -> Self {
        let mut public_holidays = holidays.public_holidays;
        public_holidays.sort_by(|a, b| a.date.cmp(&b.date));
        Self {
            policy,
            public_holidays,
        }
    }

    /// Returns the policy configuration.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Returns all public holidays, oldest first.
    pub fn public_holidays(&self) -> &[PublicHoliday] {
        &self.public_holidays
    }
}
