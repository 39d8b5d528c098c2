//! Remaining vacation days.
//!
//! Holiday applications that are waiting or allowed use up the yearly
//! allowance. Only the working days that fall into the requested year count,
//! so leave spanning New Year is split between both years.

use rust_decimal::Decimal;

use crate::config::AllowancePolicy;
use crate::models::{Application, ApplicationStatus, Period, PublicHoliday, VacationType};

use super::work_days::count_work_days;

/// Vacation entitlement of one person for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allowance {
    /// The calendar year.
    pub year: i32,
    /// Days granted for the year.
    pub annual_days: Decimal,
    /// Days left over from the previous year.
    pub carried_over_days: Decimal,
}

impl Allowance {
    /// Builds the allowance for `year` from the configured defaults.
    ///
    /// `remaining_last_year` is capped at the policy's carry-over maximum and
    /// never goes below zero.
    pub fn from_policy(policy: &AllowancePolicy, year: i32, remaining_last_year: Decimal) -> Self {
        let carried_over_days = remaining_last_year
            .max(Decimal::ZERO)
            .min(policy.max_carry_over_days);
        Self {
            year,
            annual_days: policy.annual_vacation_days,
            carried_over_days,
        }
    }

    /// Annual plus carried-over days.
    pub fn total(&self) -> Decimal {
        self.annual_days + self.carried_over_days
    }
}

/// The result of a remaining vacation days calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacationDaysResult {
    /// The calendar year.
    pub year: i32,
    /// Annual plus carried-over days.
    pub entitlement: Decimal,
    /// Days used by waiting or allowed holiday applications in the year.
    pub used: Decimal,
    /// `entitlement - used`. May be negative if someone overdrew.
    pub remaining: Decimal,
}

/// Returns true if the application uses up vacation days.
pub fn counts_against_allowance(application: &Application) -> bool {
    application.vacation_type == VacationType::Holiday
        && matches!(
            application.status,
            ApplicationStatus::Waiting | ApplicationStatus::Allowed
        )
}

/// Calculates the days of `allowance` left after `applications`.
///
/// Applications of other types, rejected or cancelled applications, and
/// days outside `allowance.year` are ignored. An application with a reversed
/// period contributes nothing.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::{Allowance, remaining_vacation_days};
/// use leave_engine::models::{Application, DayLength, Person, VacationType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let allowance = Allowance {
///     year: 2026,
///     annual_days: Decimal::new(30, 0),
///     carried_over_days: Decimal::new(2, 0),
/// };
/// let application = Application::new(
///     Person::new("murygina"),
///     NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
///     VacationType::Holiday,
///     DayLength::Full,
/// );
///
/// let result = remaining_vacation_days(&allowance, &[application], &[]);
/// assert_eq!(result.remaining, Decimal::new(27, 0));
/// ```
pub fn remaining_vacation_days(
    allowance: &Allowance,
    applications: &[Application],
    holidays: &[PublicHoliday],
) -> VacationDaysResult {
    let used: Decimal = applications
        .iter()
        .filter(|a| counts_against_allowance(a))
        .filter_map(|a| {
            Period::new(a.start_date, a.end_date)
                .ok()
                .and_then(|p| p.clip_to_year(allowance.year))
                .map(|p| count_work_days(&p, holidays) * a.day_length.duration())
        })
        .sum();

    let entitlement = allowance.total();

    VacationDaysResult {
        year: allowance.year,
        entitlement,
        used,
        remaining: entitlement - used,
    }
}
