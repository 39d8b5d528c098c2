//! Date periods and public holidays.
//!
//! This module contains the [`Period`] and [`PublicHoliday`] types used when
//! counting the vacation days an application for leave costs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LeaveError, LeaveResult};

/// Represents a public holiday on which nobody needs to take leave.
///
/// # Example
///
/// ```
/// use leave_engine::models::PublicHoliday;
/// use chrono::NaiveDate;
///
/// let holiday = PublicHoliday {
///     date: NaiveDate::from_ymd_opt(2026, 10, 3).unwrap(),
///     name: "Tag der Deutschen Einheit".to_string(),
///     region: "national".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The date of the public holiday.
    pub date: NaiveDate,
    /// The name of the public holiday.
    pub name: String,
    /// The region where this holiday applies (e.g., "national", "BW").
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "national".to_string()
}

/// An inclusive range of calendar days.
///
/// # Example
///
/// ```
/// use leave_engine::models::Period;
/// use chrono::NaiveDate;
///
/// let period = Period::new(
///     NaiveDate::from_ymd_opt(2026, 12, 21).unwrap(),
///     NaiveDate::from_ymd_opt(2027, 1, 8).unwrap(),
/// ).unwrap();
///
/// let in_2026 = period.clip_to_year(2026).unwrap();
/// assert_eq!(in_2026.end_date, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// The first day (inclusive).
    pub start_date: NaiveDate,
    /// The last day (inclusive).
    pub end_date: NaiveDate,
}

impl Period {
    /// Creates a period, refusing one that ends before it starts.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> LeaveResult<Self> {
        if start_date > end_date {
            return Err(LeaveError::InvalidPeriod {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// The whole calendar year.
    pub fn year(year: i32) -> LeaveResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1);
        let end = NaiveDate::from_ymd_opt(year, 12, 31);
        match start.zip(end) {
            Some((start_date, end_date)) => Self::new(start_date, end_date),
            None => Err(LeaveError::InvalidForm {
                field: "year".to_string(),
                message: format!("year {} is out of range", year),
            }),
        }
    }

    /// Checks if a given date falls within this period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns the days shared with `other`, if any.
    pub fn intersect(&self, other: &Period) -> Option<Period> {
        let start_date = self.start_date.max(other.start_date);
        let end_date = self.end_date.min(other.end_date);
        (start_date <= end_date).then_some(Period {
            start_date,
            end_date,
        })
    }

    /// Returns the part of the period that lies in `year`, if any.
    pub fn clip_to_year(&self, year: i32) -> Option<Period> {
        Period::year(year).ok().and_then(|y| self.intersect(&y))
    }

    /// Iterates over every day of the period.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |date| *date <= self.end_date)
    }
}

/// Checks if a given date is listed as a public holiday.
pub fn is_public_holiday(holidays: &[PublicHoliday], date: NaiveDate) -> bool {
    holidays.iter().any(|h| h.date == date)
}
