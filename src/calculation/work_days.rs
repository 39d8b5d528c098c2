//! Working day counting.
//!
//! A working day is a Monday to Friday that is not a public holiday.
//! Half-day leave costs half a working day.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::error::LeaveResult;
use crate::models::{DayLength, Period, PublicHoliday, is_public_holiday};

/// Returns true if `date` is a Monday to Friday that is not a public holiday.
pub fn is_work_day(date: NaiveDate, holidays: &[PublicHoliday]) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !is_public_holiday(holidays, date)
}

/// Counts the vacation days the period `[start, end]` costs.
///
/// Every working day in the period is weighted with the value of
/// `day_length` (1 for full days, 0.5 for half days).
///
/// # Errors
///
/// Returns [`LeaveError::InvalidPeriod`](crate::error::LeaveError::InvalidPeriod)
/// if `start` is after `end`.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::work_days;
/// use leave_engine::models::DayLength;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// // Monday 2026-08-03 to Sunday 2026-08-09
/// let start = NaiveDate::from_ymd_opt(2026, 8, 3).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 8, 9).unwrap();
///
/// let days = work_days(start, end, DayLength::Full, &[]).unwrap();
/// assert_eq!(days, Decimal::new(5, 0));
/// ```
pub fn work_days(
    start: NaiveDate,
    end: NaiveDate,
    day_length: DayLength,
    holidays: &[PublicHoliday],
) -> LeaveResult<Decimal> {
    let period = Period::new(start, end)?;
    Ok(count_work_days(&period, holidays) * day_length.duration())
}

pub(crate) fn count_work_days(period: &Period, holidays: &[PublicHoliday]) -> Decimal {
    let count = period.days().filter(|d| is_work_day(*d, holidays)).count();
    Decimal::from(count)
}
