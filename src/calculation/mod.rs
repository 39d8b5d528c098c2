//! Calculation logic for the Leave Management Engine.
//!
//! This module counts the working days a period of leave costs and derives
//! the vacation days a person has left in a year.

mod allowance;
mod work_days;

pub use allowance::{Allowance, VacationDaysResult, counts_against_allowance, remaining_vacation_days};
pub use work_days::{is_work_day, work_days};
