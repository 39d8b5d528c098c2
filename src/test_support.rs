//! Shared test doubles for service tests.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, NaiveDate, TimeDelta, Utc};
use mockable::Clock;

use crate::models::{Person, Role};

/// A clock pinned to noon UTC of a given day that tests can move forward.
pub struct FixtureClock(Mutex<DateTime<Utc>>);

impl FixtureClock {
    pub fn on(date: &str) -> Self {
        let now = make_date(date)
            .and_hms_opt(12, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_else(|| panic!("invalid fixture date {date}"));
        Self(Mutex::new(now))
    }

    pub fn advance_days(&self, days: i64) {
        *self.lock_clock() += TimeDelta::days(days);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0.lock().expect("clock mutex")
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

pub fn fixture_clock(date: &str) -> Arc<FixtureClock> {
    Arc::new(FixtureClock::on(date))
}

pub fn make_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

pub fn person(login: &str) -> Person {
    Person::new(login)
}

pub fn department_head(login: &str) -> Person {
    Person::new(login).with_role(Role::DepartmentHead)
}
