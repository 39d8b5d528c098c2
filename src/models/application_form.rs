//! Submitted application form data.
//!
//! This is the shape a web form posts when someone applies for leave. It is
//! checked by [`crate::validation`] and then turned into an [`Application`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LeaveError, LeaveResult};

use super::{Application, DayLength, Person, VacationType};

/// Form data for a new application for leave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationForm {
    /// Category of leave.
    pub vacation_type: VacationType,
    /// Full day or half day ("how long").
    pub day_length: DayLength,
    /// First day, for full-day leave.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day, for full-day leave.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// The single day, for half-day leave.
    #[serde(default)]
    pub start_date_half: Option<NaiveDate>,
    /// Reason for the leave.
    #[serde(default)]
    pub reason: Option<String>,
    /// Stand-in during the leave.
    #[serde(default)]
    pub holiday_replacement: Option<Person>,
    /// Address and phone number during the leave.
    #[serde(default)]
    pub address: Option<String>,
    /// Whether the team has been told.
    #[serde(default)]
    pub team_informed: bool,
}

impl ApplicationForm {
    /// Creates a form with no dates and no reason.
    pub fn new(vacation_type: VacationType, day_length: DayLength) -> Self {
        Self {
            vacation_type,
            day_length,
            start_date: None,
            end_date: None,
            start_date_half: None,
            reason: None,
            holiday_replacement: None,
            address: None,
            team_informed: false,
        }
    }

    /// Returns the period the form asks for: start and end for full days,
    /// the half-day date twice otherwise.
    pub fn period(&self) -> Option<(NaiveDate, NaiveDate)> {
        if self.day_length.is_half_day() {
            self.start_date_half.map(|date| (date, date))
        } else {
            self.start_date.zip(self.end_date)
        }
    }

    /// Builds an application for `person`, submitted by `applier` on `today`.
    ///
    /// The form should have passed validation first; missing dates are
    /// reported as [`LeaveError::InvalidForm`].
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::{ApplicationForm, DayLength, Person, VacationType};
    /// use chrono::NaiveDate;
    ///
    /// let mut form = ApplicationForm::new(VacationType::Holiday, DayLength::Morning);
    /// form.start_date_half = NaiveDate::from_ymd_opt(2026, 5, 4);
    ///
    /// let person = Person::new("murygina");
    /// let today = NaiveDate::from_ymd_opt(2026, 4, 20).unwrap();
    /// let application = form.to_application(person.clone(), person, today).unwrap();
    /// assert_eq!(application.start_date, application.end_date);
    /// ```
    pub fn to_application(
        &self,
        person: Person,
        applier: Person,
        today: NaiveDate,
    ) -> LeaveResult<Application> {
        let (start_date, end_date) = self.period().ok_or_else(|| LeaveError::InvalidForm {
            field: self.missing_date_field().to_string(),
            message: "date is required".to_string(),
        })?;

        let mut application = Application::new(
            person,
            start_date,
            end_date,
            self.vacation_type,
            self.day_length,
        );
        application.applier = Some(applier);
        application.application_date = Some(today);
        application.reason = self.reason.clone();
        application.holiday_replacement = self.holiday_replacement.clone();
        application.address = self.address.clone();
        application.team_informed = self.team_informed;
        application.ensure_valid_period()?;
        application.ensure_reason()?;

        Ok(application)
    }

    fn missing_date_field(&self) -> &'static str {
        if self.day_length.is_half_day() {
            "start_date_half"
        } else if self.start_date.is_none() {
            "start_date"
        } else {
            "end_date"
        }
    }
}
