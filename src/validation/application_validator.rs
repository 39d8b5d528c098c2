//! Rules for the application-for-leave form.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::models::{ApplicationForm, DayLength, VacationType};

/// Error codes reported by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCode {
    /// A required field is empty.
    #[serde(rename = "error.mandatory.field")]
    MandatoryField,
    /// The period ends before it starts.
    #[serde(rename = "error.period")]
    Period,
    /// The period starts in the past.
    #[serde(rename = "error.period.past")]
    PeriodPast,
}

impl ErrorCode {
    /// The message key shown to the user.
    pub const fn code(self) -> &'static str {
        match self {
            ErrorCode::MandatoryField => "error.mandatory.field",
            ErrorCode::Period => "error.period",
            ErrorCode::PeriodPast => "error.period.past",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Form fields a validation error can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    /// [`ApplicationForm::start_date`].
    StartDate,
    /// [`ApplicationForm::end_date`].
    EndDate,
    /// [`ApplicationForm::start_date_half`].
    StartDateHalf,
    /// [`ApplicationForm::reason`].
    Reason,
}

/// One failed rule. `field` is `None` for errors about the form as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// The offending field, if the error belongs to a single field.
    pub field: Option<FormField>,
    /// What went wrong.
    pub code: ErrorCode,
}

impl ValidationError {
    fn on_field(field: FormField, code: ErrorCode) -> Self {
        Self {
            field: Some(field),
            code,
        }
    }

    fn global(code: ErrorCode) -> Self {
        Self { field: None, code }
    }
}

/// Checks that the form is filled in completely and consistently.
///
/// - full days need a start and an end date, and the start must not be after
///   the end;
/// - half days need the half-day date;
/// - everything except a plain holiday needs a non-blank reason.
///
/// # Examples
///
/// ```
/// use leave_engine::models::{ApplicationForm, DayLength, VacationType};
/// use leave_engine::validation::{validate, ErrorCode, FormField};
///
/// let form = ApplicationForm::new(VacationType::UnpaidLeave, DayLength::Morning);
/// let errors = validate(&form);
///
/// assert_eq!(errors.len(), 2);
/// assert!(errors.iter().any(|e| e.field == Some(FormField::StartDateHalf)));
/// assert!(errors.iter().any(|e| e.field == Some(FormField::Reason)
///     && e.code == ErrorCode::MandatoryField));
/// ```
pub fn validate(form: &ApplicationForm) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if form.day_length == DayLength::Full {
        if form.start_date.is_none() {
            errors.push(ValidationError::on_field(
                FormField::StartDate,
                ErrorCode::MandatoryField,
            ));
        }
        if form.end_date.is_none() {
            errors.push(ValidationError::on_field(
                FormField::EndDate,
                ErrorCode::MandatoryField,
            ));
        }
        if let (Some(start), Some(end)) = (form.start_date, form.end_date) {
            if start > end {
                errors.push(ValidationError::global(ErrorCode::Period));
            }
        }
    } else if form.start_date_half.is_none() {
        errors.push(ValidationError::on_field(
            FormField::StartDateHalf,
            ErrorCode::MandatoryField,
        ));
    }

    if form.vacation_type != VacationType::Holiday && !has_text(form.reason.as_deref()) {
        errors.push(ValidationError::on_field(
            FormField::Reason,
            ErrorCode::MandatoryField,
        ));
    }

    debug!(
        vacation_type = ?form.vacation_type,
        day_length = ?form.day_length,
        error_count = errors.len(),
        "Validated application form"
    );

    errors
}

/// Extra check for persons applying for themselves: the leave must not start
/// before `today`.
///
/// Both sides are calendar dates, so a leave starting today passes. Comparing
/// the start (taken as midnight) against the current instant would reject
/// every same-day request made after midnight.
///
/// The office applies on behalf of others and may enter past leave, so this
/// check is not run for office submissions.
pub fn validate_for_user(form: &ApplicationForm, today: NaiveDate) -> Vec<ValidationError> {
    let (field, start) = if form.day_length == DayLength::Full {
        (FormField::StartDate, form.start_date)
    } else {
        (FormField::StartDateHalf, form.start_date_half)
    };

    match start {
        Some(date) if date < today => {
            debug!(start = %date, today = %today, "Application form starts in the past");
            vec![ValidationError::on_field(field, ErrorCode::PeriodPast)]
        }
        _ => Vec::new(),
    }
}

/// Returns true if `errors` holds `code` for `field`.
pub fn has_field_error(errors: &[ValidationError], field: FormField, code: ErrorCode) -> bool {
    errors
        .iter()
        .any(|e| e.field == Some(field) && e.code == code)
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|s| !s.trim().is_empty())
}
