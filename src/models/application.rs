//! Application for leave and its lifecycle.
//!
//! An [`Application`] is created in the `Waiting` state when someone applies
//! for leave, decided by a boss or department head (`Allowed` or `Rejected`)
//! and may later be `Cancelled`. Applications are never deleted.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LeaveError, LeaveResult};

use super::Person;

/// Lifecycle state of an application for leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Submitted, waiting for a decision.
    Waiting,
    /// Allowed by a boss or department head.
    Allowed,
    /// Rejected by a boss or department head.
    Rejected,
    /// Cancelled by the owner or the office.
    Cancelled,
}

impl ApplicationStatus {
    /// Returns the snake_case label used in logs and serialized records.
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Waiting => "waiting",
            ApplicationStatus::Allowed => "allowed",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category of leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VacationType {
    /// Regular paid vacation, deducted from the yearly allowance.
    Holiday,
    /// Special leave (wedding, move, ...); needs a reason.
    SpecialLeave,
    /// Unpaid leave; needs a reason.
    UnpaidLeave,
    /// Time off against overtime; needs a reason.
    Overtime,
}

/// Whether a leave day is a full day or a half day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayLength {
    /// The whole working day.
    Full,
    /// The first half of the working day.
    Morning,
    /// The second half of the working day.
    Noon,
}

impl DayLength {
    /// Fraction of a working day this length stands for.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::DayLength;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(DayLength::Full.duration(), Decimal::ONE);
    /// assert_eq!(DayLength::Morning.duration(), Decimal::new(5, 1));
    /// ```
    pub fn duration(self) -> Decimal {
        match self {
            DayLength::Full => Decimal::ONE,
            DayLength::Morning | DayLength::Noon => Decimal::new(5, 1),
        }
    }

    /// Returns true for `Morning` and `Noon`.
    pub fn is_half_day(self) -> bool {
        self != DayLength::Full
    }
}

/// Raw signature image bytes.
///
/// The buffer is owned by the signature; readers borrow it with
/// [`Signature::as_bytes`] or take their own copy with [`Signature::to_vec`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(Vec<u8>);

impl Signature {
    /// Wraps the given bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Borrows the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Copies the raw bytes out.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.clone()
    }

    /// Number of bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the signature holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({} bytes)", self.0.len())
    }
}

/// An application for leave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    /// Identity, assigned when the record is built.
    pub id: Uuid,
    /// The person taking the leave.
    pub person: Person,
    /// The person who submitted the application (the owner or the office).
    pub applier: Option<Person>,
    /// The person who allowed or rejected the application.
    pub boss: Option<Person>,
    /// The person who cancelled the application.
    pub canceller: Option<Person>,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Category of leave.
    pub vacation_type: VacationType,
    /// Full or half day.
    pub day_length: DayLength,
    /// Reason; required for everything except plain holidays.
    pub reason: Option<String>,
    /// Who stands in during the leave.
    pub holiday_replacement: Option<Person>,
    /// Address and phone number during the leave.
    pub address: Option<String>,
    /// Date the application was submitted.
    pub application_date: Option<NaiveDate>,
    /// Date the application was cancelled.
    pub cancel_date: Option<NaiveDate>,
    /// Date the application was allowed or rejected.
    pub edited_date: Option<NaiveDate>,
    /// Date the deciders were last reminded.
    pub remind_date: Option<NaiveDate>,
    /// Current lifecycle state.
    pub status: ApplicationStatus,
    /// Signature of the applicant.
    pub signature_person: Option<Signature>,
    /// Signature of the deciding boss.
    pub signature_boss: Option<Signature>,
    /// Whether the team has been told about the leave.
    pub team_informed: bool,
    /// Set when an allowed application gets cancelled.
    #[serde(default)]
    pub formerly_allowed: bool,
}

impl Application {
    /// Creates a waiting application with a fresh id and no audit data.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::{Application, ApplicationStatus, DayLength, Person, VacationType};
    /// use chrono::NaiveDate;
    ///
    /// let application = Application::new(
    ///     Person::new("murygina"),
    ///     NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
    ///     NaiveDate::from_ymd_opt(2026, 8, 14).unwrap(),
    ///     VacationType::Holiday,
    ///     DayLength::Full,
    /// );
    /// assert!(application.has_status(ApplicationStatus::Waiting));
    /// ```
    pub fn new(
        person: Person,
        start_date: NaiveDate,
        end_date: NaiveDate,
        vacation_type: VacationType,
        day_length: DayLength,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            person,
            applier: None,
            boss: None,
            canceller: None,
            start_date,
            end_date,
            vacation_type,
            day_length,
            reason: None,
            holiday_replacement: None,
            address: None,
            application_date: None,
            cancel_date: None,
            edited_date: None,
            remind_date: None,
            status: ApplicationStatus::Waiting,
            signature_person: None,
            signature_boss: None,
            team_informed: false,
            formerly_allowed: false,
        }
    }

    /// Returns true if the application is in the given state.
    pub fn has_status(&self, status: ApplicationStatus) -> bool {
        self.status == status
    }

    /// Returns true if the application was allowed before it got cancelled.
    pub fn is_formerly_allowed(&self) -> bool {
        self.has_status(ApplicationStatus::Cancelled) && self.formerly_allowed
    }

    /// Returns true if the leave touches any day of `[from, to]`.
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start_date <= to && self.end_date >= from
    }

    /// Checks the period invariant.
    pub fn ensure_valid_period(&self) -> LeaveResult<()> {
        if self.start_date > self.end_date {
            return Err(LeaveError::InvalidPeriod {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// Checks that every type of leave other than a plain holiday carries a
    /// non-blank reason.
    pub fn ensure_reason(&self) -> LeaveResult<()> {
        let blank = self.reason.as_deref().is_none_or(|r| r.trim().is_empty());
        if self.vacation_type != VacationType::Holiday && blank {
            return Err(LeaveError::InvalidForm {
                field: "reason".to_string(),
                message: format!("a reason is required for {:?}", self.vacation_type),
            });
        }
        Ok(())
    }

    /// Records a positive decision.
    pub(crate) fn allow(
        &mut self,
        boss: Person,
        today: NaiveDate,
        signature: Option<Signature>,
    ) -> LeaveResult<()> {
        self.decide(ApplicationStatus::Allowed, boss, today, signature)
    }

    /// Records a negative decision.
    pub(crate) fn reject(
        &mut self,
        boss: Person,
        today: NaiveDate,
        signature: Option<Signature>,
    ) -> LeaveResult<()> {
        self.decide(ApplicationStatus::Rejected, boss, today, signature)
    }

    fn decide(
        &mut self,
        outcome: ApplicationStatus,
        boss: Person,
        today: NaiveDate,
        signature: Option<Signature>,
    ) -> LeaveResult<()> {
        if self.status != ApplicationStatus::Waiting {
            return Err(self.refused(outcome));
        }
        self.status = outcome;
        self.boss = Some(boss);
        self.edited_date = Some(today);
        if signature.is_some() {
            self.signature_boss = signature;
        }
        Ok(())
    }

    /// Cancels a waiting or allowed application.
    pub(crate) fn cancel(&mut self, canceller: Person, today: NaiveDate) -> LeaveResult<()> {
        match self.status {
            ApplicationStatus::Waiting | ApplicationStatus::Allowed => {
                self.formerly_allowed = self.status == ApplicationStatus::Allowed;
                self.status = ApplicationStatus::Cancelled;
                self.canceller = Some(canceller);
                self.cancel_date = Some(today);
                Ok(())
            }
            ApplicationStatus::Rejected | ApplicationStatus::Cancelled => {
                Err(self.refused(ApplicationStatus::Cancelled))
            }
        }
    }

    fn refused(&self, target: ApplicationStatus) -> LeaveError {
        LeaveError::InvalidStatusTransition {
            id: self.id,
            message: format!("cannot move from {} to {}", self.status, target),
        }
    }
}
