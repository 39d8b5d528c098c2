//! Sick note model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LeaveError, LeaveResult};

use super::{DayLength, Person};

/// Kind of illness-related absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SickNoteType {
    /// The person is ill.
    SickNote,
    /// The person cares for an ill child.
    SickNoteChild,
}

/// A record of illness-related absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SickNote {
    /// Identity, assigned when the record is built.
    pub id: Uuid,
    /// The absent person.
    pub person: Person,
    /// First day of absence.
    pub start_date: NaiveDate,
    /// Last day of absence (inclusive).
    pub end_date: NaiveDate,
    /// Full or half day.
    pub day_length: DayLength,
    /// Kind of absence.
    pub sick_note_type: SickNoteType,
    /// First day covered by a certificate of incapacity, if any.
    #[serde(default)]
    pub aub_start_date: Option<NaiveDate>,
    /// Last day covered by a certificate of incapacity, if any.
    #[serde(default)]
    pub aub_end_date: Option<NaiveDate>,
    /// Date of the last change.
    #[serde(default)]
    pub last_edited: Option<NaiveDate>,
    /// False once cancelled or converted.
    pub active: bool,
    /// The application for leave this sick note was converted into.
    #[serde(default)]
    pub converted_application: Option<Uuid>,
}

impl SickNote {
    /// Creates an active full-day sick note with a fresh id.
    pub fn new(person: Person, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            person,
            start_date,
            end_date,
            day_length: DayLength::Full,
            sick_note_type: SickNoteType::SickNote,
            aub_start_date: None,
            aub_end_date: None,
            last_edited: None,
            active: true,
            converted_application: None,
        }
    }

    /// Returns true if a certificate of incapacity period is recorded.
    pub fn is_aub_present(&self) -> bool {
        self.aub_start_date.is_some() && self.aub_end_date.is_some()
    }

    /// Checks the period invariants of the note and its certificate.
    pub fn ensure_valid_period(&self) -> LeaveResult<()> {
        if self.start_date > self.end_date {
            return Err(LeaveError::InvalidPeriod {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if let (Some(start), Some(end)) = (self.aub_start_date, self.aub_end_date) {
            if start > end {
                return Err(LeaveError::InvalidPeriod { start, end });
            }
        }
        Ok(())
    }

    /// Refuses further changes to an inactive sick note.
    pub(crate) fn ensure_active(&self, action: &str) -> LeaveResult<()> {
        if self.active {
            Ok(())
        } else {
            Err(LeaveError::InvalidStatusTransition {
                id: self.id,
                message: format!("cannot {} an inactive sick note", action),
            })
        }
    }
}
