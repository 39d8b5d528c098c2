//! Core data models for the Leave Management Engine.
//!
//! This module contains all the domain records used throughout the engine.

mod application;
mod application_form;
mod department;
mod period;
mod person;
mod sick_note;

pub use application::{Application, ApplicationStatus, DayLength, Signature, VacationType};
pub use application_form::ApplicationForm;
pub use department::Department;
pub use period::{Period, PublicHoliday, is_public_holiday};
pub use person::{Person, Role};
pub use sick_note::{SickNote, SickNoteType};
