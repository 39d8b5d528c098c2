//! Error types for the Leave Management Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while managing leave.
//! Form validation problems are not errors: they are returned as values by
//! [`crate::validation`].

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

/// The main error type for the Leave Management Engine.
///
/// # Example
///
/// ```
/// use leave_engine::error::LeaveError;
///
/// let error = LeaveError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
/// ```
#[derive(Debug, Error)]
pub enum LeaveError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The caller asked for something that can never succeed, such as
    /// deleting a department that was never persisted.
    #[error("Illegal state: {message}")]
    IllegalState {
        /// What was wrong.
        message: String,
    },

    /// No application for leave exists with the given id.
    #[error("Application for leave not found: {id}")]
    ApplicationNotFound {
        /// The requested id.
        id: Uuid,
    },

    /// No sick note exists with the given id.
    #[error("Sick note not found: {id}")]
    SickNoteNotFound {
        /// The requested id.
        id: Uuid,
    },

    /// The requested lifecycle step is not allowed from the current state.
    #[error("Invalid status transition for '{id}': {message}")]
    InvalidStatusTransition {
        /// The id of the application or sick note.
        id: Uuid,
        /// A description of the refused transition.
        message: String,
    },

    /// The owner of an application for leave tried to remind the deciders
    /// before the configured waiting time elapsed.
    ///
    /// Callers must report this back to the user.
    #[error("Too early to remind about application for leave: {message}")]
    ImpatientAboutApplicationForLeaveProcess {
        /// A user-facing explanation.
        message: String,
    },

    /// A reminder for the application was already sent today.
    #[error("Reminder for application for leave '{id}' was already sent on {date}")]
    RemindAlreadySent {
        /// The application id.
        id: Uuid,
        /// The date of the earlier reminder.
        date: NaiveDate,
    },

    /// A period ends before it starts.
    #[error("Invalid period: {start} is after {end}")]
    InvalidPeriod {
        /// The start of the period.
        start: NaiveDate,
        /// The end of the period.
        end: NaiveDate,
    },

    /// Form data could not be turned into a domain record.
    #[error("Invalid form field '{field}': {message}")]
    InvalidForm {
        /// The offending form field.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// The backing store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// A type alias for Results that return LeaveError.
pub type LeaveResult<T> = Result<T, LeaveError>;
