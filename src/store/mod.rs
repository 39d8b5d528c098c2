//! Persistence ports.
//!
//! Services only talk to storage through these traits so they can run
//! against the in-memory stores in [`memory`] or a real database adapter
//! living outside this crate.

pub mod memory;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{Application, ApplicationStatus, Department, Person, SickNote};

pub use memory::{InMemoryApplicationStore, InMemoryDepartmentStore, InMemorySickNoteStore};

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A record with the same identity already exists.
    #[error("record already exists")]
    Conflict,
    /// The record to change does not exist.
    #[error("record not found")]
    NotFound,
    /// The store cannot be reached or is in a broken state.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Storage for departments.
#[cfg_attr(test, mockall::automock)]
pub trait DepartmentStore: Send + Sync {
    /// Inserts or replaces the department with the same id.
    fn save(&self, department: Department) -> Result<Department, StoreError>;

    /// Fetches a department by id.
    fn find_one(&self, id: Uuid) -> Result<Option<Department>, StoreError>;

    /// Fetches every department, ordered by name.
    fn find_all(&self) -> Result<Vec<Department>, StoreError>;

    /// Removes a department.
    fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// Departments the given person manages.
    fn managed_departments(&self, head: &Person) -> Result<Vec<Department>, StoreError>;

    /// Departments the given person is a member of.
    fn assigned_departments(&self, member: &Person) -> Result<Vec<Department>, StoreError>;
}

/// Storage for applications for leave.
#[cfg_attr(test, mockall::automock)]
pub trait ApplicationStore: Send + Sync {
    /// Inserts or replaces the application with the same id.
    fn save(&self, application: Application) -> Result<Application, StoreError>;

    /// Fetches an application by id.
    fn find_one(&self, id: Uuid) -> Result<Option<Application>, StoreError>;

    /// Applications of `person` touching any day of `[from, to]`.
    fn find_for_period_and_person(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        person: &Person,
    ) -> Result<Vec<Application>, StoreError>;

    /// Applications in `status` touching any day of `[from, to]`.
    fn find_for_period_and_status(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        status: ApplicationStatus,
    ) -> Result<Vec<Application>, StoreError>;
}

/// Storage for sick notes.
#[cfg_attr(test, mockall::automock)]
pub trait SickNoteStore: Send + Sync {
    /// Inserts or replaces the sick note with the same id.
    fn save(&self, sick_note: SickNote) -> Result<SickNote, StoreError>;

    /// Fetches a sick note by id.
    fn find_one(&self, id: Uuid) -> Result<Option<SickNote>, StoreError>;

    /// All sick notes of a person, ordered by start date.
    fn find_by_person(&self, person: &Person) -> Result<Vec<SickNote>, StoreError>;
}
