//! In-memory store implementations.
//!
//! Records live in a `RwLock<HashMap>` keyed by id. Reads return clones, so
//! callers never hold a borrow into the store.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{Application, ApplicationStatus, Department, Person, SickNote};

use super::{ApplicationStore, DepartmentStore, SickNoteStore, StoreError};

#[derive(Debug)]
struct Table<T> {
    rows: RwLock<HashMap<Uuid, T>>,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Uuid, T>>, StoreError> {
        self.rows
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, T>>, StoreError> {
        self.rows
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn upsert(&self, id: Uuid, row: T) -> Result<T, StoreError> {
        self.write()?.insert(id, row.clone());
        Ok(row)
    }

    fn get(&self, id: Uuid) -> Result<Option<T>, StoreError> {
        Ok(self.read()?.get(&id).cloned())
    }

    fn filter(&self, predicate: impl Fn(&T) -> bool) -> Result<Vec<T>, StoreError> {
        Ok(self
            .read()?
            .values()
            .filter(|row| predicate(*row))
            .cloned()
            .collect())
    }
}

/// Departments kept in memory.
#[derive(Debug)]
pub struct InMemoryDepartmentStore {
    table: Table<Department>,
}

impl InMemoryDepartmentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryDepartmentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn by_name(mut departments: Vec<Department>) -> Vec<Department> {
    departments.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    departments
}

impl DepartmentStore for InMemoryDepartmentStore {
    fn save(&self, department: Department) -> Result<Department, StoreError> {
        self.table.upsert(department.id, department)
    }

    fn find_one(&self, id: Uuid) -> Result<Option<Department>, StoreError> {
        self.table.get(id)
    }

    fn find_all(&self) -> Result<Vec<Department>, StoreError> {
        self.table.filter(|_| true).map(by_name)
    }

    fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        match self.table.write()?.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }

    fn managed_departments(&self, head: &Person) -> Result<Vec<Department>, StoreError> {
        self.table.filter(|d| d.is_managed_by(head)).map(by_name)
    }

    fn assigned_departments(&self, member: &Person) -> Result<Vec<Department>, StoreError> {
        self.table.filter(|d| d.is_member(member)).map(by_name)
    }
}

/// Applications for leave kept in memory.
#[derive(Debug)]
pub struct InMemoryApplicationStore {
    table: Table<Application>,
}

impl InMemoryApplicationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryApplicationStore {
    fn default() -> Self {
        Self::new()
    }
}

fn by_start_date(mut applications: Vec<Application>) -> Vec<Application> {
    applications.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.id.cmp(&b.id)));
    applications
}

impl ApplicationStore for InMemoryApplicationStore {
    fn save(&self, application: Application) -> Result<Application, StoreError> {
        self.table.upsert(application.id, application)
    }

    fn find_one(&self, id: Uuid) -> Result<Option<Application>, StoreError> {
        self.table.get(id)
    }

    fn find_for_period_and_person(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        person: &Person,
    ) -> Result<Vec<Application>, StoreError> {
        self.table
            .filter(|a| a.person == *person && a.overlaps(from, to))
            .map(by_start_date)
    }

    fn find_for_period_and_status(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        status: ApplicationStatus,
    ) -> Result<Vec<Application>, StoreError> {
        self.table
            .filter(|a| a.has_status(status) && a.overlaps(from, to))
            .map(by_start_date)
    }
}

/// Sick notes kept in memory.
#[derive(Debug)]
pub struct InMemorySickNoteStore {
    table: Table<SickNote>,
}

impl InMemorySickNoteStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemorySickNoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SickNoteStore for InMemorySickNoteStore {
    fn save(&self, sick_note: SickNote) -> Result<SickNote, StoreError> {
        self.table.upsert(sick_note.id, sick_note)
    }

    fn find_one(&self, id: Uuid) -> Result<Option<SickNote>, StoreError> {
        self.table.get(id)
    }

    fn find_by_person(&self, person: &Person) -> Result<Vec<SickNote>, StoreError> {
        let mut notes = self.table.filter(|n| n.person == *person)?;
        notes.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.id.cmp(&b.id)));
        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayLength, VacationType};

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn holiday(person: &Person, start: &str, end: &str) -> Application {
        Application::new(
            person.clone(),
            make_date(start),
            make_date(end),
            VacationType::Holiday,
            DayLength::Full,
        )
    }

    #[test]
    fn test_department_save_replaces_existing_row() {
        let store = InMemoryDepartmentStore::new();
        let mut department = Department::new("Admins");
        store.save(department.clone()).unwrap();

        department.name = "Administrators".to_string();
        store.save(department.clone()).unwrap();

        let all = store.find_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Administrators");
    }

    #[test]
    fn test_department_find_all_orders_by_name() {
        let store = InMemoryDepartmentStore::new();
        store.save(Department::new("Marketing")).unwrap();
        store.save(Department::new("Admins")).unwrap();

        let names: Vec<String> = store.find_all().unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Admins", "Marketing"]);
    }

    #[test]
    fn test_department_delete_missing_is_not_found() {
        let store = InMemoryDepartmentStore::new();
        assert!(matches!(
            store.delete(Uuid::new_v4()),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn test_managed_and_assigned_departments() {
        let store = InMemoryDepartmentStore::new();
        let head = Person::new("head");
        let member = Person::new("member");
        store
            .save(
                Department::new("Admins")
                    .with_members(vec![member.clone()])
                    .with_department_heads(vec![head.clone()]),
            )
            .unwrap();
        store.save(Department::new("Empty")).unwrap();

        assert_eq!(store.managed_departments(&head).unwrap().len(), 1);
        assert!(store.managed_departments(&member).unwrap().is_empty());
        assert_eq!(store.assigned_departments(&member).unwrap().len(), 1);
        assert!(store.assigned_departments(&head).unwrap().is_empty());
    }

    #[test]
    fn test_applications_for_period_and_person_filters_on_overlap() {
        let store = InMemoryApplicationStore::new();
        let alice = Person::new("alice");
        let bob = Person::new("bob");
        store.save(holiday(&alice, "2026-08-03", "2026-08-07")).unwrap();
        store.save(holiday(&alice, "2026-09-01", "2026-09-02")).unwrap();
        store.save(holiday(&bob, "2026-08-03", "2026-08-07")).unwrap();

        let found = store
            .find_for_period_and_person(make_date("2026-08-01"), make_date("2026-08-31"), &alice)
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].person, alice);
        assert_eq!(found[0].start_date, make_date("2026-08-03"));
    }

    #[test]
    fn test_applications_for_period_and_status() {
        let store = InMemoryApplicationStore::new();
        let alice = Person::new("alice");
        let mut allowed = holiday(&alice, "2026-08-03", "2026-08-07");
        allowed.status = ApplicationStatus::Allowed;
        store.save(allowed).unwrap();
        store.save(holiday(&alice, "2026-08-10", "2026-08-11")).unwrap();

        let found = store
            .find_for_period_and_status(
                make_date("2026-08-01"),
                make_date("2026-08-31"),
                ApplicationStatus::Allowed,
            )
            .unwrap();

        assert_eq!(found.len(), 1);
        assert!(found[0].has_status(ApplicationStatus::Allowed));
    }

    #[test]
    fn test_sick_notes_by_person_are_ordered() {
        let store = InMemorySickNoteStore::new();
        let alice = Person::new("alice");
        store
            .save(SickNote::new(alice.clone(), make_date("2026-03-10"), make_date("2026-03-11")))
            .unwrap();
        store
            .save(SickNote::new(alice.clone(), make_date("2026-01-05"), make_date("2026-01-06")))
            .unwrap();
        store
            .save(SickNote::new(Person::new("bob"), make_date("2026-01-01"), make_date("2026-01-01")))
            .unwrap();

        let notes = store.find_by_person(&alice).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].start_date, make_date("2026-01-05"));
    }
}
