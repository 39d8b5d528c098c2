//! Department management and department-based lookups.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{LeaveError, LeaveResult};
use crate::models::{Application, ApplicationStatus, Department, Person, Role};
use crate::store::DepartmentStore;

use super::ApplicationService;

/// Creates, changes and queries departments.
pub struct DepartmentService {
    store: Arc<dyn DepartmentStore>,
    applications: Arc<ApplicationService>,
    clock: Arc<dyn Clock>,
}

impl DepartmentService {
    /// Creates the service.
    pub fn new(
        store: Arc<dyn DepartmentStore>,
        applications: Arc<ApplicationService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            applications,
            clock,
        }
    }

    /// Persists a new department, stamping its last modification time.
    pub fn create(&self, mut department: Department) -> LeaveResult<Department> {
        department.last_modification = Some(self.clock.utc());
        let saved = self.store.save(department)?;

        info!(department_id = %saved.id, name = %saved.name, "Created department");
        Ok(saved)
    }

    /// Persists changes to a department, stamping its last modification time.
    pub fn update(&self, mut department: Department) -> LeaveResult<Department> {
        department.last_modification = Some(self.clock.utc());
        let saved = self.store.save(department)?;

        info!(department_id = %saved.id, name = %saved.name, "Updated department");
        Ok(saved)
    }

    /// Fetches a department by id.
    pub fn get_department_by_id(&self, id: Uuid) -> LeaveResult<Option<Department>> {
        Ok(self.store.find_one(id)?)
    }

    /// Fetches every department.
    pub fn get_all_departments(&self) -> LeaveResult<Vec<Department>> {
        Ok(self.store.find_all()?)
    }

    /// Removes a department.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveError::IllegalState`] if no department with `id` exists.
    pub fn delete(&self, id: Uuid) -> LeaveResult<()> {
        if self.store.find_one(id)?.is_none() {
            warn!(department_id = %id, "Refused to delete unknown department");
            return Err(LeaveError::IllegalState {
                message: format!("cannot delete department {}: it does not exist", id),
            });
        }

        self.store.delete(id)?;
        info!(department_id = %id, "Deleted department");
        Ok(())
    }

    /// Departments managed by `head`.
    pub fn get_managed_departments_of_department_head(
        &self,
        head: &Person,
    ) -> LeaveResult<Vec<Department>> {
        Ok(self.store.managed_departments(head)?)
    }

    /// Departments `member` is assigned to.
    pub fn get_assigned_departments_of_member(
        &self,
        member: &Person,
    ) -> LeaveResult<Vec<Department>> {
        Ok(self.store.assigned_departments(member)?)
    }

    /// Every member of every department managed by `head`.
    ///
    /// A person belonging to several of those departments is listed once,
    /// at the position of its first appearance.
    pub fn get_managed_members_of_department_head(&self, head: &Person) -> LeaveResult<Vec<Person>> {
        let departments = self.get_managed_departments_of_department_head(head)?;

        let mut seen = HashSet::new();
        let members = departments
            .into_iter()
            .flat_map(|d| d.members)
            .filter(|m| seen.insert(m.login.clone()))
            .collect();

        Ok(members)
    }

    /// Returns true if `head` is a department head and manages a department
    /// `person` is a member of.
    pub fn is_department_head_of_person(&self, head: &Person, person: &Person) -> LeaveResult<bool> {
        if !head.has_role(Role::DepartmentHead) {
            return Ok(false);
        }

        let members = self.get_managed_members_of_department_head(head)?;
        Ok(members.contains(person))
    }

    /// Waiting and allowed applications of `person`'s colleagues touching any
    /// day of `[from, to]`.
    ///
    /// Colleagues are the other members of every department `person` is
    /// assigned to. The result is empty if `person` is in no department.
    pub fn get_applications_for_leave_of_members_in_departments_of_person(
        &self,
        person: &Person,
        from: NaiveDate,
        to: NaiveDate,
    ) -> LeaveResult<Vec<Application>> {
        let departments = self.get_assigned_departments_of_member(person)?;

        let mut result = Vec::new();
        for department in &departments {
            for member in department.members.iter().filter(|m| *m != person) {
                let applications = self
                    .applications
                    .get_applications_for_period_and_person(from, to, member)?;
                result.extend(applications.into_iter().filter(|a| {
                    matches!(
                        a.status,
                        ApplicationStatus::Waiting | ApplicationStatus::Allowed
                    )
                }));
            }
        }

        debug!(
            person = %person.login,
            departments = departments.len(),
            applications = result.len(),
            "Collected applications of department colleagues"
        );

        Ok(result)
    }
}
