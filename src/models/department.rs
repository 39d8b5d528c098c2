//! Department model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Person;

/// A named group of persons with its managers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    /// Identity, assigned when the record is built.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Time of the last create or update; stamped by the service.
    #[serde(default)]
    pub last_modification: Option<DateTime<Utc>>,
    /// Persons assigned to the department.
    #[serde(default)]
    pub members: Vec<Person>,
    /// Persons managing the department.
    #[serde(default)]
    pub department_heads: Vec<Person>,
}

impl Department {
    /// Creates an empty department with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            last_modification: None,
            members: Vec::new(),
            department_heads: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the member list.
    pub fn with_members(mut self, members: Vec<Person>) -> Self {
        self.members = members;
        self
    }

    /// Replaces the list of managers.
    pub fn with_department_heads(mut self, heads: Vec<Person>) -> Self {
        self.department_heads = heads;
        self
    }

    /// Returns true if the person is assigned to the department.
    pub fn is_member(&self, person: &Person) -> bool {
        self.members.contains(person)
    }

    /// Returns true if the person manages the department.
    pub fn is_managed_by(&self, person: &Person) -> bool {
        self.department_heads.contains(person)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_department_has_no_modification_stamp() {
        let department = Department::new("Admins").with_description("Keeps the lights on");

        assert_eq!(department.name, "Admins");
        assert_eq!(department.description.as_deref(), Some("Keeps the lights on"));
        assert!(department.last_modification.is_none());
        assert!(department.members.is_empty());
    }

    #[test]
    fn test_membership_and_management() {
        let head = Person::new("head");
        let member = Person::new("member");
        let department = Department::new("Marketing")
            .with_members(vec![member.clone(), head.clone()])
            .with_department_heads(vec![head.clone()]);

        assert!(department.is_member(&member));
        assert!(department.is_member(&head));
        assert!(department.is_managed_by(&head));
        assert!(!department.is_managed_by(&member));
        assert!(!department.is_member(&Person::new("stranger")));
    }

    #[test]
    fn test_deserialize_department_with_defaults() {
        let json = r#"{
            "id": "6f1c7a52-0d3e-4c1f-9a55-2f0c2d9b7e11",
            "name": "Admins"
        }"#;

        let department: Department = serde_json::from_str(json).unwrap();
        assert_eq!(department.name, "Admins");
        assert!(department.members.is_empty());
        assert!(department.department_heads.is_empty());
    }
}
