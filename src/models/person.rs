//! Person model and roles.
//!
//! Persons are shared reference records: applications, departments and sick
//! notes point at them but none of them owns a person.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Roles a person can hold, used for authorization decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A regular employee.
    User,
    /// Manages one or more departments and decides about their members' leave.
    DepartmentHead,
    /// May decide about every application for leave.
    Boss,
    /// Administrative staff; may act on behalf of other persons.
    Office,
    /// Deactivated account.
    Inactive,
}

/// A person known to the system.
///
/// Identity is the `login`: two values with the same login are the same
/// person, whatever their other fields say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Unique login name.
    pub login: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Contact address, if known.
    #[serde(default)]
    pub email: Option<String>,
    /// Roles held by the person.
    #[serde(default)]
    pub roles: BTreeSet<Role>,
}

impl Person {
    /// Creates a person with the given login, no names and the `User` role.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::{Person, Role};
    ///
    /// let head = Person::new("hammann").with_role(Role::DepartmentHead);
    /// assert!(head.has_role(Role::User));
    /// assert!(head.has_role(Role::DepartmentHead));
    /// assert!(!head.has_role(Role::Office));
    /// ```
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            first_name: String::new(),
            last_name: String::new(),
            email: None,
            roles: BTreeSet::from([Role::User]),
        }
    }

    /// Sets the given and family name.
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Adds a role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }

    /// Returns true if the person holds the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Display name: "first last", falling back to the login.
    pub fn nice_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.login.clone()
        } else {
            name.to_string()
        }
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.login == other.login
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.login.hash(state);
    }
}
