//! Application services.
//!
//! Services combine the models with the store ports. They take "now" from an
//! injected [`mockable::Clock`] and log every change through `tracing`.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use leave_engine::config::ReminderPolicy;
//! use leave_engine::models::{Department, Person, Role};
//! use leave_engine::services::{ApplicationService, DepartmentService};
//! use leave_engine::store::{InMemoryApplicationStore, InMemoryDepartmentStore};
//! use mockable::DefaultClock;
//!
//! let clock = Arc::new(DefaultClock);
//! let applications = Arc::new(ApplicationService::new(
//!     Arc::new(InMemoryApplicationStore::new()),
//!     clock.clone(),
//!     ReminderPolicy::default(),
//! ));
//! let departments = DepartmentService::new(
//!     Arc::new(InMemoryDepartmentStore::new()),
//!     applications,
//!     clock,
//! );
//!
//! let head = Person::new("hammann").with_role(Role::DepartmentHead);
//! let member = Person::new("murygina");
//! departments
//!     .create(
//!         Department::new("Admins")
//!             .with_members(vec![member.clone()])
//!             .with_department_heads(vec![head.clone()]),
//!     )
//!     .unwrap();
//!
//! assert!(departments.is_department_head_of_person(&head, &member).unwrap());
//! ```

mod application;
mod department;
mod sick_note;

pub use application::ApplicationService;
pub use department::DepartmentService;
pub use sick_note::{DefaultSickNoteInteractionService, SickNoteInteractionService};
