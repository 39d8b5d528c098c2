//! Leave Management Engine
//!
//! This crate provides the core of a leave management system: departments
//! and their heads, applications for leave with their approval lifecycle,
//! sick notes, form validation and vacation day accounting.
//!
//! Persistence is reached through the traits in [`store`]; in-memory
//! implementations are included for tests and small deployments.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod validation;

#[cfg(test)]
mod test_support;
