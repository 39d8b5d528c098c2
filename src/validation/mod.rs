//! Validation of submitted application forms.
//!
//! Validation never fails: every rule that does not hold adds a
//! [`ValidationError`] to the returned list and the caller decides how to
//! show them.

mod application_validator;

pub use application_validator::{
    ErrorCode, FormField, ValidationError, has_field_error, validate, validate_for_user,
};
