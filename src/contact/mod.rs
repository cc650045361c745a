//! Contact records and their validation rules
//!
//! A `Contact` is the unit of storage: identity, name, email, plus a
//! transient validation error list. Validation checks email syntax and
//! collection-wide uniqueness and reports the outcome as a value.

mod record;
mod validate;

pub use record::Contact;
pub use validate::{check_email_syntax, ValidationError, ValidationResult};
