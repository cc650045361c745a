//! Contact validation
//!
//! Validation semantics:
//! - email must be syntactically well-formed
//! - email must be unique across every *other* contact in the store
//! - a contact with a present id excludes the record carrying that same
//!   id from the uniqueness check, so a saved contact re-validates
//!   against itself without a false collision
//! - a contact with no id yet checks against the whole store
//!
//! Validation never mutates the store. It rebuilds the contact's own
//! error list and reports the outcome as a value; failures are ordinary
//! control flow, never `Err`.
//!
//! Each distinct failure reason contributes at most one entry: syntax
//! problems collapse to a single `MalformedEmail` carrying the first
//! violated rule, uniqueness contributes at most one `DuplicateEmail`.

use thiserror::Error;

use super::record::Contact;
use crate::store::ContactStore;

/// A single validation failure reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Email is not syntactically well-formed
    #[error("malformed email address: {0}")]
    MalformedEmail(String),

    /// Email already belongs to another contact in the store
    #[error("this email is already taken")]
    DuplicateEmail,
}

/// Outcome of a validation pass.
///
/// Carries the same error list the contact now holds; callers branch on
/// `is_ok` and render the errors when it is false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// Returns whether the pass found no problems.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the failure reasons, in detection order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }
}

impl Contact {
    /// Validates this contact's email against the given store.
    ///
    /// Checks syntax, then uniqueness against every other contact
    /// (excluding the record with this contact's own id, if any).
    /// Rebuilds `self.errors` as a side effect; the store is untouched.
    pub fn validate(&mut self, store: &ContactStore) -> ValidationResult {
        let mut errors = Vec::new();

        if let Err(reason) = check_email_syntax(&self.email) {
            errors.push(ValidationError::MalformedEmail(reason));
        }

        let duplicate = store.iter().any(|other| {
            // Self-exclusion: skip the record that carries our own id.
            if self.id.is_some() && other.id == self.id {
                return false;
            }
            other.email == self.email
        });
        if duplicate {
            errors.push(ValidationError::DuplicateEmail);
        }

        self.errors = errors.clone();
        ValidationResult::new(errors)
    }
}

/// Checks that an address is syntactically plausible.
///
/// Returns the first violated rule as a display reason. This is a
/// deliberately small syntactic subset: one `@`, a non-empty local part,
/// a dotted domain, no whitespace or control characters.
pub fn check_email_syntax(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("address is empty".into());
    }
    if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err("address contains whitespace".into());
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = match parts.next() {
        Some(d) => d,
        None => return Err("address is missing '@'".into()),
    };

    if local.is_empty() {
        return Err("address has an empty local part".into());
    }
    if domain.contains('@') {
        return Err("address contains more than one '@'".into());
    }
    if domain.is_empty() {
        return Err("address has an empty domain".into());
    }
    if !domain.contains('.') {
        return Err("domain has no dot".into());
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return Err("domain starts or ends with a dot".into());
    }
    if domain.starts_with('-') || domain.ends_with('-') {
        return Err("domain starts or ends with a hyphen".into());
    }

    Ok(())
}
