//! Contact record type
//!
//! A contact is identity + name + email plus a transient validation
//! error list. The error list is rebuilt on every validation pass and is
//! never persisted; contacts decoded from disk always start clean.
//!
//! Identity rules:
//! - `id` is absent until the store first appends the contact
//! - once assigned, the id is immutable for the life of the record
//! - within one store, present ids are pairwise distinct

use std::fmt;

use super::validate::ValidationError;

/// A single address-book entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Store-assigned identity; `None` until first successful append
    pub id: Option<u64>,
    /// Display name, free-form
    pub name: String,
    /// Email address, constrained only at validation time
    pub email: String,
    /// Transient validation state; never persisted
    pub(crate) errors: Vec<ValidationError>,
}

impl Contact {
    /// Creates a candidate contact with no identity and no errors.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            errors: Vec::new(),
        }
    }

    /// Reconstructs a contact from its persisted fields.
    ///
    /// The validation error list is transient state and starts empty.
    pub(crate) fn from_parts(id: Option<u64>, name: String, email: String) -> Self {
        Self {
            id,
            name,
            email,
            errors: Vec::new(),
        }
    }

    /// Returns the validation errors recorded by the last `validate` call.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Joins all current validation errors into a single display string.
    ///
    /// Comma-separated; empty when the last validation pass was clean or
    /// no pass has run.
    pub fn format_errors(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "[{}] {} <{}>", id, self.name, self.email),
            None => write!(f, "[-] {} <{}>", self.name, self.email),
        }
    }
}
