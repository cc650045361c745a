//! cardfile - a strict, single-writer contact record store
//!
//! The core is the record store abstraction: an ordered collection of
//! contacts with email validation and uniqueness rules, persisted as a
//! single checksummed binary blob that is rewritten whole on every
//! save. The CLI is a thin shell that performs exactly one store
//! operation per invocation.

pub mod cli;
pub mod contact;
pub mod observability;
pub mod store;
