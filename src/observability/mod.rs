//! Observability subsystem
//!
//! Structured one-line JSON logging plus a typed event vocabulary for
//! store lifecycle operations.
//!
//! # Principles
//!
//! 1. Observability is read-only; no side effects on store state
//! 2. No async, no background threads
//! 3. Deterministic output, byte for byte

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event with fields.
///
/// Fatal events go to stderr at FATAL severity, everything else is INFO
/// on stdout.
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event, fields);
}
