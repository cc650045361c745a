//! Observable store lifecycle events
//!
//! Every externally driven store operation emits one of these. Events
//! are explicit and typed; the string codes are the stable interface
//! for anything that greps the logs.

use std::fmt;

/// Observable events in cardfile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Store file created by init
    StoreCreated,
    /// Store loaded from disk
    StoreLoaded,
    /// Store re-persisted to disk
    StoreSaved,
    /// Contact appended (validated, id assigned)
    ContactAppended,
    /// Contact edited in place
    ContactUpdated,
    /// Contact removed
    ContactRemoved,
    /// Candidate rejected by validation; nothing persisted
    ValidationRejected,
    /// Store blob failed to decode (FATAL)
    CorruptionDetected,
}

impl Event {
    /// Returns the string code of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::StoreCreated => "STORE_CREATED",
            Event::StoreLoaded => "STORE_LOADED",
            Event::StoreSaved => "STORE_SAVED",
            Event::ContactAppended => "CONTACT_APPENDED",
            Event::ContactUpdated => "CONTACT_UPDATED",
            Event::ContactRemoved => "CONTACT_REMOVED",
            Event::ValidationRejected => "VALIDATION_REJECTED",
            Event::CorruptionDetected => "STORE_CORRUPTION",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::CorruptionDetected)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_codes_are_stable() {
        assert_eq!(Event::StoreCreated.as_str(), "STORE_CREATED");
        assert_eq!(Event::StoreLoaded.as_str(), "STORE_LOADED");
        assert_eq!(Event::StoreSaved.as_str(), "STORE_SAVED");
        assert_eq!(Event::ContactAppended.as_str(), "CONTACT_APPENDED");
        assert_eq!(Event::ContactUpdated.as_str(), "CONTACT_UPDATED");
        assert_eq!(Event::ContactRemoved.as_str(), "CONTACT_REMOVED");
        assert_eq!(Event::ValidationRejected.as_str(), "VALIDATION_REJECTED");
        assert_eq!(Event::CorruptionDetected.as_str(), "STORE_CORRUPTION");
    }

    #[test]
    fn test_only_corruption_is_fatal() {
        assert!(Event::CorruptionDetected.is_fatal());
        assert!(!Event::StoreLoaded.is_fatal());
        assert!(!Event::ValidationRejected.is_fatal());
    }
}
