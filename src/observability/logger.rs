//! Structured JSON logger
//!
//! Emits one line of valid JSON per typed store event:
//! - `event` key first, then `severity`, remaining fields sorted
//! - Synchronous, no buffering
//! - Stdout for TRACE/INFO/WARN, stderr for ERROR/FATAL
//!
//! The logger only speaks `Event`: free-form event names cannot enter
//! the log stream, so the string codes in `events` stay the complete
//! grep vocabulary.

use std::fmt::{self, Write as _};
use std::io::{self, Write};

use super::events::Event;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable, process exits
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Renders typed store events as one-line JSON records.
///
/// Rendering is deterministic: the same event and fields always produce
/// the same bytes, whatever order the fields were passed in.
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: Event, fields: &[(&str, &str)]) {
        let line = Self::render(severity, event, fields);
        if severity >= Severity::Error {
            Self::emit(&line, &mut io::stderr());
        } else {
            Self::emit(&line, &mut io::stdout());
        }
    }

    /// Builds the JSON line for one event.
    fn render(severity: Severity, event: Event, fields: &[(&str, &str)]) -> String {
        let mut sorted: Vec<(&str, &str)> = fields.to_vec();
        sorted.sort_by_key(|(key, _)| *key);

        let mut line = String::with_capacity(96);
        line.push('{');
        push_pair(&mut line, "event", event.as_str());
        line.push(',');
        push_pair(&mut line, "severity", severity.as_str());
        for (key, value) in sorted {
            line.push(',');
            push_pair(&mut line, key, value);
        }
        line.push_str("}\n");
        line
    }

    /// One write_all call, one line; logging failures are swallowed.
    fn emit<W: Write>(line: &str, writer: &mut W) {
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }
}

/// Appends `"key":"value"` with both sides JSON-escaped.
fn push_pair(out: &mut String, key: &str, value: &str) {
    out.push('"');
    write_escaped(out, key);
    out.push_str("\":\"");
    write_escaped(out, value);
    out.push('"');
}

/// JSON string escaping for quotes, backslashes, and control bytes.
fn write_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
}
