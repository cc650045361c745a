//! CLI-specific error types
//!
//! Every CLI error terminates the invocation with a nonzero exit. The
//! codes are the stable prefix-tagged vocabulary printed to stderr.

use std::fmt;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// Store directory already initialized
    AlreadyInitialized,
    /// Store directory not initialized
    NotInitialized,
    /// Store operation failed (I/O or corruption)
    StoreError,
    /// Requested contact id does not exist
    NotFound,
    /// Candidate contact rejected by validation
    InvalidContact,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "CARDFILE_CLI_CONFIG_ERROR",
            Self::AlreadyInitialized => "CARDFILE_CLI_ALREADY_INITIALIZED",
            Self::NotInitialized => "CARDFILE_CLI_NOT_INITIALIZED",
            Self::StoreError => "CARDFILE_CLI_STORE_ERROR",
            Self::NotFound => "CARDFILE_CLI_NOT_FOUND",
            Self::InvalidContact => "CARDFILE_CLI_INVALID_CONTACT",
        }
    }
}

impl fmt::Display for CliErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// CLI error with code and message
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Configuration file missing or invalid
    pub fn config_error(message: impl Into<String>) -> Self {
        Self {
            code: CliErrorCode::ConfigError,
            message: message.into(),
        }
    }

    /// Store file already exists
    pub fn already_initialized(message: impl Into<String>) -> Self {
        Self {
            code: CliErrorCode::AlreadyInitialized,
            message: message.into(),
        }
    }

    /// Store file does not exist yet
    pub fn not_initialized(message: impl Into<String>) -> Self {
        Self {
            code: CliErrorCode::NotInitialized,
            message: message.into(),
        }
    }

    /// Load/save failure surfaced from the store
    pub fn store_error(message: impl Into<String>) -> Self {
        Self {
            code: CliErrorCode::StoreError,
            message: message.into(),
        }
    }

    /// Requested id is absent
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: CliErrorCode::NotFound,
            message: message.into(),
        }
    }

    /// Validation rejected the candidate contact
    pub fn invalid_contact(message: impl Into<String>) -> Self {
        Self {
            code: CliErrorCode::InvalidContact,
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
