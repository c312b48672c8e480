//! # Error Types
//!
//! This module defines error types used throughout the cebra library.
//!
//! Every builder operation validates its inputs before touching the chunk
//! list, so any error returned by a [`ZplBuilder`](crate::protocol::ZplBuilder)
//! method means nothing was emitted.

use thiserror::Error;

/// Main error type for cebra operations
#[derive(Debug, Error)]
pub enum CebraError {
    /// A firmware string or restriction pattern is not `V<major>.<minor>.<patch>`
    #[error("Firmware version '{0}' does not match V<major|x>.<minor|x>.<patch|x>")]
    Parse(String),

    /// A dynamically typed argument has the wrong kind
    #[error("Invalid type in {command}: expected {expected}")]
    InvalidType {
        command: &'static str,
        expected: &'static str,
    },

    /// Argument kind is right but the value is out of range or malformed
    #[error("Invalid value in {command}: {reason}")]
    InvalidValue {
        command: &'static str,
        reason: String,
    },

    /// The requested feature is not available on the declared firmware
    #[error("{command}: {feature} is not supported by firmware {firmware}")]
    FirmwareMismatch {
        command: &'static str,
        feature: String,
        firmware: String,
    },

    /// The generic emit primitive got a value that is not text, integer or bytes
    #[error("Unsupported argument type for {mnemonic}: {found}")]
    UnsupportedArgument { mnemonic: String, found: &'static str },

    /// Label job could not be decoded
    #[error("Label job error: {0}")]
    Job(String),

    /// Image loading error
    #[error("Image error: {0}")]
    Image(String),

    /// Device-level errors (opening or writing the printer device)
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CebraError {
    /// Shorthand for [`CebraError::InvalidValue`].
    pub(crate) fn invalid(command: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            command,
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate
pub type Result<T, E = CebraError> = std::result::Result<T, E>;
