#![forbid(unsafe_code)]

//! Error taxonomy for the fetch boundary and logging setup.
//!
//! Fetch failures are values, not control flow: view-models capture a
//! [`FetchError`] and publish its message on a separate error channel while
//! the data channel keeps its last good value.

use std::fmt;

/// Failure reported by a data provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The fetch did not produce a payload. `reason` is display-ready.
    FetchFailed { reason: String },
}

impl FetchError {
    /// Build a [`FetchError::FetchFailed`] from any message.
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::FetchFailed {
            reason: reason.into(),
        }
    }

    /// The display-ready message carried by this error.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::FetchFailed { reason } => reason,
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchFailed { reason } => f.write_str(reason),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        Self::failed(err.to_string())
    }
}

/// Errors from logging initialisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    /// A global subscriber was already installed.
    AlreadyInitialised,
    /// The filter directive could not be parsed.
    InvalidFilter(String),
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInitialised => f.write_str("a global tracing subscriber is already set"),
            Self::InvalidFilter(msg) => write!(f, "invalid log filter: {msg}"),
        }
    }
}

impl std::error::Error for LoggingError {}
