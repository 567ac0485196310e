#![forbid(unsafe_code)]

//! Logging configuration and optional tracing re-exports.
//!
//! With the `tracing` feature the usual `tracing` macros are re-exported at
//! the crate root. With `tracing-json` a global subscriber can be installed
//! from a [`LogConfig`], in either human-readable or JSON line format.

use std::fmt;

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

#[cfg(feature = "tracing-json")]
use crate::error::LoggingError;

/// Output format of the global subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parse `"json"` or `"pretty"` (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" | "text" => Some(Self::Pretty),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for the global tracing subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"fakenft_runtime=debug"`.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl LogConfig {
    /// Set the filter directive.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Set the output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// Install the global subscriber described by `config`.
///
/// Fails if the filter does not parse or a subscriber is already installed.
#[cfg(feature = "tracing-json")]
pub fn init(config: &LogConfig) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|err| LoggingError::InvalidFilter(err.to_string()))?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    installed.map_err(|_| LoggingError::AlreadyInitialised)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_format() {
        assert_eq!(LogFormat::parse("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse(" pretty "), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse("text"), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse("xml"), None);
    }

    #[test]
    fn default_config() {
        let config = LogConfig::default();
        assert_eq!(config.filter, "info");
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn builder_setters() {
        let config = LogConfig::default()
            .with_filter("fakenft_runtime=debug")
            .with_format(LogFormat::Json);
        assert_eq!(config.filter, "fakenft_runtime=debug");
        assert_eq!(config.format.to_string(), "json");
    }

    #[cfg(feature = "tracing-json")]
    #[test]
    fn invalid_filter_is_rejected() {
        let config = LogConfig::default().with_filter("fakenft=notalevel");
        assert!(matches!(init(&config), Err(LoggingError::InvalidFilter(_))));
    }
}
