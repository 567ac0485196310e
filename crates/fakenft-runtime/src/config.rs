#![forbid(unsafe_code)]

//! Client configuration with environment overrides.
//!
//! | Variable                | Effect                                     |
//! |-------------------------|--------------------------------------------|
//! | `FAKENFT_FETCH_ON_INIT` | `1/true/yes/on` or `0/false/no/off`        |
//! | `FAKENFT_LOG`           | `EnvFilter` directive for the subscriber   |
//! | `FAKENFT_LOG_FORMAT`    | `json` or `pretty`                         |
//!
//! Unparseable values are ignored and the default is kept.

use fakenft_core::{LogConfig, LogFormat};

/// Runtime configuration shared by the view-models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Start fetching as soon as a view-model that supports it is built.
    pub fetch_on_init: bool,
    /// Global logging setup.
    pub log: LogConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            fetch_on_init: true,
            log: LogConfig::default(),
        }
    }
}

#[inline]
fn env_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl ClientConfig {
    /// Defaults overridden by the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by a custom environment lookup.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(flag) = get_env("FAKENFT_FETCH_ON_INIT").as_deref().and_then(env_flag) {
            config.fetch_on_init = flag;
        }
        if let Some(filter) = get_env("FAKENFT_LOG").filter(|f| !f.trim().is_empty()) {
            config.log.filter = filter.trim().to_string();
        }
        if let Some(format) = get_env("FAKENFT_LOG_FORMAT")
            .as_deref()
            .and_then(LogFormat::parse)
        {
            config.log.format = format;
        }
        config
    }

    #[must_use]
    pub fn with_fetch_on_init(mut self, enabled: bool) -> Self {
        self.fetch_on_init = enabled;
        self
    }

    #[must_use]
    pub fn with_log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    /// Install the global tracing subscriber described by `self.log`.
    #[cfg(feature = "tracing-json")]
    pub fn init_logging(&self) -> Result<(), fakenft_core::LoggingError> {
        fakenft_core::logging::init(&self.log)
    }
}
