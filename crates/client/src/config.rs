//! API configuration.
//!
//! The base URL is process-wide: load it once at startup with
//! [`ApiConfig::from_env`], [`install`] it before the first client call,
//! and read it back with [`installed`]. It cannot change afterwards.

use std::sync::OnceLock;

use crate::error::ConfigError;

/// Base URL used when `ROSTER_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// URL scheme selecting the in-process fixture backend.
pub const IN_MEMORY_SCHEME: &str = "memory:";

static INSTALLED: OnceLock<ApiConfig> = OnceLock::new();

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without trailing slash, e.g. `http://localhost:8080/api`.
    pub base_url: String,
    /// Per-request timeout. `None` (the default) means requests may wait
    /// forever, leaving the screen in its loading state.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout_secs: None,
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                      |
    /// |-------------------------------|------------------------------|
    /// | `ROSTER_API_URL`              | `http://localhost:8080/api`  |
    /// | `ROSTER_REQUEST_TIMEOUT_SECS` | unset (no timeout)           |
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            std::env::var("ROSTER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

        let request_timeout_secs = match std::env::var("ROSTER_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Some(raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                var: "ROSTER_REQUEST_TIMEOUT_SECS",
                value: raw.clone(),
            })?),
            Err(_) => None,
        };

        Ok(Self {
            request_timeout_secs,
            ..Self::new(base_url)
        })
    }

    pub fn is_in_memory(&self) -> bool {
        self.base_url.starts_with(IN_MEMORY_SCHEME)
    }

    /// Absolute URL for an API path such as `/tasks/6/complete`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Make `config` the process-wide configuration. Fails if one is already
/// installed.
pub fn install(config: ApiConfig) -> Result<&'static ApiConfig, ConfigError> {
    INSTALLED
        .set(config)
        .map_err(|_| ConfigError::AlreadyInstalled)?;
    installed()
}

/// The process-wide configuration installed at startup.
pub fn installed() -> Result<&'static ApiConfig, ConfigError> {
    INSTALLED.get().ok_or(ConfigError::NotInstalled)
}
