/// Errors from the entity clients and their transports.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A non-HTTP transport could not reach its backend.
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    /// The backend answered with a non-2xx status.
    #[error("Server error ({status}): {body}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A body could not be encoded, or a 2xx response was not the expected JSON.
    #[error("Invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// True for failures where no response was received at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Request(_) | ClientError::Unreachable(_))
    }

    /// True when the backend reported the resource as missing.
    ///
    /// Screens do not branch on this; it is exposed for callers that need
    /// the finer distinction.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Server { status: 404, .. })
    }
}

/// Errors from loading or installing the API configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },

    #[error("API configuration already installed")]
    AlreadyInstalled,

    #[error("API configuration not installed; call config::install first")]
    NotInstalled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_a_server_error_with_404() {
        let err = ClientError::Server {
            status: 404,
            body: String::new(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_transport());
    }

    #[test]
    fn unreachable_counts_as_transport_failure() {
        assert!(ClientError::Unreachable("offline".into()).is_transport());
    }
}
