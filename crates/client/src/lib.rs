//! `roster-client` -- typed access to the personnel/task REST backend.
//!
//! [`transport::Transport`] is the seam between the typed entity clients
//! and the wire: [`transport::HttpTransport`] talks to the real backend,
//! [`memory::InMemoryTransport`] serves a seeded fixture in-process.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod memory;
pub mod personnel;
pub mod resource;
pub mod tasks;
pub mod transport;

use std::sync::Arc;

pub use config::ApiConfig;
pub use error::{ClientError, ConfigError};
pub use personnel::PersonnelClient;
pub use tasks::TaskClient;
pub use transport::Transport;

/// Build the transport a config points at: the in-memory fixture backend
/// for `memory:` URLs, HTTP otherwise.
pub fn connect(config: &ApiConfig) -> Result<Arc<dyn Transport>, ClientError> {
    if config.is_in_memory() {
        tracing::info!("Using in-memory backend");
        return Ok(Arc::new(memory::InMemoryTransport::seeded()));
    }
    tracing::info!(base_url = %config.base_url, "Using HTTP backend");
    Ok(Arc::new(transport::HttpTransport::new(config)?))
}
