//! Entity models and request DTOs, shaped after the backend's JSON.

pub mod personnel;
pub mod task;

use serde::{Deserialize, Serialize};

/// Body returned by every `DELETE` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub success: bool,
}
