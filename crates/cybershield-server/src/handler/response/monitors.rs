//! Monitor response types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Liveness report of the server and its database.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorStatus {
    /// Timestamp when this status was generated.
    pub checked_at: Timestamp,
    /// Whether Postgres answered in time.
    pub is_healthy: bool,
    /// Application version.
    pub version: String,
}

impl MonitorStatus {
    pub fn new(is_healthy: bool) -> Self {
        Self {
            checked_at: Timestamp::now(),
            is_healthy,
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}
