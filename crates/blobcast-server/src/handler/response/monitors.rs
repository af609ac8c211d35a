//! Monitor response types.

use serde::{Deserialize, Serialize};

/// Overall health of the gateway process.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// The process is accepting requests.
    #[default]
    Ok,
}

/// Liveness response.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStatus {
    /// Overall process status.
    pub status: ServiceStatus,
    /// Application version.
    pub version: String,
}

impl Default for MonitorStatus {
    fn default() -> Self {
        Self {
            status: ServiceStatus::Ok,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
