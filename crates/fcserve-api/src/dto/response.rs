//! JSON response bodies.

use serde::{Deserialize, Serialize};

use fcserve_engine::MetricsSnapshot;

/// Body of `GET /list`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListResponse {
    /// Model file names in directory enumeration order.
    pub files: Vec<String>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server answers.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Seconds since the server state was built.
    pub uptime_seconds: u64,
    /// Engine invocation counters.
    pub engine: MetricsSnapshot,
}
