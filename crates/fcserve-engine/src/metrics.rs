//! Engine invocation counters.
//!
//! Lock-free atomics, updated by the pipeline and read by the health
//! endpoint.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

/// Engine invocation metrics collector.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    invocations_started: AtomicU64,
    invocations_succeeded: AtomicU64,
    invocations_failed: AtomicU64,
    invocations_timed_out: AtomicU64,
    outputs_missing: AtomicU64,
    total_output_bytes: AtomicU64,
    total_duration_ms: AtomicU64,
}

/// Point-in-time copy of [`EngineMetrics`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Engine runs started.
    pub invocations_started: u64,
    /// Runs that produced an output artifact.
    pub invocations_succeeded: u64,
    /// Runs that failed for any reason, timeouts and missing outputs included.
    pub invocations_failed: u64,
    /// Runs killed on timeout.
    pub invocations_timed_out: u64,
    /// Runs that exited successfully without producing their output.
    pub outputs_missing: u64,
    /// Bytes returned to clients.
    pub total_output_bytes: u64,
    /// Mean duration of successful runs in milliseconds.
    pub average_duration_ms: Option<u64>,
}

impl EngineMetrics {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an engine run start.
    pub fn record_started(&self) {
        self.invocations_started.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful run.
    pub fn record_success(&self, duration: Duration, output_bytes: u64) {
        self.invocations_succeeded.fetch_add(1, Ordering::Relaxed);
        self.total_output_bytes
            .fetch_add(output_bytes, Ordering::Relaxed);
        self.total_duration_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record a failed run.
    pub fn record_failure(&self) {
        self.invocations_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a run killed on timeout.
    pub fn record_timeout(&self) {
        self.invocations_timed_out.fetch_add(1, Ordering::Relaxed);
        self.invocations_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a run that exited cleanly without its output file.
    pub fn record_output_missing(&self) {
        self.outputs_missing.fetch_add(1, Ordering::Relaxed);
        self.invocations_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Current values.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let succeeded = self.invocations_succeeded.load(Ordering::Relaxed);
        let total_ms = self.total_duration_ms.load(Ordering::Relaxed);

        MetricsSnapshot {
            invocations_started: self.invocations_started.load(Ordering::Relaxed),
            invocations_succeeded: succeeded,
            invocations_failed: self.invocations_failed.load(Ordering::Relaxed),
            invocations_timed_out: self.invocations_timed_out.load(Ordering::Relaxed),
            outputs_missing: self.outputs_missing.load(Ordering::Relaxed),
            total_output_bytes: self.total_output_bytes.load(Ordering::Relaxed),
            average_duration_ms: (succeeded > 0).then(|| total_ms / succeeded),
        }
    }
}
