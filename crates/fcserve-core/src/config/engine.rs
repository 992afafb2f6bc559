//! External CAD engine configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration for the out-of-process CAD engine (FreeCAD's `FreeCADCmd`).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EngineConfig {
    /// Engine executable, either a bare name looked up on `PATH` or a path.
    #[serde(default = "default_executable")]
    #[validate(length(min = 1))]
    pub executable: String,

    /// Upper bound for a single engine run. The child is killed on expiry.
    #[serde(default = "default_timeout_seconds")]
    #[validate(range(min = 1, max = 86400))]
    pub timeout_seconds: u64,

    /// Parent directory for per-request workspaces. Defaults to the OS temp dir.
    #[serde(default)]
    pub temp_root: Option<PathBuf>,

    /// Directory holding `info.py` / `generate.py` overrides for the
    /// embedded automation scripts.
    #[serde(default)]
    pub scripts_dir: Option<PathBuf>,

    /// Whether captured engine stdout/stderr is written to the log.
    #[serde(default = "default_log_output")]
    pub log_output: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            timeout_seconds: default_timeout_seconds(),
            temp_root: None,
            scripts_dir: None,
            log_output: default_log_output(),
        }
    }
}

impl EngineConfig {
    /// Resolve the effective workspace root.
    pub fn effective_temp_root(&self) -> PathBuf {
        self.temp_root.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Engine timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_executable() -> String {
    "FreeCADCmd".to_string()
}

fn default_timeout_seconds() -> u64 {
    600
}

fn default_log_output() -> bool {
    true
}
