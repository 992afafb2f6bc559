//! Per-request ephemeral working directories.
//!
//! A [`Workspace`] owns a uniquely named directory under the temp root for
//! the duration of one request. The normal path removes it with
//! [`Workspace::release`] on the blocking pool; if the owner goes away
//! first (early `?` returns, a timed-out engine, a dropped request future)
//! `Drop` removes it instead.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::models::Flow;

/// An exclusively owned ephemeral directory.
#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
    dir: Option<TempDir>,
}

impl Workspace {
    /// Create a fresh workspace for `flow` under `root`.
    ///
    /// The directory name is `<flow prefix><random suffix>`, created
    /// atomically so concurrent requests never share one.
    pub async fn acquire(root: &Path, flow: Flow) -> Result<Self, EngineError> {
        let root = root.to_path_buf();
        let dir = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix(flow.workspace_prefix())
                .tempdir_in(root)
        })
        .await
        .map_err(|e| EngineError::WorkspaceCreate(std::io::Error::other(e)))?
        .map_err(EngineError::WorkspaceCreate)?;

        let path = dir.path().to_path_buf();
        debug!(workspace = %path.display(), flow = %flow, "Workspace acquired");

        Ok(Self {
            path,
            dir: Some(dir),
        })
    }

    /// Directory of the workspace.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of a file directly inside the workspace.
    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Whether the directory is still owned (not yet released).
    pub fn is_active(&self) -> bool {
        self.dir.is_some()
    }

    /// Remove the directory recursively. Idempotent and never fails;
    /// removal errors are logged.
    ///
    /// Ownership is given up only once removal has finished, so a release
    /// that is itself cancelled still leaves cleanup to `Drop`.
    pub async fn release(&mut self) {
        if self.dir.is_none() {
            return;
        }

        let result = tokio::fs::remove_dir_all(&self.path).await;
        if let Some(dir) = self.dir.take() {
            // Already removed (or given up on); stop TempDir from trying again.
            let _ = dir.keep();
        }

        match result {
            Ok(()) => debug!(workspace = %self.path.display(), "Workspace released"),
            Err(e) => warn!(
                workspace = %self.path.display(),
                error = %e,
                "Failed to clean up workspace"
            ),
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };

        match dir.close() {
            Ok(()) => debug!(workspace = %self.path.display(), "Workspace removed on drop"),
            Err(e) => warn!(
                workspace = %self.path.display(),
                error = %e,
                "Failed to clean up workspace"
            ),
        }
    }
}
