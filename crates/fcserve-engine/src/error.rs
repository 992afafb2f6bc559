//! Unified error type for the engine pipeline.
//!
//! Every stage (naming, workspace, materialization, invocation, extraction)
//! reports through [`EngineError`], which maps onto
//! `fcserve_core::error::AppError` for the HTTP layer.

use std::path::PathBuf;

use fcserve_core::error::AppError;
use thiserror::Error;

/// Error type for all engine pipeline operations.
#[derive(Debug, Error)]
pub enum EngineError {
    // --- Request errors ---
    /// No file name was supplied in the request path.
    #[error("File name is required")]
    MissingFileName,

    /// The file name is not a single plain path component.
    #[error("Invalid file name: {name}")]
    InvalidFileName {
        /// The rejected name.
        name: String,
    },

    /// The file name collides with a file the pipeline itself stages.
    #[error("File name '{name}' is reserved")]
    ReservedFileName {
        /// The rejected name.
        name: String,
    },

    /// The resolved source lies outside the models directory.
    #[error("File '{name}' resolves outside the models directory")]
    PathEscape {
        /// The requested name.
        name: String,
    },

    // --- Resource errors ---
    /// The models directory could not be listed.
    #[error("Unable to read directory {path}: {source}")]
    ListDirectory {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },

    /// The per-request workspace could not be created.
    #[error("Failed to create temp dir: {0}")]
    WorkspaceCreate(#[source] std::io::Error),

    /// The source model does not exist.
    #[error("Failed to open file {name}: not found")]
    SourceNotFound {
        /// The requested name.
        name: String,
    },

    /// The source model exists but could not be opened.
    #[error("Failed to open file {path}: {source}")]
    SourceOpen {
        /// Resolved source path.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },

    /// Copying the source model into the workspace failed.
    #[error("Failed to copy file into {path}: {source}")]
    SourceCopy {
        /// Destination inside the workspace.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },

    /// Writing the build configuration payload failed.
    #[error("Failed to write config file: {0}")]
    ConfigWrite(#[source] std::io::Error),

    /// Writing an automation script into the workspace failed.
    #[error("Failed to write {name} script file: {source}")]
    ScriptWrite {
        /// Asset name.
        name: String,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },

    /// An automation script override could not be loaded at startup.
    #[error("Failed to load script asset {path}: {source}")]
    AssetLoad {
        /// Path of the override file.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },

    // --- Engine errors ---
    /// The engine executable could not be found.
    #[error("Engine executable not found: {executable}")]
    EngineNotFound {
        /// Configured executable.
        executable: String,
    },

    /// The engine process could not be started.
    #[error("Failed to execute command {executable}: {source}")]
    Launch {
        /// Configured executable.
        executable: String,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },

    /// The engine exited with a non-zero status.
    #[error("Failed to execute command: exit status {code}")]
    Failed {
        /// The exit code.
        code: i32,
        /// Captured stdout, for server-side diagnostics only.
        stdout: Vec<u8>,
        /// Captured stderr, for server-side diagnostics only.
        stderr: Vec<u8>,
    },

    /// The engine was terminated by a signal.
    #[error("Failed to execute command: terminated by signal")]
    Killed,

    /// The engine did not finish in time and was killed.
    #[error("Engine timed out after {timeout_seconds}s")]
    Timeout {
        /// The timeout that was exceeded.
        timeout_seconds: u64,
    },

    // --- Output errors ---
    /// The engine reported success but did not create its output.
    #[error("Failed to read output file {path}: engine did not produce it")]
    OutputMissing {
        /// Expected output path.
        path: PathBuf,
    },

    /// The output file exists but could not be read.
    #[error("Failed to read output file {path}: {source}")]
    OutputRead {
        /// Output path.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },
}

impl EngineError {
    /// Whether the error was caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFileName
                | Self::InvalidFileName { .. }
                | Self::ReservedFileName { .. }
                | Self::PathEscape { .. }
        )
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        let message = err.to_string();
        match &err {
            EngineError::MissingFileName
            | EngineError::InvalidFileName { .. }
            | EngineError::ReservedFileName { .. }
            | EngineError::PathEscape { .. } => AppError::validation(message),
            EngineError::EngineNotFound { .. }
            | EngineError::Launch { .. }
            | EngineError::Failed { .. }
            | EngineError::Killed
            | EngineError::Timeout { .. }
            | EngineError::OutputMissing { .. } => AppError::external_service(message),
            EngineError::ListDirectory { .. }
            | EngineError::WorkspaceCreate(_)
            | EngineError::SourceNotFound { .. }
            | EngineError::SourceOpen { .. }
            | EngineError::SourceCopy { .. }
            | EngineError::ConfigWrite(_)
            | EngineError::ScriptWrite { .. }
            | EngineError::AssetLoad { .. }
            | EngineError::OutputRead { .. } => AppError::storage(message),
        }
    }
}
