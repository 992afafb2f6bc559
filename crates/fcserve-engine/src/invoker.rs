//! Engine process execution.
//!
//! Runs the engine as a child process with stdin closed and both output
//! streams piped before spawn. Every run is bounded by a timeout, and the
//! child is killed when the run is abandoned (timeout or a dropped request).

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use fcserve_core::config::engine::EngineConfig;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::error::EngineError;

/// One fully specified engine command line.
#[derive(Debug, Clone)]
pub struct EngineInvocation {
    /// Engine executable.
    pub executable: String,
    /// Automation script passed via `-c`.
    pub script_path: PathBuf,
    /// Positional arguments after `--pass`.
    pub args: Vec<PathBuf>,
    /// Working directory for the child.
    pub working_dir: Option<PathBuf>,
}

impl EngineInvocation {
    /// Describe `<executable> -c <script_path> --pass <args...>`.
    pub fn new(executable: impl Into<String>, script_path: PathBuf, args: Vec<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            script_path,
            args,
            working_dir: None,
        }
    }

    /// Run the child inside `dir`.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Arguments following the executable.
    pub fn argv(&self) -> Vec<OsString> {
        let mut argv = Vec::with_capacity(self.args.len() + 3);
        argv.push(OsString::from("-c"));
        argv.push(self.script_path.clone().into_os_string());
        argv.push(OsString::from("--pass"));
        argv.extend(self.args.iter().map(|a| a.clone().into_os_string()));
        argv
    }
}

/// Captured result of a successful engine run.
#[derive(Debug, Clone)]
pub struct ExitOutcome {
    /// Exit code (always 0 for a returned outcome).
    pub code: i32,
    /// Captured standard output.
    pub stdout: Vec<u8>,
    /// Captured standard error.
    pub stderr: Vec<u8>,
    /// Wall time of the run.
    pub elapsed: Duration,
}

/// Runs [`EngineInvocation`]s.
#[derive(Debug, Clone)]
pub struct EngineInvoker {
    timeout: Duration,
    log_output: bool,
}

impl EngineInvoker {
    /// Create an invoker with an explicit timeout.
    pub fn new(timeout: Duration, log_output: bool) -> Self {
        Self {
            timeout,
            log_output,
        }
    }

    /// Create an invoker from engine configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.timeout(), config.log_output)
    }

    /// Configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run the engine to completion.
    ///
    /// Non-zero exit, signal termination, launch failure and timeout are
    /// all errors. Nothing is retried.
    pub async fn invoke(&self, invocation: &EngineInvocation) -> Result<ExitOutcome, EngineError> {
        let argv = invocation.argv();

        info!(
            executable = %invocation.executable,
            args = ?argv,
            "Running engine"
        );

        let mut cmd = Command::new(&invocation.executable);
        cmd.args(&argv)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(ref dir) = invocation.working_dir {
            cmd.current_dir(dir);
        }

        let start = Instant::now();
        let result = tokio::time::timeout(self.timeout, cmd.output()).await;
        let elapsed = start.elapsed();

        let output = match result {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                error!(executable = %invocation.executable, "Engine executable not found");
                return Err(EngineError::EngineNotFound {
                    executable: invocation.executable.clone(),
                });
            }
            Ok(Err(e)) => {
                error!(
                    executable = %invocation.executable,
                    error = %e,
                    "Failed to launch engine"
                );
                return Err(EngineError::Launch {
                    executable: invocation.executable.clone(),
                    source: e,
                });
            }
            Err(_) => {
                error!(
                    timeout_s = self.timeout.as_secs(),
                    executable = %invocation.executable,
                    "Engine timed out, killing"
                );
                return Err(EngineError::Timeout {
                    timeout_seconds: self.timeout.as_secs(),
                });
            }
        };

        if self.log_output {
            debug!(stdout = %String::from_utf8_lossy(&output.stdout), "Engine stdout");
            debug!(stderr = %String::from_utf8_lossy(&output.stderr), "Engine stderr");
        }

        if output.status.success() {
            info!(elapsed_ms = elapsed.as_millis() as u64, "Engine completed");
            return Ok(ExitOutcome {
                code: 0,
                stdout: output.stdout,
                stderr: output.stderr,
                elapsed,
            });
        }

        match output.status.code() {
            Some(code) => {
                error!(
                    code,
                    elapsed_ms = elapsed.as_millis() as u64,
                    stderr = %String::from_utf8_lossy(&output.stderr),
                    "Engine failed"
                );
                Err(EngineError::Failed {
                    code,
                    stdout: output.stdout,
                    stderr: output.stderr,
                })
            }
            None => {
                error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Engine terminated by signal"
                );
                Err(EngineError::Killed)
            }
        }
    }
}
