//! Staging of engine inputs inside a workspace.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::assets::Asset;
use crate::error::EngineError;
use crate::models::Flow;
use crate::workspace::Workspace;

/// Permission bits for staged scripts: owner read/write/execute only.
#[cfg(unix)]
const SCRIPT_MODE: u32 = 0o700;

/// Writes source models, configuration payloads and scripts into workspaces.
pub struct InputMaterializer;

impl InputMaterializer {
    /// Stream `source` into the workspace as `dest_name`.
    pub async fn copy_source(
        source: &Path,
        workspace: &Workspace,
        dest_name: &str,
    ) -> Result<PathBuf, EngineError> {
        let mut input = tokio::fs::File::open(source)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => EngineError::SourceNotFound {
                    name: source
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                },
                _ => EngineError::SourceOpen {
                    path: source.to_path_buf(),
                    source: e,
                },
            })?;

        let dest = workspace.join(dest_name);
        let copy_err = |source| EngineError::SourceCopy {
            path: dest.clone(),
            source,
        };

        let mut output = tokio::fs::File::create(&dest).await.map_err(copy_err)?;
        tokio::io::copy(&mut input, &mut output)
            .await
            .map_err(copy_err)?;
        output.flush().await.map_err(copy_err)?;

        Ok(dest)
    }

    /// Write the raw build configuration payload as `config.json`.
    ///
    /// The payload is not parsed; interpreting it is the engine script's job.
    pub async fn write_config(
        workspace: &Workspace,
        payload: &[u8],
    ) -> Result<PathBuf, EngineError> {
        let dest = workspace.join(Flow::CONFIG_NAME);
        tokio::fs::write(&dest, payload)
            .await
            .map_err(EngineError::ConfigWrite)?;
        Ok(dest)
    }

    /// Write an automation script into the workspace, marked executable.
    pub async fn write_script(
        workspace: &Workspace,
        asset: &Asset,
    ) -> Result<PathBuf, EngineError> {
        let dest = workspace.join(asset.name());
        let script_err = |source| EngineError::ScriptWrite {
            name: asset.name().to_string(),
            source,
        };

        tokio::fs::write(&dest, asset.content())
            .await
            .map_err(script_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&dest, std::fs::Permissions::from_mode(SCRIPT_MODE))
                .await
                .map_err(script_err)?;
        }

        Ok(dest)
    }
}
