//! Reading engine outputs back out of a workspace.

use std::path::Path;

use bytes::Bytes;

use crate::error::EngineError;
use crate::models::OutputArtifact;

/// Reads the file the engine was told to produce.
pub struct OutputExtractor;

impl OutputExtractor {
    /// Read `output_path` into an [`OutputArtifact`].
    ///
    /// A missing file after a successful engine exit is reported as
    /// [`EngineError::OutputMissing`], separate from other read failures.
    pub async fn extract(
        output_path: &Path,
        content_type: &'static str,
        suggested_filename: Option<&'static str>,
    ) -> Result<OutputArtifact, EngineError> {
        let bytes = match tokio::fs::read(output_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(EngineError::OutputMissing {
                    path: output_path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(EngineError::OutputRead {
                    path: output_path.to_path_buf(),
                    source,
                });
            }
        };

        Ok(OutputArtifact {
            bytes: Bytes::from(bytes),
            content_type,
            suggested_filename,
        })
    }
}
