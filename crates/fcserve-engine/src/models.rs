//! Flow definitions and the artifacts they produce.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// The engine-backed request flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    /// Extract model metadata (variables) as JSON.
    Info,
    /// Apply a configuration and export a mesh.
    Build,
}

impl Flow {
    /// Copied source name used by the build flow.
    pub const BUILD_INPUT_NAME: &'static str = "input.FCStd";
    /// Configuration payload name used by the build flow.
    pub const CONFIG_NAME: &'static str = "config.json";
    /// Filename suggested to clients downloading a build result.
    pub const BUILD_DOWNLOAD_NAME: &'static str = "output.stl";

    /// Prefix of this flow's workspace directory name.
    pub fn workspace_prefix(&self) -> &'static str {
        match self {
            Self::Info => "info-temp-",
            Self::Build => "build-temp-",
        }
    }

    /// Name under which the source model is staged in the workspace.
    pub fn input_name<'a>(&self, source_name: &'a str) -> &'a str {
        match self {
            Self::Info => source_name,
            Self::Build => Self::BUILD_INPUT_NAME,
        }
    }

    /// Name of the file the engine must produce.
    pub fn output_name(&self) -> &'static str {
        match self {
            Self::Info => "output.json",
            Self::Build => "output.stl",
        }
    }

    /// Content type of the produced artifact.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Info => "application/json",
            Self::Build => "application/octet-stream",
        }
    }

    /// Download filename suggested to the client, if any.
    pub fn suggested_filename(&self) -> Option<&'static str> {
        match self {
            Self::Info => None,
            Self::Build => Some(Self::BUILD_DOWNLOAD_NAME),
        }
    }

    /// Whether the flow stages a caller-supplied configuration payload.
    pub fn takes_config(&self) -> bool {
        matches!(self, Self::Build)
    }
}

impl std::fmt::Display for Flow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Build => write!(f, "build"),
        }
    }
}

/// An engine-produced file read back from a workspace.
#[derive(Debug, Clone)]
pub struct OutputArtifact {
    /// File contents.
    pub bytes: Bytes,
    /// MIME type to report to the client.
    pub content_type: &'static str,
    /// Download filename for `Content-Disposition`, if any.
    pub suggested_filename: Option<&'static str>,
}

impl OutputArtifact {
    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
