//! Automation scripts handed to the engine.
//!
//! The scripts are opaque to the pipeline: their bytes are written verbatim
//! into each workspace that needs them. The defaults are compiled into the
//! binary; a deployment may point `engine.scripts_dir` at replacements.

use std::path::Path;

use bytes::Bytes;
use fcserve_core::config::engine::EngineConfig;
use tracing::info;

use crate::error::EngineError;
use crate::models::Flow;

/// File name of the metadata script.
pub const INFO_SCRIPT: &str = "info.py";

/// File name of the export script. FreeCAD refuses to run a script called
/// `build.py`, so it must keep a different name.
pub const BUILD_SCRIPT: &str = "generate.py";

/// An immutable named script payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    name: String,
    content: Bytes,
}

impl Asset {
    /// Create an asset from a name and its bytes.
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// File name used when the asset is written to a workspace.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw script bytes.
    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

/// Process-wide, read-only store of the two automation scripts.
#[derive(Debug, Clone)]
pub struct AssetStore {
    info: Asset,
    build: Asset,
}

impl AssetStore {
    /// Build a store from explicit assets.
    pub fn new(info: Asset, build: Asset) -> Self {
        Self { info, build }
    }

    /// The scripts compiled into the binary.
    pub fn embedded() -> Self {
        Self::new(
            Asset::new(
                INFO_SCRIPT,
                Bytes::from_static(include_bytes!("../assets/info.py")),
            ),
            Asset::new(
                BUILD_SCRIPT,
                Bytes::from_static(include_bytes!("../assets/generate.py")),
            ),
        )
    }

    /// Load both scripts from a directory holding `info.py` and `generate.py`.
    pub fn from_dir(dir: &Path) -> Result<Self, EngineError> {
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read(&path)
                .map(|content| Asset::new(name, content))
                .map_err(|source| EngineError::AssetLoad { path, source })
        };

        Ok(Self::new(read(INFO_SCRIPT)?, read(BUILD_SCRIPT)?))
    }

    /// Resolve the store for a configuration: overrides when configured,
    /// embedded scripts otherwise.
    pub fn load(config: &EngineConfig) -> Result<Self, EngineError> {
        match &config.scripts_dir {
            Some(dir) => {
                info!(dir = %dir.display(), "Loading automation scripts from override directory");
                Self::from_dir(dir)
            }
            None => Ok(Self::embedded()),
        }
    }

    /// Script for a flow.
    pub fn for_flow(&self, flow: Flow) -> &Asset {
        match flow {
            Flow::Info => &self.info,
            Flow::Build => &self.build,
        }
    }

}
