//! Models directory configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Where source models live and how they are recognised.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CatalogConfig {
    /// Directory that is listed and from which source files are read.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// Filename suffix identifying model files.
    #[serde(default = "default_suffix")]
    #[validate(length(min = 1))]
    pub suffix: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            suffix: default_suffix(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_suffix() -> String {
    ".FCStd".to_string()
}
