//! The models directory: listing and confined name resolution.

use std::path::{Component, Path, PathBuf};

use fcserve_core::config::catalog::CatalogConfig;

use crate::error::EngineError;

/// View over the directory that holds source models.
#[derive(Debug, Clone)]
pub struct Catalog {
    directory: PathBuf,
    suffix: String,
}

impl Catalog {
    /// Create a catalog over `directory`, recognising files ending in `suffix`.
    pub fn new(directory: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            suffix: suffix.into(),
        }
    }

    /// Create a catalog from configuration.
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.directory.clone(), config.suffix.clone())
    }

    /// Models directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Names of non-directory entries ending with the model suffix.
    ///
    /// Order is whatever the directory enumeration yields. Nothing is
    /// cached: every call re-reads the directory.
    pub async fn list_models(&self) -> Result<Vec<String>, EngineError> {
        let list_err = |source| EngineError::ListDirectory {
            path: self.directory.clone(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&self.directory)
            .await
            .map_err(list_err)?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(list_err)? {
            let file_type = entry.file_type().await.map_err(list_err)?;
            if file_type.is_dir() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                if name.ends_with(&self.suffix) {
                    files.push(name);
                }
            }
        }

        Ok(files)
    }

    /// Check that a request-supplied name is one plain path component.
    ///
    /// Runs before any workspace is created, so rejected names cost nothing.
    pub fn validate_name(name: &str) -> Result<(), EngineError> {
        if name.is_empty() {
            return Err(EngineError::MissingFileName);
        }

        let invalid = || EngineError::InvalidFileName {
            name: name.to_string(),
        };

        if name.contains(['/', '\\', '\0']) {
            return Err(invalid());
        }

        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(invalid()),
        }
    }

    /// Resolve a validated name to its source path.
    ///
    /// Symlinks are followed; the target must still lie inside the models
    /// directory.
    pub async fn resolve(&self, name: &str) -> Result<PathBuf, EngineError> {
        Self::validate_name(name)?;

        let candidate = self.directory.join(name);
        let resolved = match tokio::fs::canonicalize(&candidate).await {
            Ok(p) => p,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(EngineError::SourceNotFound {
                    name: name.to_string(),
                });
            }
            Err(source) => {
                return Err(EngineError::SourceOpen {
                    path: candidate,
                    source,
                });
            }
        };

        let root = tokio::fs::canonicalize(&self.directory)
            .await
            .map_err(|source| EngineError::ListDirectory {
                path: self.directory.clone(),
                source,
            })?;

        if !resolved.starts_with(&root) {
            return Err(EngineError::PathEscape {
                name: name.to_string(),
            });
        }

        Ok(resolved)
    }
}
