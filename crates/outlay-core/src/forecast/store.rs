//! Model Store
//!
//! Persists the fitted model as a single artifact at a configured path.
//! One path per user scope; saving overwrites wholesale (no versioning),
//! and a missing artifact on load is a normal startup state.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};

use super::model::BudgetModel;

/// File-backed store for one model artifact
#[derive(Debug, Clone)]
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the model to the configured path, creating parent
    /// directories as needed and overwriting any existing artifact.
    pub fn save(&self, model: &BudgetModel) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Persistence(format!(
                        "failed to create model directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let data = serde_json::to_vec(model)
            .map_err(|e| Error::Persistence(format!("failed to serialize model: {}", e)))?;
        std::fs::write(&self.path, data).map_err(|e| {
            Error::Persistence(format!(
                "failed to write model to {}: {}",
                self.path.display(),
                e
            ))
        })?;

        info!(path = %self.path.display(), "Model saved");
        Ok(())
    }

    /// Load the model if an artifact exists.
    ///
    /// Absence is `Ok(None)`, not an error; unreadable or corrupt
    /// artifacts are persistence errors.
    pub fn load(&self) -> Result<Option<BudgetModel>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = std::fs::read(&self.path).map_err(|e| {
            Error::Persistence(format!(
                "failed to read model from {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let model = serde_json::from_slice(&data)
            .map_err(|e| Error::Persistence(format!("failed to deserialize model: {}", e)))?;

        info!(path = %self.path.display(), "Model loaded");
        Ok(Some(model))
    }
}
