use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::artifact::ModelArtifact;
use crate::config::default_model_path;
use crate::error::StoreError;

/// Persistence for the template set.
///
/// `load` runs once at startup; `save` after retraining.
#[allow(async_fn_in_trait)]
pub trait ModelStore {
    /// `Ok(None)` when no model has been saved yet
    async fn load(&self) -> Result<Option<ModelArtifact>, StoreError>;

    async fn save(&self, artifact: &ModelArtifact) -> Result<(), StoreError>;
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct FileModelStore {
    path: PathBuf,
}

impl FileModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform data dir
    pub fn default_location() -> Self {
        Self::new(default_model_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelStore for FileModelStore {
    async fn load(&self) -> Result<Option<ModelArtifact>, StoreError> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("[ModelStore] No model at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let artifact: ModelArtifact = serde_json::from_slice(&data)?;
        log::info!(
            "[ModelStore] Loaded model from {} ({} labels, {} sequences)",
            self.path.display(),
            artifact.templates.len(),
            artifact.sequence_count()
        );
        Ok(Some(artifact))
    }

    async fn save(&self, artifact: &ModelArtifact) -> Result<(), StoreError> {
        // Ensure directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_vec_pretty(artifact)?;

        // Atomic replace
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        log::info!(
            "[ModelStore] Saved model to {} ({} labels)",
            self.path.display(),
            artifact.templates.len()
        );
        Ok(())
    }
}
