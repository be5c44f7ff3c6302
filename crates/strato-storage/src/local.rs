use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use strato_core::context::{ExecutionContext, MetadataKey};
use strato_core::error::{Result, StratoError};
use strato_core::Capabilities;

use crate::provider::{require_key, BlockingStorage, Provider};

/// Filesystem-backed blocking provider.
///
/// The canonical blocking backend: pair it with
/// [`crate::adapter::AsyncAdapter`] when the future-based style is needed.
pub struct LocalStorage {
    base_path: PathBuf,
    name: String,
}

impl LocalStorage {
    pub fn new(base_path: &Path, name: &str) -> Result<Self> {
        fs::create_dir_all(base_path).map_err(|e| {
            StratoError::storage(
                format!("failed to create base path {}", base_path.display()),
                e,
            )
        })?;
        Ok(Self {
            base_path: base_path.to_path_buf(),
            name: name.to_string(),
        })
    }

    fn object_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }
}

impl Provider for LocalStorage {
    fn provider_name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::none()
    }
}

impl BlockingStorage for LocalStorage {
    fn upload(&self, key: &str, data: &[u8], context: &ExecutionContext) -> Result<()> {
        require_key(key)?;
        let path = self.object_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StratoError::storage(format!("failed to create {}", parent.display()), e)
            })?;
        }
        fs::write(&path, data).map_err(|e| {
            StratoError::storage(format!("failed to write {}", path.display()), e)
        })?;
        debug!(
            provider = %self.name,
            key,
            bytes = data.len(),
            trace_id = context.text(MetadataKey::TraceId).unwrap_or("-"),
            "stored object"
        );
        Ok(())
    }

    fn download(&self, key: &str, context: &ExecutionContext) -> Result<Vec<u8>> {
        require_key(key)?;
        let path = self.object_path(key);
        if !path.exists() {
            return Err(StratoError::NotFound(key.to_string()));
        }
        let data = fs::read(&path).map_err(|e| {
            StratoError::storage(format!("failed to read {}", path.display()), e)
        })?;
        debug!(
            provider = %self.name,
            key,
            bytes = data.len(),
            trace_id = context.text(MetadataKey::TraceId).unwrap_or("-"),
            "read object"
        );
        Ok(data)
    }

    fn delete(&self, key: &str, context: &ExecutionContext) -> Result<()> {
        require_key(key)?;
        let path = self.object_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StratoError::storage(format!("failed to remove {}", path.display()), e)
            })?;
        }
        debug!(
            provider = %self.name,
            key,
            trace_id = context.text(MetadataKey::TraceId).unwrap_or("-"),
            "deleted object"
        );
        Ok(())
    }
}
