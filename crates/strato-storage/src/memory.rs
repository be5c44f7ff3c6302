//! In-memory provider for tests and development.

use std::collections::HashMap;
use std::sync::RwLock;

use strato_core::context::ExecutionContext;
use strato_core::error::{Result, StratoError};
use strato_core::Capabilities;

use crate::provider::{require_key, BlockingStorage, Provider};

/// Stores objects in a map guarded by a read-write lock. All data is lost
/// on drop.
pub struct MemoryStorage {
    name: String,
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::with_name("memory")
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.read().unwrap().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.objects.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for MemoryStorage {
    fn provider_name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::none()
    }
}

impl BlockingStorage for MemoryStorage {
    fn upload(&self, key: &str, data: &[u8], _context: &ExecutionContext) -> Result<()> {
        require_key(key)?;
        self.objects
            .write()
            .unwrap()
            .insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn download(&self, key: &str, _context: &ExecutionContext) -> Result<Vec<u8>> {
        require_key(key)?;
        self.objects
            .read()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| StratoError::NotFound(key.to_string()))
    }

    fn delete(&self, key: &str, _context: &ExecutionContext) -> Result<()> {
        require_key(key)?;
        self.objects.write().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let provider = MemoryStorage::new();
        let context = ExecutionContext::default();

        provider.upload("a/b", b"bytes", &context).unwrap();
        assert!(provider.contains("a/b"));
        assert_eq!(provider.download("a/b", &context).unwrap(), b"bytes");

        provider.delete("a/b", &context).unwrap();
        assert!(provider.is_empty());
    }

    #[test]
    fn download_missing_key_is_not_found() {
        let provider = MemoryStorage::new();
        let result = provider.download("ghost", &ExecutionContext::default());
        assert!(matches!(result, Err(StratoError::NotFound(_))));
    }

    #[test]
    fn delete_is_idempotent() {
        let provider = MemoryStorage::new();
        provider.delete("ghost", &ExecutionContext::default()).unwrap();
        provider.delete("ghost", &ExecutionContext::default()).unwrap();
    }
}
