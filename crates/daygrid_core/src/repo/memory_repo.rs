//! In-memory blob repository for tests and ephemeral sessions.

use crate::repo::blob_repo::{validate_storage_key, BlobRepository, RepoResult};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryBlobRepository {
    blobs: HashMap<String, String>,
    saves: usize,
}

impl MemoryBlobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a repository with one pre-existing blob.
    pub fn with_blob(key: impl Into<String>, blob: impl Into<String>) -> Self {
        let mut repo = Self::default();
        repo.blobs.insert(key.into(), blob.into());
        repo
    }

    /// Raw blob currently stored under `key`.
    pub fn blob(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl BlobRepository for MemoryBlobRepository {
    fn load(&self, key: &str) -> RepoResult<Option<String>> {
        validate_storage_key(key)?;
        Ok(self.blobs.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &str) -> RepoResult<()> {
        validate_storage_key(key)?;
        self.blobs.insert(key.to_string(), blob.to_string());
        self.saves += 1;
        Ok(())
    }
}
