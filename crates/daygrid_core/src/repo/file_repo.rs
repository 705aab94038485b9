//! File-backed blob repository.
//!
//! Each key is stored as `<dir>/<key>.json`. Writes go to a sibling temp file
//! first and are renamed into place, so a crash mid-write leaves the previous
//! blob intact.

use crate::repo::blob_repo::{blob_from_bytes, validate_storage_key, BlobRepository, RepoResult};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const BLOB_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileBlobRepository {
    dir: PathBuf,
}

impl FileBlobRepository {
    /// Uses `dir` as the blob directory; it is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{BLOB_EXTENSION}"))
    }
}

impl BlobRepository for FileBlobRepository {
    fn load(&self, key: &str) -> RepoResult<Option<String>> {
        validate_storage_key(key)?;
        match fs::read(self.blob_path(key)) {
            Ok(bytes) => blob_from_bytes(key, bytes).map(Some),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, key: &str, blob: &str) -> RepoResult<()> {
        validate_storage_key(key)?;
        fs::create_dir_all(&self.dir)?;

        let target = self.blob_path(key);
        let staging = self.dir.join(format!("{key}.{BLOB_EXTENSION}.tmp"));
        fs::write(&staging, blob)?;
        fs::rename(&staging, &target)?;
        debug!(
            "event=blob_save module=repo backend=file status=ok bytes={}",
            blob.len()
        );
        Ok(())
    }
}
