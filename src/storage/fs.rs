//! Local-directory artifact store
//!
//! The filesystem variant of the gateway: artifacts live as plain files in
//! a single mount directory, one file per key.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::error::StorageError;

use super::ArtifactStore;

/// Artifact store backed by a local directory
#[derive(Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a new store rooted at `root`, creating the directory if needed
    pub async fn new(root: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&root).await?;
        tracing::info!("Using local storage directory: {}", root.display());
        Ok(Self { root })
    }

    /// Get the root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Keys map to direct children of the root; anything that could escape
    /// the directory is rejected.
    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty()
            || key.contains('/')
            || key.contains('\\')
            || key == "."
            || key == ".."
        {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl ArtifactStore for FsStore {
    async fn list_keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                keys.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        Ok(keys)
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::ObjectNotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::write(&path, bytes).await?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        Ok(fs::try_exists(&path).await?)
    }

    async fn probe(&self) -> Result<(), StorageError> {
        let meta = fs::metadata(&self.root).await.map_err(|e| {
            StorageError::ConnectionFailed(format!(
                "storage directory {} unavailable: {}",
                self.root.display(),
                e
            ))
        })?;

        if !meta.is_dir() {
            return Err(StorageError::ConnectionFailed(format!(
                "storage path {} is not a directory",
                self.root.display()
            )));
        }

        Ok(())
    }
}
