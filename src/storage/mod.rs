//! Storage backends for artifact blobs
//!
//! Every gateway operation round-trips to the backend through the
//! [`ArtifactStore`] trait; the gateway itself holds no cached copy.
//! Supported backends: S3-compatible buckets (MinIO, Cloudflare R2,
//! Backblaze B2, AWS S3) and a local directory.

mod fs;
mod s3;

pub use fs::FsStore;
pub use s3::S3Store;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::StorageConfig;
use crate::error::StorageError;

/// Backend interface for named binary artifacts.
///
/// Keys are case-sensitive, unique within the store.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Every key in the backend, unfiltered. Pagination is handled
    /// internally where the backend pages.
    async fn list_keys(&self) -> Result<Vec<String>, StorageError>;

    /// Full payload for a key. `ObjectNotFound` when absent.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Write a payload under a key, overwriting any existing object.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError>;

    /// Single authoritative existence query. Backend failures propagate;
    /// they are never collapsed into `Ok(false)`.
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;

    /// One cheap reachability call, used by the health probe.
    async fn probe(&self) -> Result<(), StorageError>;
}

/// Construct the backend selected by configuration.
pub async fn from_config(config: &StorageConfig) -> Result<Arc<dyn ArtifactStore>, StorageError> {
    match config {
        StorageConfig::S3(cfg) => Ok(Arc::new(S3Store::new(cfg).await?)),
        StorageConfig::Filesystem { root } => Ok(Arc::new(FsStore::new(root.clone()).await?)),
    }
}
