//! Object storage for uploaded media.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{PortfolioError, PortfolioResult};

/// Bucket/key object storage with public URLs.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `bucket/key`. Existing objects are never overwritten.
    async fn upload(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> PortfolioResult<()>;

    /// Public URL an uploaded object is served from.
    fn public_url(&self, bucket: &str, key: &str) -> String;
}

/// Filesystem-backed object store, one directory per bucket.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Directory served as the object root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// A single path segment: no separators, no traversal, not empty.
fn check_segment(kind: &str, segment: &str) -> PortfolioResult<()> {
    if segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\'])
    {
        return Err(PortfolioError::BadRequest(format!(
            "Invalid object {}: '{}'",
            kind, segment
        )));
    }
    Ok(())
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn upload(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> PortfolioResult<()> {
        check_segment("bucket", bucket)?;
        check_segment("key", key)?;

        let dir = self.root.join(bucket);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| PortfolioError::Storage(e.to_string()))?;

        let path = dir.join(key);
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => {
                    PortfolioError::Storage(format!("Object {}/{} already exists", bucket, key))
                }
                _ => PortfolioError::Storage(e.to_string()),
            })?;
        file.write_all(&bytes)
            .await
            .map_err(|e| PortfolioError::Storage(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| PortfolioError::Storage(e.to_string()))?;

        tracing::debug!(bucket, key, size = bytes.len(), "Object stored");
        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, bucket, key)
    }
}
