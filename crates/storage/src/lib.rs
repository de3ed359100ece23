//! Object storage for plant images.
//!
//! [`ImageStore`] is the seam the API talks to. Two backends exist:
//!
//! - [`local::LocalImageStore`] -- files under a directory, served by the API at `/media`.
//! - [`s3::S3ImageStore`] -- an S3 (or S3-compatible) bucket with public-read objects.

use std::sync::Arc;

use async_trait::async_trait;

pub mod config;
pub mod local;
pub mod s3;

pub use config::StorageConfig;

/// Errors raised by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The object key would escape the store or is otherwise malformed.
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote backend rejected or failed the request.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// A place to put publicly readable plant images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `data` under `key` and return its public URL.
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str)
        -> Result<String, StorageError>;

    /// Remove the object at `key`. Removing a missing object is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Public URL for `key`, whether or not the object exists yet.
    fn public_url(&self, key: &str) -> String;
}

/// Build the configured backend.
pub async fn build_store(config: &StorageConfig) -> Result<Arc<dyn ImageStore>, StorageError> {
    match config {
        StorageConfig::Local {
            root,
            public_base_url,
        } => {
            let store = local::LocalImageStore::new(root.clone(), public_base_url.clone());
            tokio::fs::create_dir_all(store.root()).await?;
            tracing::info!(root = %store.root().display(), "Using local image store");
            Ok(Arc::new(store))
        }
        StorageConfig::S3 {
            bucket,
            region,
            endpoint,
            public_base_url,
        } => {
            let store = s3::S3ImageStore::connect(
                bucket.clone(),
                region.clone(),
                endpoint.clone(),
                public_base_url.clone(),
            )
            .await;
            tracing::info!(bucket = %bucket, region = %region, "Using S3 image store");
            Ok(Arc::new(store))
        }
    }
}

/// Validate an object key: relative, `/`-separated, no empty, `.` or `..` segments.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() || key.starts_with('/') || key.contains('\\') {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    if key
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Join a base URL and a key with exactly one `/` between them.
pub(crate) fn join_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_nested_relative_key() {
        assert!(validate_key("plants/1/abc.png").is_ok());
    }

    #[test]
    fn rejects_traversal_and_absolute_keys() {
        for key in ["", "/etc/passwd", "plants/../../secret", "a//b", "./a", "a\\b"] {
            assert!(validate_key(key).is_err(), "{key:?} should be rejected");
        }
    }

    #[test]
    fn join_url_normalises_slash() {
        assert_eq!(join_url("http://h/media/", "a.png"), "http://h/media/a.png");
        assert_eq!(join_url("http://h/media", "a.png"), "http://h/media/a.png");
    }
}
