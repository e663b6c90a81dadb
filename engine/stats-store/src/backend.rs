//! Blob storage backend trait
//!
//! The insights pipeline treats storage as a flat key/value blob store with
//! get/put/head/list semantics. Implementations are injected into
//! [`crate::StatsStore`], which layers the canonical key scheme on top.

use crate::error::Result;

/// Abstract trait for key/value blob storage backends
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    /// Read the blob at `key`, or `None` if it does not exist
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write a blob, overwriting any existing value
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()>;

    /// Check whether a blob exists without reading it
    async fn exists(&self, key: &str) -> Result<bool>;

    /// List all keys starting with `prefix`, sorted ascending
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;
}
