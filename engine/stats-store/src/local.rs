//! Local file-based blob store
//!
//! Maps keys straight onto a directory tree under a root path. Useful for
//! local runs and integration tests; production deployments point the same
//! trait at an object store.

use crate::backend::BlobStore;
use crate::error::{Result, StoreError};
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-backed [`BlobStore`] rooted at a data directory
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root data directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.starts_with('/') || key.split('/').any(|part| part == "..") {
            return Err(StoreError::invalid_key(key));
        }
        Ok(self.root.join(key))
    }

    fn key_for(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Option<Vec<&str>> =
            relative.components().map(|c| c.as_os_str().to_str()).collect();
        Some(parts?.join("/"))
    }
}

#[async_trait::async_trait]
impl BlobStore for LocalBlobStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let len = bytes.len();
        fs::write(&path, bytes).await?;
        tracing::debug!("wrote {len} bytes to {path:?}");
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        match fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(StoreError::Io(e)),
            };

            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                let file_type = entry.file_type().await?;
                if file_type.is_dir() {
                    pending.push(path);
                } else if let Some(key) = self.key_for(&path) {
                    if key.starts_with(prefix) {
                        keys.push(key);
                    }
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn put_get_round_trip_on_disk() {
        let dir = TempDir::new().unwrap();
        let store = LocalBlobStore::new(dir.path());

        store.put("stats/metadata.json", b"{}".to_vec()).await.unwrap();

        assert_eq!(store.get("stats/metadata.json").await.unwrap(), Some(b"{}".to_vec()));
        assert!(store.exists("stats/metadata.json").await.unwrap());
        assert_eq!(store.get("stats/missing.json").await.unwrap(), None);
        assert!(!store.exists("stats/missing.json").await.unwrap());
    }

    #[tokio::test]
    async fn list_walks_nested_directories() {
        let dir = TempDir::new().unwrap();
        let store = LocalBlobStore::new(dir.path());

        store.put("stats/weekly/season/2025/week/1/data.json", vec![1]).await.unwrap();
        store.put("stats/weekly/season/2025/week/2/data.json", vec![2]).await.unwrap();
        store.put("insights/latest.json", vec![3]).await.unwrap();

        let keys = store.list("stats/weekly/season/2025/week/").await.unwrap();
        assert_eq!(
            keys,
            vec![
                "stats/weekly/season/2025/week/1/data.json".to_string(),
                "stats/weekly/season/2025/week/2/data.json".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn rejects_path_traversal_keys() {
        let dir = TempDir::new().unwrap();
        let store = LocalBlobStore::new(dir.path());

        assert!(store.get("../outside.json").await.is_err());
        assert!(store.put("/absolute.json", vec![]).await.is_err());
    }

    #[tokio::test]
    async fn list_on_empty_root_returns_nothing() {
        let dir = TempDir::new().unwrap();
        let store = LocalBlobStore::new(dir.path().join("never-created"));

        assert!(store.list("stats/").await.unwrap().is_empty());
    }
}
