use bytes::Bytes;

use crate::domain::StoragePath;

/// Persistence boundary for uploaded reports and their split race files.
#[async_trait::async_trait]
pub trait RaceFileStore: Send + Sync {
    /// Writes `data` at `path`, replacing whatever was there.
    async fn put(&self, path: &StoragePath, data: Bytes) -> Result<u64, StoreError>;

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, StoreError>;

    async fn delete(&self, path: &StoragePath) -> Result<(), StoreError>;

    async fn head(&self, path: &StoragePath) -> Result<u64, StoreError>;

    /// Names of the immediate sub-directories of `prefix`, sorted.
    async fn list_directories(&self, prefix: &StoragePath) -> Result<Vec<String>, StoreError>;

    /// Names of the files directly under `prefix`, sorted.
    async fn list_files(&self, prefix: &StoragePath) -> Result<Vec<String>, StoreError>;

    /// Removes every object under `prefix`; returns how many were removed.
    async fn delete_prefix(&self, prefix: &StoragePath) -> Result<usize, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("list failed: {0}")]
    ListFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
