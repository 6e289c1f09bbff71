use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::TryStreamExt;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{RaceFileStore, StoreError};
use crate::domain::StoragePath;

/// Uploads and split races on the local disk, rooted at `base_path`.
pub struct LocalRaceFileStore {
    inner: Arc<LocalFileSystem>,
}

impl LocalRaceFileStore {
    pub fn new(base_path: PathBuf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&base_path).map_err(StoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?
            .with_automatic_cleanup(true);
        Ok(Self {
            inner: Arc::new(fs),
        })
    }
}

fn not_found_or(err: object_store::Error, other: fn(String) -> StoreError) -> StoreError {
    match err {
        object_store::Error::NotFound { path, .. } => StoreError::NotFound(path),
        e => other(e.to_string()),
    }
}

#[async_trait::async_trait]
impl RaceFileStore for LocalRaceFileStore {
    async fn put(&self, path: &StoragePath, data: Bytes) -> Result<u64, StoreError> {
        let store_path = StorePath::from(path.as_str());
        let size = data.len() as u64;

        self.inner
            .put(&store_path, PutPayload::from(data))
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        Ok(size)
    }

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, StoreError> {
        let store_path = StorePath::from(path.as_str());
        let result = self
            .inner
            .get(&store_path)
            .await
            .map_err(|e| not_found_or(e, StoreError::ReadFailed))?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), StoreError> {
        let store_path = StorePath::from(path.as_str());
        self.inner
            .delete(&store_path)
            .await
            .map_err(|e| not_found_or(e, StoreError::DeleteFailed))
    }

    async fn head(&self, path: &StoragePath) -> Result<u64, StoreError> {
        let store_path = StorePath::from(path.as_str());
        let meta = self
            .inner
            .head(&store_path)
            .await
            .map_err(|e| not_found_or(e, StoreError::ReadFailed))?;
        Ok(meta.size as u64)
    }

    async fn list_directories(&self, prefix: &StoragePath) -> Result<Vec<String>, StoreError> {
        let store_path = StorePath::from(prefix.as_str());
        let listing = self
            .inner
            .list_with_delimiter(Some(&store_path))
            .await;
        let listing = match listing {
            Ok(listing) => listing,
            Err(object_store::Error::NotFound { .. }) => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::ListFailed(e.to_string())),
        };

        let mut names: Vec<String> = listing
            .common_prefixes
            .iter()
            .filter_map(|p| p.filename().map(String::from))
            .collect();
        names.sort();
        Ok(names)
    }

    async fn list_files(&self, prefix: &StoragePath) -> Result<Vec<String>, StoreError> {
        let store_path = StorePath::from(prefix.as_str());
        let listing = self
            .inner
            .list_with_delimiter(Some(&store_path))
            .await;
        let listing = match listing {
            Ok(listing) => listing,
            Err(object_store::Error::NotFound { .. }) => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::ListFailed(e.to_string())),
        };

        let mut names: Vec<String> = listing
            .objects
            .iter()
            .filter_map(|meta| meta.location.filename().map(String::from))
            .collect();
        names.sort();
        Ok(names)
    }

    async fn delete_prefix(&self, prefix: &StoragePath) -> Result<usize, StoreError> {
        let store_path = StorePath::from(prefix.as_str());
        let locations: Result<Vec<StorePath>, _> = self
            .inner
            .list(Some(&store_path))
            .map_ok(|meta| meta.location)
            .try_collect()
            .await;
        let locations = match locations {
            Ok(locations) => locations,
            Err(object_store::Error::NotFound { .. }) => return Ok(0),
            Err(e) => return Err(StoreError::ListFailed(e.to_string())),
        };

        for location in &locations {
            self.inner
                .delete(location)
                .await
                .map_err(|e| StoreError::DeleteFailed(e.to_string()))?;
        }

        Ok(locations.len())
    }
}
