use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;

use crate::application::ports::{DocumentLoadError, DocumentLoader, RaceFileStore, StoreError};
use crate::domain::{
    RaceFileSelection, RaceSplit, SPLITS_PREFIX, StoragePath, UPLOADS_PREFIX, file_stem,
    is_safe_segment, sanitize_file_name,
};
use crate::infrastructure::pdf::normalize_page_text;

use super::race_splitter::{RaceDocumentSplitter, SplitError};

const PDF_SUFFIX: &str = ".pdf";

/// Upload, split, browse and delete past-performance reports.
pub struct SplitService {
    store: Arc<dyn RaceFileStore>,
    loader: Arc<dyn DocumentLoader>,
    splitter: RaceDocumentSplitter,
    split_timeout: Duration,
    max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SplitOutcome {
    pub directory: String,
    pub upload: String,
    pub written: Vec<String>,
    pub failed: Vec<FailedWrite>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedWrite {
    pub file_name: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SplitDirectory {
    pub name: String,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DeletionReport {
    pub deleted: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SplitServiceError {
    #[error("Invalid file.")]
    InvalidFile(String),
    #[error("upload of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },
    #[error("invalid name: {0}")]
    InvalidName(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("document could not be loaded: {0}")]
    Load(#[from] DocumentLoadError),
    #[error("split failed: {0}")]
    Split(#[from] SplitError),
    #[error("splitting timed out after {0:?}")]
    Timeout(Duration),
    #[error("worker failed: {0}")]
    Worker(String),
    #[error("storage: {0}")]
    Store(StoreError),
}

impl From<StoreError> for SplitServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(path) => Self::NotFound(path),
            other => Self::Store(other),
        }
    }
}

impl SplitService {
    pub fn new(
        store: Arc<dyn RaceFileStore>,
        loader: Arc<dyn DocumentLoader>,
        split_timeout: Duration,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            store,
            loader,
            splitter: RaceDocumentSplitter::new(),
            split_timeout,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Stores the upload as `uploads/<stem>.pdf` and writes one file per race
    /// under `split_races/<stem>/`. A failed write is reported for that file
    /// only; the remaining races are still written.
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn upload_and_split(
        &self,
        original_name: &str,
        data: Bytes,
    ) -> Result<SplitOutcome, SplitServiceError> {
        if !original_name.to_lowercase().ends_with(PDF_SUFFIX) {
            return Err(SplitServiceError::InvalidFile(original_name.to_string()));
        }
        if data.len() > self.max_upload_bytes {
            return Err(SplitServiceError::TooLarge {
                size: data.len(),
                limit: self.max_upload_bytes,
            });
        }

        let sanitized = sanitize_file_name(original_name)
            .ok_or_else(|| SplitServiceError::InvalidFile(original_name.to_string()))?;
        let directory = file_stem(&sanitized).to_string();
        if directory.is_empty() || !sanitized.to_lowercase().ends_with(PDF_SUFFIX) {
            return Err(SplitServiceError::InvalidFile(original_name.to_string()));
        }

        let upload_name = format!("{}{}", directory, PDF_SUFFIX);
        self.store
            .put(&StoragePath::upload(&upload_name), data.clone())
            .await?;
        tracing::info!(upload = %upload_name, "Upload stored");

        let splits = self.split_blocking(data).await?;

        let mut outcome = SplitOutcome {
            directory: directory.clone(),
            upload: upload_name,
            written: Vec::with_capacity(splits.len()),
            failed: Vec::new(),
        };

        for split in splits {
            let path = StoragePath::split_file(&directory, &split.file_name);
            match self.store.put(&path, Bytes::from(split.bytes)).await {
                Ok(_) => outcome.written.push(split.file_name),
                Err(e) => {
                    tracing::error!(path = %path, error = %e, "Failed to write race file");
                    outcome.failed.push(FailedWrite {
                        file_name: split.file_name,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            directory = %outcome.directory,
            written = outcome.written.len(),
            failed = outcome.failed.len(),
            "Race files written"
        );

        Ok(outcome)
    }

    async fn split_blocking(&self, data: Bytes) -> Result<Vec<RaceSplit>, SplitServiceError> {
        let loader = Arc::clone(&self.loader);
        let splitter = self.splitter;

        let task = tokio::task::spawn_blocking(move || -> Result<Vec<RaceSplit>, SplitServiceError> {
            let document = loader.load(&data)?;
            splitter
                .split(document.as_ref())
                .map_err(SplitServiceError::from)
        });

        tokio::time::timeout(self.split_timeout, task)
            .await
            .map_err(|_| SplitServiceError::Timeout(self.split_timeout))?
            .map_err(|e| SplitServiceError::Worker(e.to_string()))?
    }

    pub async fn directories(&self) -> Result<Vec<String>, SplitServiceError> {
        Ok(self
            .store
            .list_directories(&StoragePath::splits_root())
            .await?)
    }

    pub async fn listing(&self) -> Result<Vec<SplitDirectory>, SplitServiceError> {
        let mut listing = Vec::new();
        for name in self.directories().await? {
            let files = self
                .store
                .list_files(&StoragePath::split_directory(&name))
                .await?;
            listing.push(SplitDirectory { name, files });
        }
        Ok(listing)
    }

    /// Text of the selected race files, each introduced by a `--- <file> ---`
    /// separator line.
    #[tracing::instrument(skip(self, selection), fields(directory = selection.directory()))]
    pub async fn race_text(
        &self,
        selection: &RaceFileSelection,
    ) -> Result<String, SplitServiceError> {
        let mut documents = Vec::with_capacity(selection.files().len());
        for file in selection.files() {
            let path = StoragePath::split_file(selection.directory(), file);
            documents.push((file.clone(), self.store.fetch(&path).await?));
        }

        let loader = Arc::clone(&self.loader);
        let task = tokio::task::spawn_blocking(move || -> Result<String, SplitServiceError> {
            let mut text = String::new();
            for (file, data) in documents {
                let document = loader.load(&data)?;
                let pages: Vec<String> = (0..document.page_count())
                    .filter_map(|index| match document.page_text(index) {
                        Ok(page) => Some(normalize_page_text(&page)),
                        Err(e) => {
                            tracing::warn!(file = %file, page = index, error = %e, "Skipping unreadable page");
                            None
                        }
                    })
                    .collect();

                text.push_str(&format!("\n\n--- {} ---\n", file));
                text.push_str(&pages.join("\n"));
            }
            Ok(text)
        });

        tokio::time::timeout(self.split_timeout, task)
            .await
            .map_err(|_| SplitServiceError::Timeout(self.split_timeout))?
            .map_err(|e| SplitServiceError::Worker(e.to_string()))?
    }

    /// Removes `split_races/<directory>/` and `uploads/<directory>.pdf`.
    /// Targets that are already gone are skipped.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, directory: &str) -> Result<DeletionReport, SplitServiceError> {
        if !is_safe_segment(directory) {
            return Err(SplitServiceError::InvalidName(directory.to_string()));
        }

        let mut report = DeletionReport::default();

        let split_dir = StoragePath::split_directory(directory);
        let removed = self.store.delete_prefix(&split_dir).await?;
        if removed > 0 {
            tracing::info!(path = %split_dir, removed, "Split directory deleted");
            report.deleted.push(format!("{}/{}", SPLITS_PREFIX, directory));
        }

        let upload = StoragePath::upload(&format!("{}{}", directory, PDF_SUFFIX));
        match self.store.head(&upload).await {
            Ok(_) => {
                self.store.delete(&upload).await?;
                tracing::info!(path = %upload, "Upload deleted");
                report
                    .deleted
                    .push(format!("{}/{}{}", UPLOADS_PREFIX, directory, PDF_SUFFIX));
            }
            Err(StoreError::NotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }

        Ok(report)
    }
}
