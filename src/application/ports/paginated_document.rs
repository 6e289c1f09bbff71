/// A loaded, read-only multi-page document.
pub trait PaginatedDocument: Send + Sync {
    fn page_count(&self) -> usize;

    /// Extracted text of the page at zero-based `index`.
    fn page_text(&self, index: usize) -> Result<String, PageTextError>;

    /// Serializes the given pages into a new container, keeping document order.
    fn write_pages(&self, indices: &[usize]) -> Result<Vec<u8>, DocumentWriteError>;

    /// File extension of containers produced by [`Self::write_pages`].
    fn extension(&self) -> &'static str;
}

pub trait DocumentLoader: Send + Sync {
    fn load(&self, data: &[u8]) -> Result<Box<dyn PaginatedDocument>, DocumentLoadError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentLoadError {
    #[error("malformed document: {0}")]
    Malformed(String),
    #[error("document has no pages tree: {0}")]
    MissingPages(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PageTextError {
    #[error("page {0} out of range")]
    OutOfRange(usize),
    #[error("text extraction failed on page {page}: {reason}")]
    ExtractionFailed { page: usize, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentWriteError {
    #[error("page {0} out of range")]
    OutOfRange(usize),
    #[error("serialization failed: {0}")]
    SerializationFailed(String),
}
