use lopdf::Document;

use crate::application::ports::{
    DocumentLoadError, DocumentLoader, DocumentWriteError, PageTextError, PaginatedDocument,
};

const PDF_EXTENSION: &str = "pdf";

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfDocumentLoader;

impl PdfDocumentLoader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for PdfDocumentLoader {
    fn load(&self, data: &[u8]) -> Result<Box<dyn PaginatedDocument>, DocumentLoadError> {
        Ok(Box::new(PdfDocument::from_bytes(data)?))
    }
}

/// A parsed PDF. Page numbers are kept in document order.
pub struct PdfDocument {
    inner: Document,
    page_numbers: Vec<u32>,
}

impl PdfDocument {
    pub fn from_bytes(data: &[u8]) -> Result<Self, DocumentLoadError> {
        let inner = Document::load_mem(data)
            .map_err(|e| DocumentLoadError::Malformed(format!("failed to parse PDF: {e}")))?;

        inner
            .trailer
            .get(b"Root")
            .map_err(|e| DocumentLoadError::MissingPages(e.to_string()))?;

        let page_numbers: Vec<u32> = inner.get_pages().keys().copied().collect();
        tracing::debug!(page_count = page_numbers.len(), "PDF loaded");

        Ok(Self {
            inner,
            page_numbers,
        })
    }
}

impl PaginatedDocument for PdfDocument {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Result<String, PageTextError> {
        let page_number = *self
            .page_numbers
            .get(index)
            .ok_or(PageTextError::OutOfRange(index))?;

        self.inner
            .extract_text(&[page_number])
            .map_err(|e| PageTextError::ExtractionFailed {
                page: index,
                reason: e.to_string(),
            })
    }

    fn write_pages(&self, indices: &[usize]) -> Result<Vec<u8>, DocumentWriteError> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.page_numbers.len()) {
            return Err(DocumentWriteError::OutOfRange(bad));
        }

        let dropped: Vec<u32> = self
            .page_numbers
            .iter()
            .enumerate()
            .filter(|(index, _)| !indices.contains(index))
            .map(|(_, &number)| number)
            .collect();

        let mut subset = self.inner.clone();
        subset.delete_pages(&dropped);
        subset.prune_objects();
        subset.renumber_objects();
        subset.compress();

        let mut out = Vec::new();
        subset
            .save_to(&mut out)
            .map_err(|e| DocumentWriteError::SerializationFailed(e.to_string()))?;

        Ok(out)
    }

    fn extension(&self) -> &'static str {
        PDF_EXTENSION
    }
}
