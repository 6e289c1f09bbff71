mod lopdf_document;
mod text_normalizer;

pub use lopdf_document::{PdfDocument, PdfDocumentLoader};
pub use text_normalizer::normalize_page_text;
