mod catalog;
mod llm_client;
mod paginated_document;
mod race_file_store;

pub use catalog::{Catalog, Provenance, Resolved};
pub use llm_client::{CompletionRequest, LlmClient, LlmClientError};
pub use paginated_document::{
    DocumentLoadError, DocumentLoader, DocumentWriteError, PageTextError, PaginatedDocument,
};
pub use race_file_store::{RaceFileStore, StoreError};
