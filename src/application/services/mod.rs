mod analysis_service;
mod race_splitter;
mod split_service;

pub use analysis_service::{Analysis, AnalysisError, AnalysisService};
pub use race_splitter::{RaceDocumentSplitter, SplitError, group_pages};
pub use split_service::{
    DeletionReport, FailedWrite, SplitDirectory, SplitOutcome, SplitService, SplitServiceError,
};
