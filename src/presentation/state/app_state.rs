use std::sync::Arc;

use crate::application::ports::LlmClient;
use crate::application::services::{AnalysisService, SplitService};

pub struct AppState<L>
where
    L: LlmClient,
{
    pub analysis_service: Arc<AnalysisService<L>>,
    pub split_service: Arc<SplitService>,
}

impl<L> Clone for AppState<L>
where
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            analysis_service: Arc::clone(&self.analysis_service),
            split_service: Arc::clone(&self.split_service),
        }
    }
}
