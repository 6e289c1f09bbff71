use std::sync::Arc;

use crate::application::ports::{Catalog, CompletionRequest, LlmClient, LlmClientError};
use crate::domain::{
    ModelOption, PoolsCard, PromptKind, PromptTemplate, RaceCard, SiteSummary, TemplateError,
};
use crate::infrastructure::observability::sanitize_prompt;

const RACE_FILES_PREAMBLE: &str = "Please identify yourself in the first line of your response.\n\nHere is the past performance data for a horse race. Please analyze it:\n\n";

/// Builds prompts for the handicapping forms and sends them to the LLM.
pub struct AnalysisService<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
    catalog: Arc<dyn Catalog>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub model: String,
    pub markdown: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Please provide at least some data.")]
    MissingData,
    #[error("Selected model not found.")]
    UnknownModel(String),
    #[error("{kind} template: {source}")]
    Template {
        kind: PromptKind,
        #[source]
        source: TemplateError,
    },
    #[error("{0}")]
    Completion(#[from] LlmClientError),
}

impl<L> AnalysisService<L>
where
    L: LlmClient,
{
    pub fn new(
        llm_client: Arc<L>,
        catalog: Arc<dyn Catalog>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            llm_client,
            catalog,
            temperature,
            max_tokens,
        }
    }

    /// Model list from the catalog, falling back to the built-in list.
    pub async fn models(&self) -> Vec<ModelOption> {
        let resolved = self.catalog.models().await;
        if let Some(reason) = resolved.fallback_reason() {
            tracing::warn!(reason, "Using built-in model list");
        }
        resolved.value
    }

    /// The requested model id, or the first catalog entry when none is given.
    pub async fn model_or_default(&self, requested: Option<String>) -> String {
        match requested.map(|m| m.trim().to_string()).filter(|m| !m.is_empty()) {
            Some(model) => model,
            None => self
                .models()
                .await
                .into_iter()
                .next()
                .map(|m| m.model_id)
                .unwrap_or_default(),
        }
    }

    pub async fn model_id_for_display_name(
        &self,
        display_name: &str,
    ) -> Result<String, AnalysisError> {
        let models = self.models().await;
        ModelOption::find_by_display_name(&models, display_name)
            .map(|m| m.model_id.clone())
            .ok_or_else(|| AnalysisError::UnknownModel(display_name.to_string()))
    }

    #[tracing::instrument(skip(self, card), fields(track = %card.header.track))]
    pub async fn analyze_race_card(
        &self,
        card: &RaceCard,
        model: Option<String>,
    ) -> Result<Analysis, AnalysisError> {
        if !card.has_data() {
            return Err(AnalysisError::MissingData);
        }

        let timestamp = card.header.timestamp();
        let prompt = self
            .render(
                PromptKind::RaceCard,
                &[
                    ("timestamp", timestamp.as_str()),
                    ("race_date", card.header.race_date.as_str()),
                    ("track", card.header.track.as_str()),
                    ("race_number", card.header.race_number.as_str()),
                    ("speed_data", card.speed_data.as_str()),
                    ("class_data", card.class_data.as_str()),
                    ("pace_data", card.pace_data.as_str()),
                    ("user_insights", card.user_insights.as_str()),
                ],
            )
            .await?;

        let model = self.model_or_default(model).await;
        let commentary = self.complete(&model, prompt, true).await?;

        Ok(Analysis {
            model,
            markdown: with_heading(&timestamp, &commentary),
        })
    }

    #[tracing::instrument(skip(self, card), fields(track = %card.header.track))]
    pub async fn analyze_pools(
        &self,
        card: &PoolsCard,
        model: Option<String>,
    ) -> Result<Analysis, AnalysisError> {
        if !card.has_data() {
            return Err(AnalysisError::MissingData);
        }

        let timestamp = card.header.timestamp();
        let prompt = self
            .render(
                PromptKind::Pools,
                &[
                    ("timestamp", timestamp.as_str()),
                    ("race_date", card.header.race_date.as_str()),
                    ("track", card.header.track.as_str()),
                    ("race_number", card.header.race_number.as_str()),
                    ("pools_data", card.pools_data.as_str()),
                ],
            )
            .await?;

        let model = self.model_or_default(model).await;
        let commentary = self.complete(&model, prompt, true).await?;

        Ok(Analysis {
            model,
            markdown: with_heading(&timestamp, &commentary),
        })
    }

    #[tracing::instrument(skip(self, summary))]
    pub async fn analyze_site_summary(
        &self,
        summary: &SiteSummary,
        model: Option<String>,
    ) -> Result<Analysis, AnalysisError> {
        if !summary.has_data() {
            return Err(AnalysisError::MissingData);
        }

        let prompt = self
            .render(
                PromptKind::SiteSummary,
                &[
                    ("race_info", summary.race_info.as_str()),
                    ("summary_data", summary.summary_data.as_str()),
                    ("pace_data", summary.pace_data.as_str()),
                ],
            )
            .await?;

        let model = self.model_or_default(model).await;
        let markdown = self.complete(&model, prompt, true).await?;

        Ok(Analysis { model, markdown })
    }

    /// Past-performance text from split race files, optionally prefixed with
    /// the user's own instructions.
    #[tracing::instrument(skip(self, race_text, instructions))]
    pub async fn analyze_race_files(
        &self,
        model_id: &str,
        race_text: &str,
        instructions: &str,
    ) -> Result<Analysis, AnalysisError> {
        let instructions = instructions.trim();
        let content = if instructions.is_empty() {
            race_text.to_string()
        } else {
            format!("User instructions: {}\n\n{}", instructions, race_text)
        };

        let prompt = format!("{}{}", RACE_FILES_PREAMBLE, content);
        let markdown = self.complete(model_id, prompt, false).await?;

        Ok(Analysis {
            model: model_id.to_string(),
            markdown,
        })
    }

    async fn render(
        &self,
        kind: PromptKind,
        values: &[(&str, &str)],
    ) -> Result<String, AnalysisError> {
        let resolved = self.catalog.prompt_template(kind).await;
        if let Some(reason) = resolved.fallback_reason() {
            tracing::warn!(%kind, reason, "Using built-in prompt template");
        }
        render_template(kind, &resolved.value, values)
    }

    async fn complete(
        &self,
        model: &str,
        prompt: String,
        with_sampling: bool,
    ) -> Result<String, AnalysisError> {
        tracing::debug!(model, prompt = %sanitize_prompt(&prompt), "Requesting analysis");

        let mut request = CompletionRequest::new(model, prompt);
        if with_sampling {
            request = request.with_sampling(self.temperature, self.max_tokens);
        }

        self.llm_client.complete(&request).await.map_err(|e| {
            tracing::error!(error = %e, model, "Analysis request failed");
            AnalysisError::Completion(e)
        })
    }
}

fn render_template(
    kind: PromptKind,
    template: &PromptTemplate,
    values: &[(&str, &str)],
) -> Result<String, AnalysisError> {
    template
        .render(values)
        .map_err(|source| AnalysisError::Template { kind, source })
}

fn with_heading(timestamp: &str, commentary: &str) -> String {
    format!("# {}\n\n{}", timestamp, commentary)
}
