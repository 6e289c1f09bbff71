use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::LlmClient;
use crate::application::services::{SplitDirectory, SplitOutcome};
use crate::domain::{RaceFileSelection, SelectionError};
use crate::presentation::state::AppState;

use super::analysis::AnalysisResponse;
use super::error::error_response;

const UPLOAD_FIELD: &str = "file";

#[derive(Serialize)]
pub struct SplitsResponse {
    pub directories: Vec<SplitDirectory>,
    pub models: Vec<String>,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: String,
    #[serde(flatten)]
    pub outcome: SplitOutcome,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProcessRequest {
    pub directory: String,
    pub race_files: Vec<String>,
    pub model: String,
    pub instructions: String,
}

#[derive(Serialize)]
pub struct ProcessResponse {
    pub files: String,
    pub model_name: String,
    #[serde(flatten)]
    pub analysis: AnalysisResponse,
}

#[tracing::instrument(skip(state))]
pub async fn splits_handler<L>(State(state): State<AppState<L>>) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    let directories = match state.split_service.listing().await {
        Ok(listing) => listing,
        Err(e) => return e.into_response(),
    };

    let models = state
        .analysis_service
        .models()
        .await
        .into_iter()
        .map(|m| m.display_name)
        .collect();

    (
        StatusCode::OK,
        Json(SplitsResponse {
            directories,
            models,
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler<L>(
    State(state): State<AppState<L>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    let (filename, data) = loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => {
                tracing::warn!("Upload request with no file");
                return error_response(StatusCode::BAD_REQUEST, "Invalid file.");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {}", e),
                );
            }
        };

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        match field.bytes().await {
            Ok(data) => break (filename, data),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read file bytes");
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read file: {}", e),
                );
            }
        }
    };

    tracing::debug!(filename = %filename, bytes = data.len(), "File data received");

    match state.split_service.upload_and_split(&filename, data).await {
        Ok(outcome) => {
            let message = if outcome.failed.is_empty() {
                "Split into races successfully.".to_string()
            } else {
                format!(
                    "Split into races with {} file(s) not written.",
                    outcome.failed.len()
                )
            };
            (StatusCode::CREATED, Json(UploadResponse { message, outcome })).into_response()
        }
        Err(e) => e.into_response(),
    }
}

#[tracing::instrument(skip(state, request), fields(directory = %request.directory))]
pub async fn process_handler<L>(
    State(state): State<AppState<L>>,
    Json(request): Json<ProcessRequest>,
) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    let model_name = request.model.trim().to_string();
    if model_name.is_empty() {
        return SelectionError::Incomplete.into_response();
    }

    let selection = match RaceFileSelection::new(request.directory, request.race_files) {
        Ok(s) => s,
        Err(e) => return e.into_response(),
    };

    let model_id = match state
        .analysis_service
        .model_id_for_display_name(&model_name)
        .await
    {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    let race_text = match state.split_service.race_text(&selection).await {
        Ok(text) => text,
        Err(e) => return e.into_response(),
    };

    match state
        .analysis_service
        .analyze_race_files(&model_id, &race_text, &request.instructions)
        .await
    {
        Ok(analysis) => (
            StatusCode::OK,
            Json(ProcessResponse {
                files: selection.files().join(", "),
                model_name,
                analysis: AnalysisResponse::from(analysis),
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
