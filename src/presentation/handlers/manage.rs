use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::LlmClient;
use crate::application::services::DeletionReport;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ManageResponse {
    pub subdirs: Vec<String>,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub messages: Vec<String>,
}

impl From<DeletionReport> for DeleteResponse {
    fn from(report: DeletionReport) -> Self {
        Self {
            messages: report
                .deleted
                .into_iter()
                .map(|path| format!("Deleted {}", path))
                .collect(),
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn manage_handler<L>(State(state): State<AppState<L>>) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    match state.split_service.directories().await {
        Ok(subdirs) => (StatusCode::OK, Json(ManageResponse { subdirs })).into_response(),
        Err(e) => e.into_response(),
    }
}

#[tracing::instrument(skip(state))]
pub async fn delete_handler<L>(
    State(state): State<AppState<L>>,
    Path(subdir): Path<String>,
) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    match state.split_service.delete(&subdir).await {
        Ok(report) => (StatusCode::OK, Json(DeleteResponse::from(report))).into_response(),
        Err(e) => e.into_response(),
    }
}
