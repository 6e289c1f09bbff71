use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::LlmClient;
use crate::domain::ModelOption;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelOption>,
}

pub async fn models_handler<L>(State(state): State<AppState<L>>) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    Json(ModelsResponse {
        models: state.analysis_service.models().await,
    })
}
