use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::LlmClient;
use crate::application::services::Analysis;
use crate::domain::{PoolsCard, RaceCard, RaceHeader, SiteSummary};
use crate::presentation::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RaceCardRequest {
    pub track: String,
    pub race_date: Option<String>,
    pub race_number: Option<String>,
    pub speed_data: String,
    pub class_data: String,
    pub pace_data: String,
    pub user_insights: String,
    pub model: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PoolsRequest {
    pub track: String,
    pub race_date: Option<String>,
    pub race_number: Option<String>,
    pub pools_data: String,
    pub model: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SiteSummaryRequest {
    pub race_info: String,
    pub summary_data: String,
    pub pace_data: String,
    pub model: Option<String>,
}

#[derive(Serialize)]
pub struct AnalysisResponse {
    pub model: String,
    pub markdown: String,
}

impl From<Analysis> for AnalysisResponse {
    fn from(analysis: Analysis) -> Self {
        Self {
            model: analysis.model,
            markdown: analysis.markdown,
        }
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn race_card_handler<L>(
    State(state): State<AppState<L>>,
    Json(request): Json<RaceCardRequest>,
) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    let card = RaceCard {
        header: RaceHeader::new(request.race_date, request.track, request.race_number),
        speed_data: request.speed_data.trim().to_string(),
        class_data: request.class_data.trim().to_string(),
        pace_data: request.pace_data.trim().to_string(),
        user_insights: request.user_insights.trim().to_string(),
    };

    match state
        .analysis_service
        .analyze_race_card(&card, request.model)
        .await
    {
        Ok(analysis) => (StatusCode::OK, Json(AnalysisResponse::from(analysis))).into_response(),
        Err(e) => e.into_response(),
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn pools_handler<L>(
    State(state): State<AppState<L>>,
    Json(request): Json<PoolsRequest>,
) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    let card = PoolsCard {
        header: RaceHeader::new(request.race_date, request.track, request.race_number),
        pools_data: request.pools_data.trim().to_string(),
    };

    match state.analysis_service.analyze_pools(&card, request.model).await {
        Ok(analysis) => (StatusCode::OK, Json(AnalysisResponse::from(analysis))).into_response(),
        Err(e) => e.into_response(),
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn site_summary_handler<L>(
    State(state): State<AppState<L>>,
    Json(request): Json<SiteSummaryRequest>,
) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    let summary = SiteSummary {
        race_info: request.race_info.trim().to_string(),
        summary_data: request.summary_data.trim().to_string(),
        pace_data: request.pace_data.trim().to_string(),
    };

    match state
        .analysis_service
        .analyze_site_summary(&summary, request.model)
        .await
    {
        Ok(analysis) => (StatusCode::OK, Json(AnalysisResponse::from(analysis))).into_response(),
        Err(e) => e.into_response(),
    }
}
