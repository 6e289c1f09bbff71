use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::LlmClient;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    delete_handler, health_handler, home_handler, manage_handler, models_handler, pools_handler,
    process_handler, race_card_handler, site_summary_handler, splits_handler, upload_handler,
};
use crate::presentation::state::AppState;

/// Room for multipart framing on top of the upload itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router<L>(state: AppState<L>) -> Router
where
    L: LlmClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let upload_limit = state.split_service.max_upload_bytes() + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/api/models", get(models_handler::<L>))
        .route("/api/races/analyze", post(race_card_handler::<L>))
        .route("/api/pools/analyze", post(pools_handler::<L>))
        .route("/api/site/analyze", post(site_summary_handler::<L>))
        .route("/api/splits", get(splits_handler::<L>))
        .route(
            "/api/splits/upload",
            post(upload_handler::<L>).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/splits/process", post(process_handler::<L>))
        .route("/api/manage", get(manage_handler::<L>))
        .route("/api/manage/{subdir}", delete(delete_handler::<L>))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
