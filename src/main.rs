use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use race_handicapper::application::services::{AnalysisService, SplitService};
use race_handicapper::infrastructure::catalog::FileCatalog;
use race_handicapper::infrastructure::llm::OpenRouterClient;
use race_handicapper::infrastructure::observability::{TracingConfig, init_tracing};
use race_handicapper::infrastructure::pdf::PdfDocumentLoader;
use race_handicapper::infrastructure::storage::LocalRaceFileStore;
use race_handicapper::presentation::{AppState, Environment, Settings, create_router};

const BYTES_PER_MB: usize = 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(
        environment,
        &settings.logging,
    ));

    if settings.llm.api_key().is_none() {
        tracing::warn!("OPENROUTER_API_KEY is not set; analysis requests will be rejected");
    }

    let store = Arc::new(
        LocalRaceFileStore::new(PathBuf::from(&settings.storage.base_path))
            .context("Failed to open file storage")?,
    );
    let loader = Arc::new(PdfDocumentLoader);
    let catalog = Arc::new(FileCatalog::new(&settings.catalog));
    let llm_client = Arc::new(OpenRouterClient::new(&settings.llm)?);

    let analysis_service = Arc::new(AnalysisService::new(
        llm_client,
        catalog,
        settings.llm.temperature,
        settings.llm.max_tokens,
    ));

    let split_service = Arc::new(SplitService::new(
        store,
        loader,
        Duration::from_secs(settings.splitting.timeout_secs),
        settings.splitting.max_upload_mb * BYTES_PER_MB,
    ));

    let state = AppState {
        analysis_service,
        split_service,
    };

    let router = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, environment = %environment, "Listening");

    axum::serve(listener, router).await?;

    Ok(())
}
