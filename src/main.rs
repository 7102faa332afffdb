use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use bias_detector::application::services::AnalysisService;
use bias_detector::infrastructure::ml::ModelLoader;
use bias_detector::infrastructure::observability::{TracingConfig, init_tracing};
use bias_detector::infrastructure::text_processing::CompositeFileLoader;
use bias_detector::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));

    let models = ModelLoader::load_bundle(&settings.models).context("failed to load models")?;

    let analysis_service = Arc::new(AnalysisService::new(
        Arc::new(CompositeFileLoader::with_default_adapters()),
        models.vectorizer,
        models.sentiment_classifier,
        models.religion_classifier,
    ));

    let state = AppState {
        analysis_service,
        max_upload_bytes: settings.server.max_upload_bytes(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;
    tracing::info!(environment = %environment, "Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
