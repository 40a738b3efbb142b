use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;

use rxverify::application::services::{MatchVerifier, VerificationService};
use rxverify::infrastructure::corpus::load_reference_corpus;
use rxverify::infrastructure::llm::{VlmConfig, VlmExtractionClient};
use rxverify::infrastructure::observability::{init_tracing, TracingConfig};
use rxverify::presentation::{create_router, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    init_tracing(TracingConfig::default(), settings.server.port);

    let corpus = Arc::new(load_reference_corpus(Path::new(&settings.corpus.path))?);
    tracing::info!(
        entries = corpus.len(),
        path = %settings.corpus.path,
        "Reference corpus loaded"
    );

    let extraction_client = Arc::new(VlmExtractionClient::new(VlmConfig {
        base_url: settings.vlm.base_url.clone(),
        model: settings.vlm.model.clone(),
        api_key: settings.vlm.api_key.clone(),
    }));

    let verification_service = Arc::new(VerificationService::new(
        extraction_client,
        Arc::clone(&corpus),
        MatchVerifier::new(settings.matching.threshold),
    ));

    let state = AppState {
        verification_service,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
