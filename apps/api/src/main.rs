use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use skiller::annotation::HttpAnnotator;
use skiller::config::Config;
use skiller::extraction::SkillExtractor;
use skiller::routes::build_router;
use skiller::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("skiller={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Skiller API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize annotation client
    let annotator = HttpAnnotator::new(&config.annotator_url)?;
    info!("Annotation client initialized (endpoint: {})", annotator.endpoint());

    let extractor = SkillExtractor::new(Arc::new(annotator)).with_options(config.extraction);
    info!("Extraction options: {:?}", extractor.options());

    let state = AppState {
        extractor: Arc::new(extractor),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
