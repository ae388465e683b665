use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_parser::config::Config;
use resume_parser::routes::build_router;
use resume_parser::state::AppState;
use resume_parser::{AdapterRegistry, ResumeParser};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_parser={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume parser v{}", env!("CARGO_PKG_VERSION"));

    let vocabulary = config
        .load_vocabulary()
        .context("Failed to load parsing vocabulary")?;
    match &config.vocabulary_path {
        Some(path) => info!("Vocabulary loaded from {}", path.display()),
        None => info!("Using built-in vocabulary"),
    }
    info!(
        categories = vocabulary.categories().len(),
        skills = vocabulary.skills().len(),
        "Vocabulary ready"
    );

    let registry = AdapterRegistry::with_builtin();
    info!("Format adapters: {}", registry.adapter_names().join(", "));

    let state = AppState::new(ResumeParser::new(registry, vocabulary), config.clone());

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    info!("Shutdown signal received");
}
