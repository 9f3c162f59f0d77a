mod config;
mod enhancement;
mod errors;
mod export;
mod extract;
mod llm_client;
mod models;
mod persistence;
mod render;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::enhancement::EnhancementService;
use crate::export::rasterizer::CommandRasterizer;
use crate::export::ExportPipeline;
use crate::llm_client::LlmClient;
use crate::persistence::redis_store::RedisStore;
use crate::persistence::store::{FileStore, KeyValueStore};
use crate::persistence::PersistenceGateway;
use crate::resume::session::ResumeSession;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResuMaster API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize persistence (Redis when configured, otherwise files under DATA_DIR)
    let store: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(url) => {
            info!("Persistence: Redis");
            Arc::new(RedisStore::open(url)?)
        }
        None => {
            info!("Persistence: files in {}", config.data_dir.display());
            Arc::new(FileStore::open(&config.data_dir).await?)
        }
    };
    let session = Arc::new(
        ResumeSession::load(PersistenceGateway::new(store), config.save_debounce).await,
    );

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.ai_timeout)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let enhancer = EnhancementService::new(Arc::new(llm), config.ai_timeout);

    // Initialize export pipeline
    let exporter = Arc::new(ExportPipeline::new(
        Arc::new(CommandRasterizer::new(config.rasterizer_program.clone())),
        config.export_timeout,
    ));
    info!("Export rasterizer: {}", config.rasterizer_program);

    // Build app state
    let state = AppState {
        session: session.clone(),
        enhancer,
        exporter,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Write out any debounced edit before exiting
    session.flush().await;
    info!("Shut down cleanly");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
