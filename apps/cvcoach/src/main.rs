mod analysis;
mod config;
mod errors;
mod extract;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::GeminiAnalyzer;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::Controller;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Coach v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(config.api_key.clone(), config.gemini_base_url.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let controller = Controller::new(Arc::new(GeminiAnalyzer::new(llm)));

    let addr = config.bind_addr()?;
    let state = AppState {
        config: config.clone(),
        controller,
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Open http://{addr} in your browser");
    axum::serve(listener, app).await?;

    Ok(())
}
