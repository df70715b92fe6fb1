//! Main Entrypoint for the Seekho API Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Loading prompt template overrides.
//! 3. Initializing the model gateway and shared services.
//! 4. Constructing the Axum router.
//! 5. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use async_openai::config::OpenAIConfig;
use seekho_api::{
    config::{Config, load_prompt_overrides},
    router::create_router,
    state::AppState,
};
use seekho_core::{
    gateway::OpenAICompatibleGateway, prompts::PromptCatalog, titles::InMemoryTitleStore,
};
use std::{net::SocketAddr, sync::Arc};
use tracing::{error, info, warn};

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal. Shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Initializing application state...");

    // --- 2. Load Prompts ---
    let overrides = load_prompt_overrides(&config.prompts_path)?;
    info!(
        path = %config.prompts_path.display(),
        overrides = overrides.len(),
        "Prompt templates loaded"
    );
    let prompts = PromptCatalog::with_overrides(overrides);

    // --- 3. Initialize Shared Services ---
    let api_key = config.gemini_api_key.clone().unwrap_or_else(|| {
        warn!("GEMINI_API_KEY is not set; model calls will fail until it is provided");
        String::new()
    });
    let openai_config = OpenAIConfig::new()
        .with_api_key(api_key)
        .with_api_base(config.api_base.clone());
    let gateway = Arc::new(OpenAICompatibleGateway::new(openai_config));

    let app_state = Arc::new(AppState::new(
        config.clone(),
        gateway,
        prompts,
        Arc::new(InMemoryTitleStore::new()),
    ));

    // --- 4. Create Router ---
    let app = create_router(app_state);

    // --- 5. Start Server ---
    info!(
        fast_model = %config.fast_model,
        multimodal_model = %config.multimodal_model,
        api_base = %config.api_base,
        bind_address = %config.bind_address,
        "Service configured. Starting server..."
    );
    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server has shut down.");
    Ok(())
}
