use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use chat_relay::{
    config::Config,
    routes::{cors_layer, create_router},
    services::{openai::OpenAiProvider, provider::CompletionProvider, system_prompt::SystemPrompt},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv_override().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    let system_prompt = SystemPrompt::load(&config.system_prompt_path)
        .await
        .with_context(|| format!("failed to read system prompt from {}", config.system_prompt_path.display()))?;

    if config.openai.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; chat requests will fail until it is configured");
    }

    let provider: Arc<dyn CompletionProvider> =
        Arc::new(OpenAiProvider::new(config.openai.clone()).context("failed to build provider client")?);

    let state = Arc::new(AppState::new(system_prompt, provider, config.model.clone()));

    let app = create_router()
        .with_state(state)
        .layer(cors_layer(&config.cors_origins)?);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    tracing::info!(
        addr = %config.listen_addr,
        model = %config.model,
        origins = ?config.cors_origins,
        "Chat relay listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
