//! medmatch-server: symptom-to-specialist HTTP service binary entrypoint.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medmatch_server::ai::{GeminiClient, SymptomAnalyzer};
use medmatch_server::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Create service clients
    let model = GeminiClient::new(config.gemini_api_key.clone())
        .with_model(config.gemini_model.clone())
        .with_base_url(config.gemini_base_url.clone());
    let store = medmatch_server::db::connect(&config.directory)?;
    let analyzer = SymptomAnalyzer::new(Arc::new(model), store);

    tracing::info!(model = %config.gemini_model, "Gemini client configured");
    if config.cors_origins.iter().any(|o| o == "*") {
        tracing::info!("CORS enabled for all origins");
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS restricted");
    }

    // Build application
    let app = medmatch_server::build_app(analyzer, &config);

    // Start server
    let addr: SocketAddr = config.bind_address.parse()?;
    tracing::info!("Starting MedMatch server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
