//! Symptom Checker - Binary Entry Point
//!
//! Loads configuration, dataset and recognizer, then serves the HTTP API.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use symptom_checker::api::{create_router, AppState};
use symptom_checker::config::{AppConfig, DEFAULT_LOG_FILTER};
use symptom_checker::context::ServiceContext;
use symptom_checker::feedback::FeedbackLog;
use symptom_checker::types::StartupResult;

fn main() -> StartupResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = AppConfig::from_env()?;

    // Built before the runtime starts: the remote recognizer's blocking
    // client cannot be created inside an async context
    let ctx = ServiceContext::load(&config)?;
    let feedback = FeedbackLog::new(&config.feedback_path);
    let state = Arc::new(AppState::new(ctx, feedback));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(config, state))
}

async fn serve(config: AppConfig, state: Arc<AppState>) -> StartupResult<()> {
    let app = create_router(state);
    let listener = TcpListener::bind(config.bind_addr).await?;

    info!(
        version = symptom_checker::VERSION,
        addr = %config.bind_addr,
        feedback = %config.feedback_path.display(),
        "Symptom checker listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
