//! Countdown - A countdown timer engine with a small HTTP control surface
//! 
//! This is the main entry point for the countdown server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown::{
    config::Config,
    state::AppState,
    api::create_router,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, preset={:02}:{:02}:{:02}",
          config.host, config.port, config.hours, config.minutes, config.seconds);

    // Create application state holding the single timer
    let state = Arc::new(AppState::with_preset(
        config.port,
        config.host.clone(),
        config.hours,
        config.minutes,
        config.seconds,
    ));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /timer         - Current timer state");
    info!("  POST /timer/adjust  - Step hour/minute/second up or down");
    info!("  POST /timer/start   - Start or restart the countdown");
    info!("  POST /timer/cancel  - Cancel the countdown");
    info!("  POST /timer/toggle  - Start when idle, cancel when running");
    info!("  GET  /timer/stream  - Server-sent timer updates");
    info!("  GET  /health        - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        signal = shutdown_signal() => {
            match signal {
                Ok(_) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Failed to listen for shutdown signals: {}", e),
            }
        }
    }

    // No ticks may reach the timer once the session is gone
    if let Err(e) = state.shutdown() {
        tracing::error!("Failed to stop timer: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
