//! Pomodoro Timer - A Work/Break countdown served to the browser
//!
//! This is the main entry point for the pomodoro-timer application.

use std::sync::Arc;
use anyhow::anyhow;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_timer::{
    config::Config,
    state::{AppState, Minutes},
    api::create_router,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, work={}min, break={}min",
          config.host, config.port, config.work, config.break_minutes);

    let work = Minutes::new(config.work).map_err(|e| anyhow!(e))?;
    let break_ = Minutes::new(config.break_minutes).map_err(|e| anyhow!(e))?;

    // The one timer for this process
    let state = Arc::new(AppState::new(config.port, config.host.clone(), work, break_));

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Timer page on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start, /stop, /reset   - Control the countdown");
    info!("  POST /mode/{{work|break}}      - Select interval");
    info!("  PUT  /duration/{{work|break}}  - Set interval length in minutes");
    info!("  PUT  /font                   - Change display typeface");
    info!("  GET  /events                 - Display updates (SSE)");
    info!("  GET  /status                 - Current timer status");
    info!("  GET  /health                 - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
                return Err(e.into());
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
