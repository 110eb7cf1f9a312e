//! pipeline-demo entry point.
//!
//! Reads configuration from the environment, initializes tracing, builds the
//! Axum router and serves it until SIGTERM/SIGINT.

use std::time::Instant;

use clap::Parser;

use pipeline_demo::logging::init_tracing;
use pipeline_demo::{create_router, http, AppConfig, AppError, AppState};

/// Demo HTTP service for validating a deployment pipeline.
///
/// Configured through PORT, HOST, APP_VERSION, NODE_ENV and LOG_FORMAT.
#[derive(Parser, Debug)]
#[command(name = "pipeline-demo", version, about)]
struct Args {
    /// Log level filter (e.g., "pipeline_demo=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let started_at = Instant::now();
    let args = Args::parse();

    let config = AppConfig::from_env().map_err(AppError::from)?;

    init_tracing(args.log_level, config.logging.format)?;

    let state = AppState::with_start(config.clone(), started_at);
    let app = create_router(state);

    if let Err(e) = http::start_server(app, &config).await {
        tracing::error!(error = %e, "Server failed");
        return Err(AppError::from(e).into());
    }

    Ok(())
}
