//! Influrank API Server
//!
//! Serves the ranked influencer leaderboard and trending coins as JSON.
//! Listings are fetched from the backend once per platform and cached for
//! the lifetime of the process.

use dotenvy::dotenv;
use influrank::core::http::start_server;
use influrank::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let port = influrank::config::get_port();
    let env = influrank::config::get_environment();
    info!("Starting Influrank API Server");
    info!(environment = %env, "Environment");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
            info!("API server stopped");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
