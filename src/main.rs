// cosmos-index - HTTP facade for Cosmos file indexes
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use cosmos_index::cli::Args;
use cosmos_index::config::AppConfig;
use cosmos_index::cosmos::{CosmosClient, IndexApi};
use cosmos_index::server::create_router;
use cosmos_index::utils::logging;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting cosmos-index v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build the Cosmos client (fails fast without an API key)
    info!("Connecting to Cosmos platform at {}", config.cosmos.api_server);
    let client = CosmosClient::new(&config.cosmos)?;

    // Phase 4: Optional health check; a failure is only logged
    if config.cosmos.health_check {
        match client.check_health().await {
            Ok(status) => info!("Cosmos platform health: {}", status),
            Err(e) => warn!("Cosmos platform health check failed: {}", e),
        }
    }

    // Phase 5: Build and start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, Arc::new(client));

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 6: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
