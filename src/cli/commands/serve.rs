//! Implementation of the `commitcrunch serve` command.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use super::build_coordinator;
use crate::cli::types::ServeArgs;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::http::{serve, AppState};
use crate::infrastructure::logging::LoggerImpl;
use crate::services::{ActivityCache, CacheResetDaemon, ResetDaemonConfig};

pub async fn execute(args: ServeArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = ConfigLoader::load(config_path)?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let _logger = LoggerImpl::init(&config.logging)?;
    info!("starting");

    let cache = Arc::new(ActivityCache::new(config.cache.threshold));
    let coordinator = build_coordinator(&config, cache.clone())?;

    let daemon = CacheResetDaemon::new(cache, ResetDaemonConfig::from(&config.cache)).spawn();

    let result = serve(&config.server, AppState::new(coordinator), shutdown_signal()).await;

    let resets = daemon.status().await.total_resets;
    daemon.shutdown().await;
    info!(cache_resets = resets, "stopped");
    result
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
