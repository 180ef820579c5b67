//! CLI command implementations.

pub mod config;
pub mod days;
pub mod serve;
pub mod summary;

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::github::{GithubClient, GithubClientConfig};
use crate::services::{ActivityCache, RequestCoordinator};

/// Wire a coordinator to the real GitHub API using `config`.
pub(crate) fn build_coordinator(
    config: &Config,
    cache: Arc<ActivityCache>,
) -> Result<RequestCoordinator> {
    let token = ConfigLoader::require_token(config)?;
    let client = GithubClient::new(GithubClientConfig::from_config(config, token))
        .context("Failed to create GitHub client")?;

    Ok(RequestCoordinator::from_config(cache, Arc::new(client), config))
}
