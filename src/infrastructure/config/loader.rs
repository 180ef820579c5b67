use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Default project config file, read from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "commitcrunch.yaml";

/// Configuration error types
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid cache threshold: {0}. Must be at least 1")]
    InvalidThreshold(usize),

    #[error("Invalid reset interval: {0}s. Must be at least 1")]
    InvalidResetInterval(u64),

    #[error("Invalid rate limit: {0}. Must be positive")]
    InvalidRateLimit(f64),

    #[error("Invalid burst_size: {0}. Must be at least 1")]
    InvalidBurstSize(u32),

    #[error("Invalid summary max_concurrency: {0}. Must be at least 1")]
    InvalidConcurrency(usize),

    #[error("Invalid {0} timeout: must be at least 1 second")]
    InvalidTimeout(&'static str),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("GitHub base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("GitHub token missing: set GITHUB_TOKEN=<github token>")]
    MissingToken,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. ./commitcrunch.yaml (optional)
    /// 3. `path`, when given
    /// 4. `GITHUB_TOKEN` as `github.token`
    /// 5. Environment variables (COMMITCRUNCH_* prefix, `__` for nesting)
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(DEFAULT_CONFIG_FILE));

        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        let config: Config = figment
            .merge(Env::raw().only(&["GITHUB_TOKEN"]).map(|_| "github.token".into()))
            .merge(Env::prefixed("COMMITCRUNCH_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file only, without env overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.cache.threshold == 0 {
            return Err(ConfigError::InvalidThreshold(config.cache.threshold));
        }

        if config.cache.reset_interval_secs == 0 {
            return Err(ConfigError::InvalidResetInterval(
                config.cache.reset_interval_secs,
            ));
        }

        let rps = config.rate_limit.requests_per_second;
        if rps.is_nan() || rps <= 0.0 {
            return Err(ConfigError::InvalidRateLimit(
                config.rate_limit.requests_per_second,
            ));
        }

        if config.rate_limit.burst_size == 0 {
            return Err(ConfigError::InvalidBurstSize(config.rate_limit.burst_size));
        }

        if config.summary.max_concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency(
                config.summary.max_concurrency,
            ));
        }

        if config.remote.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("remote"));
        }

        if config.github.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("github"));
        }

        if config.github.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }

    /// The GitHub token, required by every command that reaches the API
    pub fn require_token(config: &Config) -> Result<String, ConfigError> {
        config
            .github
            .token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(ToString::to_string)
            .ok_or(ConfigError::MissingToken)
    }
}
