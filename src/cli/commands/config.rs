//! Implementation of the `commitcrunch config` commands.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::cli::output::{output, CommandOutput};
use crate::cli::types::ConfigCommands;
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;

const REDACTED: &str = "<redacted>";

#[derive(Debug, Serialize)]
pub struct ConfigShowOutput {
    pub config: Config,
}

impl ConfigShowOutput {
    /// Wrap `config` with the token masked
    pub fn redacted(mut config: Config) -> Self {
        if config.github.token.is_some() {
            config.github.token = Some(REDACTED.to_string());
        }
        Self { config }
    }
}

impl CommandOutput for ConfigShowOutput {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.config)
            .unwrap_or_else(|e| format!("Failed to render config: {e}"))
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigValidateOutput {
    pub valid: bool,
    pub token_present: bool,
}

impl CommandOutput for ConfigValidateOutput {
    fn to_human(&self) -> String {
        let mut lines = vec!["Configuration is valid".to_string()];
        if !self.token_present {
            lines.push("Warning: no GitHub token configured (set GITHUB_TOKEN)".to_string());
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(command: ConfigCommands, json_mode: bool, config_path: Option<&Path>) -> Result<()> {
    let config = ConfigLoader::load(config_path).context("Configuration is invalid")?;

    match command {
        ConfigCommands::Show => output(&ConfigShowOutput::redacted(config), json_mode),
        ConfigCommands::Validate => output(
            &ConfigValidateOutput {
                valid: true,
                token_present: ConfigLoader::require_token(&config).is_ok(),
            },
            json_mode,
        ),
    }

    Ok(())
}
