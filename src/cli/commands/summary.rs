//! Implementation of the `commitcrunch summary` command.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use super::build_coordinator;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::cli::types::LookupArgs;
use crate::domain::models::Summary;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::LoggerImpl;
use crate::services::ActivityCache;

#[derive(Debug, Serialize)]
pub struct SummaryOutput {
    pub username: String,
    #[serde(flatten)]
    pub summary: Summary,
}

impl CommandOutput for SummaryOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![TableFormatter::new().format_summary(&self.summary)];
        match self.summary.best_year() {
            Some(best) => lines.push(format!(
                "The year with most contributions was {}. {} made {} contributions that year!",
                best.value, self.username, best.contribs
            )),
            None => lines.push(format!("{} has no recorded contributions", self.username)),
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: LookupArgs, json_mode: bool, config_path: Option<&Path>) -> Result<()> {
    let mut config = ConfigLoader::load(config_path)?;
    config.logging.level = "warn".to_string();
    let _logger = LoggerImpl::init(&config.logging)?;

    let coordinator = build_coordinator(&config, Arc::new(ActivityCache::new(1)))?;
    let summary = coordinator.get_summary(&args.username).await?;

    output(
        &SummaryOutput {
            username: args.username,
            summary,
        },
        json_mode,
    );
    Ok(())
}
