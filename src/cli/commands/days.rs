//! Implementation of the `commitcrunch days` command.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use super::build_coordinator;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::cli::types::LookupArgs;
use crate::domain::models::ActivitySeries;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::LoggerImpl;
use crate::services::ActivityCache;

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct DaysOutput {
    pub days: ActivitySeries,
}

impl CommandOutput for DaysOutput {
    fn to_human(&self) -> String {
        let total: u64 = self.days.iter().map(|d| u64::from(d.count)).sum();
        format!(
            "{}\n{} contributions over {} days",
            TableFormatter::new().format_calendar(&self.days),
            total,
            self.days.len()
        )
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
    let days = coordinator.get_days(&args.username).await?;

    output(&DaysOutput { days }, json_mode);
    Ok(())
}
