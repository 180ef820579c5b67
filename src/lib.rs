//! Commitcrunch - cached GitHub contribution service
//!
//! Serves per-user contribution calendars and yearly totals from the GitHub
//! GraphQL API, shielding callers from its latency and rate limits.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, the remote source port, errors
//! - **Service Layer** (`services`): the activity cache and its reset daemon,
//!   summary aggregation and the request coordinator
//! - **Infrastructure Layer** (`infrastructure`): GitHub client, HTTP server,
//!   configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::{sync::Arc, time::Duration};
//! use commitcrunch::services::{ActivityCache, RequestCoordinator};
//!
//! let cache = Arc::new(ActivityCache::new(100));
//! let coordinator = RequestCoordinator::new(cache, source, Duration::from_secs(30));
//! let days = coordinator.get_days("octocat").await?;
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{ActivityError, ActivityResult, RemoteOperation};
pub use domain::models::{
    ActivitySeries, CalendarDay, CalendarWeek, Config, DayRecord, Summary, YearSummary,
};
pub use domain::ports::RemoteDataSource;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ActivityCache, CacheResetDaemon, RequestCoordinator, SummaryAggregator};
