//! Domain models for contribution activity.

pub mod activity;
pub mod config;
pub mod summary;

pub use activity::{flatten_weeks, ActivitySeries, CalendarDay, CalendarWeek, DayRecord, DAYS_PER_WEEK};
pub use config::{
    CacheConfig, Config, GithubConfig, LogFormat, LoggingConfig, RateLimitConfig, RemoteConfig,
    ResetMode, RotationPolicy, ServerConfig, SummaryConfig,
};
pub use summary::{is_current_period, period_start, Summary, YearSummary};
