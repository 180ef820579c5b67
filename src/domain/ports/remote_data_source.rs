use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::errors::ActivityResult;
use crate::domain::models::CalendarWeek;

/// Remote provider of per-user contribution data
///
/// Implementations are expected to fail explicitly rather than return
/// empty data on upstream trouble. Calls may be slow; callers never hold
/// a lock across them.
#[async_trait]
pub trait RemoteDataSource: Send + Sync {
    /// Fetch the subject's contribution calendar
    ///
    /// # Arguments
    /// * `subject` - The user login
    ///
    /// # Returns
    /// * `Ok(weeks)` - Weeks in chronological order, each with seven days
    /// * `Err(ActivityError)` on any upstream failure
    async fn fetch_calendar(&self, subject: &str) -> ActivityResult<Vec<CalendarWeek>>;

    /// List the years the subject has any recorded activity in
    ///
    /// # Returns
    /// * `Ok(years)` - Years in the order the provider reports them
    /// * `Err(ActivityError)` on any upstream failure
    async fn list_periods(&self, subject: &str) -> ActivityResult<Vec<i32>>;

    /// Total contributions within the year starting at `period_start`
    async fn fetch_period_total(
        &self,
        subject: &str,
        period_start: DateTime<Utc>,
    ) -> ActivityResult<u64>;
}
