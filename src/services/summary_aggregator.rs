//! Yearly contribution summary aggregation.
//!
//! One `list_periods` call, then one `fetch_period_total` call per year.
//! Results keep the listed year order and a single failure fails the whole
//! summary.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, instrument};

use crate::domain::errors::{ActivityError, ActivityResult, RemoteOperation};
use crate::domain::models::{is_current_period, period_start, Summary, YearSummary};
use crate::domain::ports::RemoteDataSource;
use crate::services::remote_call::bounded;

/// Builds per-year summaries from a [`RemoteDataSource`].
#[derive(Clone)]
pub struct SummaryAggregator {
    source: Arc<dyn RemoteDataSource>,
    max_concurrency: usize,
    remote_timeout: Duration,
}

impl SummaryAggregator {
    /// Sequential aggregator with the given per-call timeout.
    pub fn new(source: Arc<dyn RemoteDataSource>, remote_timeout: Duration) -> Self {
        Self {
            source,
            max_concurrency: 1,
            remote_timeout,
        }
    }

    /// Fetch up to `max_concurrency` year totals at once. Zero is treated as one.
    #[must_use]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub const fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Summary for `subject`, tagging the year we are currently in.
    pub async fn get_summary(&self, subject: &str) -> ActivityResult<Summary> {
        self.get_summary_at(subject, Utc::now()).await
    }

    /// Summary for `subject` with `now` deciding which year is current.
    #[instrument(skip(self, now), fields(concurrency = self.max_concurrency))]
    pub async fn get_summary_at(
        &self,
        subject: &str,
        now: DateTime<Utc>,
    ) -> ActivityResult<Summary> {
        let years = bounded(
            subject,
            RemoteOperation::ListPeriods,
            self.remote_timeout,
            self.source.list_periods(subject),
        )
        .await?;

        debug!(years = years.len(), "Listed contribution years");

        let totals = if self.max_concurrency > 1 && years.len() > 1 {
            self.fetch_totals_concurrently(subject, &years).await?
        } else {
            self.fetch_totals_sequentially(subject, &years).await?
        };

        let years = years
            .into_iter()
            .zip(totals)
            .map(|(value, contribs)| YearSummary {
                current: is_current_period(value, now),
                contribs,
                value,
            })
            .collect();

        Ok(Summary { years })
    }

    async fn fetch_totals_sequentially(
        &self,
        subject: &str,
        years: &[i32],
    ) -> ActivityResult<Vec<u64>> {
        let mut totals = Vec::with_capacity(years.len());
        for &year in years {
            totals.push(
                fetch_year_total(self.source.as_ref(), subject, year, self.remote_timeout).await?,
            );
        }
        Ok(totals)
    }

    /// Bounded fan-out. Outstanding fetches live in a [`JoinSet`], so they
    /// are aborted when this future is dropped or the first failure returns.
    async fn fetch_totals_concurrently(
        &self,
        subject: &str,
        years: &[i32],
    ) -> ActivityResult<Vec<u64>> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();

        for (index, &year) in years.iter().enumerate() {
            let source = self.source.clone();
            let subject = subject.to_string();
            let semaphore = semaphore.clone();
            let limit = self.remote_timeout;

            tasks.spawn(async move {
                let total = match semaphore.acquire_owned().await {
                    Ok(_permit) => fetch_year_total(source.as_ref(), &subject, year, limit).await,
                    Err(_) => Err(ActivityError::remote(
                        &subject,
                        RemoteOperation::FetchPeriodTotal,
                        "semaphore closed",
                    )),
                };
                (index, total)
            });
        }

        // Slots are filled by index so the listed year order survives.
        let mut totals = vec![0; years.len()];
        while let Some(joined) = tasks.join_next().await {
            let (index, total) = joined.map_err(|join_err| {
                ActivityError::remote(
                    subject,
                    RemoteOperation::FetchPeriodTotal,
                    format!("year fetch task failed: {join_err}"),
                )
            })?;
            totals[index] = total?;
        }

        Ok(totals)
    }
}

async fn fetch_year_total(
    source: &dyn RemoteDataSource,
    subject: &str,
    year: i32,
    limit: Duration,
) -> ActivityResult<u64> {
    let start = period_start(year).ok_or_else(|| {
        ActivityError::remote(
            subject,
            RemoteOperation::ListPeriods,
            format!("year {year} is out of range"),
        )
    })?;

    bounded(
        subject,
        RemoteOperation::FetchPeriodTotal,
        limit,
        source.fetch_period_total(subject, start),
    )
    .await
}
