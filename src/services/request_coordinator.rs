//! Per-request control flow for calendar and summary lookups.
//!
//! Calendar lookups go through the [`ActivityCache`]. A miss triggers one
//! remote fetch per subject: concurrent misses for the same subject join
//! the fetch already in flight instead of issuing their own. The fetch runs
//! as its own task, so it finishes and leaves the registry even when every
//! caller waiting on it has gone away. Summaries are always computed fresh.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn, Instrument};

use crate::domain::errors::{ActivityError, ActivityResult, RemoteOperation};
use crate::domain::models::{flatten_weeks, ActivitySeries, Config, Summary};
use crate::domain::ports::RemoteDataSource;
use crate::services::activity_cache::ActivityCache;
use crate::services::remote_call::bounded;
use crate::services::summary_aggregator::SummaryAggregator;

type SharedFetch = Shared<BoxFuture<'static, ActivityResult<ActivitySeries>>>;
type InFlight = Arc<Mutex<HashMap<String, SharedFetch>>>;

/// Coordinates cache lookups, remote fetches and summary aggregation.
#[derive(Clone)]
pub struct RequestCoordinator {
    cache: Arc<ActivityCache>,
    source: Arc<dyn RemoteDataSource>,
    aggregator: SummaryAggregator,
    in_flight: InFlight,
    remote_timeout: Duration,
}

impl RequestCoordinator {
    /// Create a coordinator with a sequential summary aggregator.
    pub fn new(
        cache: Arc<ActivityCache>,
        source: Arc<dyn RemoteDataSource>,
        remote_timeout: Duration,
    ) -> Self {
        Self {
            aggregator: SummaryAggregator::new(source.clone(), remote_timeout),
            cache,
            source,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            remote_timeout,
        }
    }

    /// Create a coordinator using the remote and summary sections of `config`.
    pub fn from_config(
        cache: Arc<ActivityCache>,
        source: Arc<dyn RemoteDataSource>,
        config: &Config,
    ) -> Self {
        Self::new(cache, source, Duration::from_secs(config.remote.timeout_secs))
            .with_summary_concurrency(config.summary.max_concurrency)
    }

    /// Allow up to `max_concurrency` year totals to be fetched at once.
    #[must_use]
    pub fn with_summary_concurrency(mut self, max_concurrency: usize) -> Self {
        self.aggregator = self.aggregator.with_max_concurrency(max_concurrency);
        self
    }

    pub fn cache(&self) -> &Arc<ActivityCache> {
        &self.cache
    }

    /// Number of subjects with a calendar fetch currently in flight.
    pub async fn in_flight_count(&self) -> usize {
        self.in_flight.lock().await.len()
    }

    /// Contribution calendar for `subject`, served from cache when possible.
    ///
    /// Failed fetches are not cached and leave existing entries untouched.
    #[instrument(skip(self))]
    pub async fn get_days(&self, subject: &str) -> ActivityResult<ActivitySeries> {
        if let Some(series) = self.cache.get(subject).await {
            return Ok(series);
        }

        let fetch = {
            let mut in_flight = self.in_flight.lock().await;
            if let Some(existing) = in_flight.get(subject) {
                debug!("Joining in-flight calendar fetch");
                existing.clone()
            } else {
                // The task's own registry removal waits on this lock, so the
                // entry is always inserted before it can be removed.
                let task = tokio::spawn(fetch_and_store(
                    self.cache.clone(),
                    self.source.clone(),
                    self.in_flight.clone(),
                    subject.to_string(),
                    self.remote_timeout,
                )
                .in_current_span());
                let fetch = join_fetch(task, self.in_flight.clone(), subject.to_string())
                    .boxed()
                    .shared();
                in_flight.insert(subject.to_string(), fetch.clone());
                fetch
            }
        };

        fetch.await
    }

    /// Yearly summary for `subject`. Never cached.
    pub async fn get_summary(&self, subject: &str) -> ActivityResult<Summary> {
        self.aggregator.get_summary(subject).await
    }

    pub const fn aggregator(&self) -> &SummaryAggregator {
        &self.aggregator
    }
}

/// Await a spawned calendar fetch, turning a task failure into a remote error.
async fn join_fetch(
    task: JoinHandle<ActivityResult<ActivitySeries>>,
    in_flight: InFlight,
    subject: String,
) -> ActivityResult<ActivitySeries> {
    match task.await {
        Ok(result) => result,
        Err(join_err) => {
            // A panicked fetch never reached its own registry cleanup.
            in_flight.lock().await.remove(&subject);
            Err(ActivityError::remote(
                &subject,
                RemoteOperation::FetchCalendar,
                format!("calendar fetch task failed: {join_err}"),
            ))
        }
    }
}

/// Fetch, flatten and cache one subject's calendar, then leave the registry.
async fn fetch_and_store(
    cache: Arc<ActivityCache>,
    source: Arc<dyn RemoteDataSource>,
    in_flight: InFlight,
    subject: String,
    limit: Duration,
) -> ActivityResult<ActivitySeries> {
    let result = bounded(
        &subject,
        RemoteOperation::FetchCalendar,
        limit,
        source.fetch_calendar(&subject),
    )
    .await
    .and_then(|weeks| flatten_weeks(&subject, weeks));

    match &result {
        Ok(series) => {
            debug!(subject, days = series.len(), "Caching calendar");
            cache.set(subject.clone(), series.clone()).await;
        }
        Err(err) => warn!(subject, error = %err, "Calendar fetch failed"),
    }

    in_flight.lock().await.remove(&subject);
    result
}
