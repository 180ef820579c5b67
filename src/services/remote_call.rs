//! Time-bounded remote calls.

use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::domain::errors::{ActivityError, ActivityResult, RemoteOperation};

/// Run `call`, failing with [`ActivityError::Timeout`] once `limit` elapses.
pub async fn bounded<T, F>(
    subject: &str,
    operation: RemoteOperation,
    limit: Duration,
    call: F,
) -> ActivityResult<T>
where
    F: Future<Output = ActivityResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            warn!(subject, %operation, limit_ms = limit.as_millis() as u64, "Remote call timed out");
            Err(ActivityError::Timeout {
                subject: subject.to_string(),
                operation,
            })
        }
    }
}
