//! Integration tests for yearly summary aggregation.

mod common;

use chrono::{TimeZone, Utc};
use common::MockSource;
use commitcrunch::domain::errors::{ActivityError, RemoteOperation};
use commitcrunch::domain::models::YearSummary;
use commitcrunch::services::SummaryAggregator;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

fn mid_2024() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

#[tokio::test]
async fn test_summary_tags_current_year() {
    let source = Arc::new(MockSource::new().with_years(&[(2022, 120), (2023, 340), (2024, 55)]));
    let aggregator = SummaryAggregator::new(source.clone(), Duration::from_secs(5));

    let summary = aggregator.get_summary_at("octocat", mid_2024()).await.unwrap();

    assert_eq!(
        summary.years,
        vec![
            YearSummary {
                current: false,
                contribs: 120,
                value: 2022
            },
            YearSummary {
                current: false,
                contribs: 340,
                value: 2023
            },
            YearSummary {
                current: true,
                contribs: 55,
                value: 2024
            },
        ]
    );
    assert_eq!(source.requested_years(), vec![2022, 2023, 2024]);
}

#[tokio::test]
async fn test_listed_order_is_preserved() {
    let source = Arc::new(MockSource::new().with_years(&[(2024, 1), (2019, 2), (2021, 3)]));
    let aggregator = SummaryAggregator::new(source, Duration::from_secs(5));

    let summary = aggregator.get_summary_at("octocat", mid_2024()).await.unwrap();
    let values: Vec<i32> = summary.years.iter().map(|y| y.value).collect();

    assert_eq!(values, vec![2024, 2019, 2021]);
    assert_eq!(summary.total(), 6);
}

#[tokio::test]
async fn test_no_years_is_empty_summary() {
    let source = Arc::new(MockSource::new());
    let aggregator = SummaryAggregator::new(source.clone(), Duration::from_secs(5));

    let summary = aggregator.get_summary_at("newbie", mid_2024()).await.unwrap();

    assert!(summary.years.is_empty());
    assert!(summary.best_year().is_none());
    assert_eq!(source.total_calls(), 0);
}

#[tokio::test]
async fn test_one_failed_year_fails_whole_summary() {
    let source = Arc::new(
        MockSource::new()
            .with_years(&[(2020, 1), (2021, 2), (2022, 3), (2023, 4), (2024, 5)])
            .failing_year(2022),
    );
    let aggregator = SummaryAggregator::new(source.clone(), Duration::from_secs(5));

    let err = aggregator.get_summary_at("octocat", mid_2024()).await.unwrap_err();

    assert!(matches!(
        err,
        ActivityError::RemoteUnavailable {
            operation: RemoteOperation::FetchPeriodTotal,
            ..
        }
    ));
    // Sequential aggregation stops at the first failure.
    assert_eq!(source.requested_years(), vec![2020, 2021, 2022]);
}

#[tokio::test]
async fn test_list_failure_skips_totals() {
    let source = Arc::new(MockSource::new().with_years(&[(2023, 1), (2024, 2)]));
    source.fail_list.store(true, Ordering::SeqCst);
    let aggregator = SummaryAggregator::new(source.clone(), Duration::from_secs(5));

    let err = aggregator.get_summary_at("octocat", mid_2024()).await.unwrap_err();

    assert!(matches!(
        err,
        ActivityError::RemoteUnavailable {
            operation: RemoteOperation::ListPeriods,
            ..
        }
    ));
    assert_eq!(source.total_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_fetch_keeps_listed_order() {
    let source = Arc::new(
        MockSource::new()
            .with_years(&[(2021, 10), (2022, 20), (2023, 30), (2024, 40)])
            .with_year_delay(2021, Duration::from_millis(400))
            .with_year_delay(2022, Duration::from_millis(100))
            .with_year_delay(2023, Duration::from_millis(300)),
    );
    let aggregator =
        SummaryAggregator::new(source.clone(), Duration::from_secs(5)).with_max_concurrency(4);

    let summary = aggregator.get_summary_at("octocat", mid_2024()).await.unwrap();

    let pairs: Vec<(i32, u64)> = summary.years.iter().map(|y| (y.value, y.contribs)).collect();
    assert_eq!(pairs, vec![(2021, 10), (2022, 20), (2023, 30), (2024, 40)]);
    assert_eq!(source.total_calls(), 4);
    assert_eq!(summary.best_year().map(|y| y.value), Some(2024));
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_failure_fails_whole_summary() {
    let source = Arc::new(
        MockSource::new()
            .with_years(&[(2022, 1), (2023, 2), (2024, 3)])
            .with_year_delay(2024, Duration::from_millis(200))
            .failing_year(2023),
    );
    let aggregator =
        SummaryAggregator::new(source, Duration::from_secs(5)).with_max_concurrency(3);

    let err = aggregator.get_summary_at("octocat", mid_2024()).await.unwrap_err();

    assert_eq!(err.subject(), Some("octocat"));
    assert!(matches!(
        err,
        ActivityError::RemoteUnavailable {
            operation: RemoteOperation::FetchPeriodTotal,
            ..
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_slow_year_times_out() {
    let source = Arc::new(
        MockSource::new()
            .with_years(&[(2023, 1), (2024, 2)])
            .with_year_delay(2024, Duration::from_secs(90)),
    );
    let aggregator = SummaryAggregator::new(source, Duration::from_secs(10));

    let err = aggregator.get_summary_at("octocat", mid_2024()).await.unwrap_err();

    assert_eq!(
        err,
        ActivityError::Timeout {
            subject: "octocat".to_string(),
            operation: RemoteOperation::FetchPeriodTotal,
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_dropped_summary_stops_outstanding_year_fetches() {
    let source = Arc::new(
        MockSource::new()
            .with_years(&[(2021, 1), (2022, 2), (2023, 3), (2024, 4)])
            .with_year_delay(2021, Duration::from_secs(1))
            .with_year_delay(2022, Duration::from_secs(1))
            .with_year_delay(2023, Duration::from_secs(1))
            .with_year_delay(2024, Duration::from_secs(1)),
    );
    let aggregator =
        SummaryAggregator::new(source.clone(), Duration::from_secs(5)).with_max_concurrency(2);

    let request = tokio::spawn(async move { aggregator.get_summary_at("octocat", mid_2024()).await });
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(source.total_calls(), 2);

    request.abort();
    assert!(request.await.unwrap_err().is_cancelled());

    // Years still waiting for a permit never reach the remote.
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(source.total_calls(), 2);
}
