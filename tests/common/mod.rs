//! Shared test fixtures.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use commitcrunch::domain::errors::{ActivityError, ActivityResult, RemoteOperation};
use commitcrunch::domain::models::{CalendarDay, CalendarWeek};
use commitcrunch::domain::ports::RemoteDataSource;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex as StdMutex;
use std::time::Duration;

/// `weeks` full weeks of days, counts equal to the day index.
pub fn calendar(weeks: usize) -> Vec<CalendarWeek> {
    (0..weeks)
        .map(|w| CalendarWeek {
            days: (0..7)
                .map(|d| {
                    let index = w * 7 + d;
                    CalendarDay {
                        date: format!("day-{index:03}"),
                        count: u32::try_from(index).unwrap(),
                    }
                })
                .collect(),
        })
        .collect()
}

/// Scriptable in-memory remote source with call counters.
pub struct MockSource {
    weeks: Vec<CalendarWeek>,
    years: Vec<i32>,
    totals: HashMap<i32, u64>,
    calendar_delay: Duration,
    year_delays: HashMap<i32, Duration>,
    pub fail_calendar: AtomicBool,
    pub fail_list: AtomicBool,
    fail_year: StdMutex<Option<i32>>,
    pub calendar_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub total_calls: AtomicUsize,
    requested_years: StdMutex<Vec<i32>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            weeks: calendar(2),
            years: Vec::new(),
            totals: HashMap::new(),
            calendar_delay: Duration::ZERO,
            year_delays: HashMap::new(),
            fail_calendar: AtomicBool::new(false),
            fail_list: AtomicBool::new(false),
            fail_year: StdMutex::new(None),
            calendar_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            total_calls: AtomicUsize::new(0),
            requested_years: StdMutex::new(Vec::new()),
        }
    }

    pub fn with_weeks(mut self, weeks: Vec<CalendarWeek>) -> Self {
        self.weeks = weeks;
        self
    }

    pub fn with_years(mut self, years: &[(i32, u64)]) -> Self {
        self.years = years.iter().map(|(y, _)| *y).collect();
        self.totals = years.iter().copied().collect();
        self
    }

    pub fn with_calendar_delay(mut self, delay: Duration) -> Self {
        self.calendar_delay = delay;
        self
    }

    pub fn with_year_delay(mut self, year: i32, delay: Duration) -> Self {
        self.year_delays.insert(year, delay);
        self
    }

    pub fn failing_year(self, year: i32) -> Self {
        *self.fail_year.lock().unwrap() = Some(year);
        self
    }

    pub fn calendar_calls(&self) -> usize {
        self.calendar_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }

    pub fn requested_years(&self) -> Vec<i32> {
        self.requested_years.lock().unwrap().clone()
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteDataSource for MockSource {
    async fn fetch_calendar(&self, subject: &str) -> ActivityResult<Vec<CalendarWeek>> {
        self.calendar_calls.fetch_add(1, Ordering::SeqCst);
        if !self.calendar_delay.is_zero() {
            tokio::time::sleep(self.calendar_delay).await;
        }
        if self.fail_calendar.load(Ordering::SeqCst) {
            return Err(ActivityError::remote(
                subject,
                RemoteOperation::FetchCalendar,
                "upstream 502",
            ));
        }
        Ok(self.weeks.clone())
    }

    async fn list_periods(&self, subject: &str) -> ActivityResult<Vec<i32>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ActivityError::remote(
                subject,
                RemoteOperation::ListPeriods,
                "upstream 502",
            ));
        }
        Ok(self.years.clone())
    }

    async fn fetch_period_total(
        &self,
        subject: &str,
        period_start: DateTime<Utc>,
    ) -> ActivityResult<u64> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        let year = period_start.year();
        self.requested_years.lock().unwrap().push(year);

        if let Some(delay) = self.year_delays.get(&year) {
            tokio::time::sleep(*delay).await;
        }
        if *self.fail_year.lock().unwrap() == Some(year) {
            return Err(ActivityError::remote(
                subject,
                RemoteOperation::FetchPeriodTotal,
                format!("upstream 502 for {year}"),
            ));
        }
        Ok(self.totals.get(&year).copied().unwrap_or_default())
    }
}
