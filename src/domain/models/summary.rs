use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Contribution total for a single calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSummary {
    /// Whether this is the year the request was served in
    pub current: bool,

    /// Total contributions within the year
    pub contribs: u64,

    /// The calendar year
    pub value: i32,
}

/// Per-year totals in the order the remote source listed the years.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub years: Vec<YearSummary>,
}

impl Summary {
    /// Year with the most contributions; the earliest listed wins ties.
    pub fn best_year(&self) -> Option<&YearSummary> {
        self.years
            .iter()
            .reduce(|best, year| if year.contribs > best.contribs { year } else { best })
    }

    /// Sum of all yearly totals.
    pub fn total(&self) -> u64 {
        self.years.iter().map(|y| y.contribs).sum()
    }
}

/// First instant of `year` in UTC.
///
/// Returns `None` for years chrono cannot represent.
pub fn period_start(year: i32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single()
}

/// Whether `year` is the calendar year `now` falls in.
pub fn is_current_period(year: i32, now: DateTime<Utc>) -> bool {
    year == now.year()
}
