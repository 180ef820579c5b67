use serde::{Deserialize, Serialize};

use crate::domain::errors::{ActivityError, ActivityResult};

/// Number of day entries in every calendar week reported upstream.
pub const DAYS_PER_WEEK: usize = 7;

/// One day's activity count for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,

    /// Number of contributions made that day
    #[serde(rename = "contribs")]
    pub count: u32,
}

impl DayRecord {
    pub fn new(date: impl Into<String>, count: u32) -> Self {
        Self {
            date: date.into(),
            count,
        }
    }
}

/// Ordered day records spanning whole weeks, week-major then day-of-week.
pub type ActivitySeries = Vec<DayRecord>;

/// A single day as reported by the remote source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: String,
    pub count: u32,
}

/// A week of days as reported by the remote source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarWeek {
    pub days: Vec<CalendarDay>,
}

/// Flatten weeks of days into a single series.
///
/// Week `i` day `d` lands at index `i * 7 + d`. A week that does not carry
/// exactly seven days is rejected instead of shifting every later day.
pub fn flatten_weeks(subject: &str, weeks: Vec<CalendarWeek>) -> ActivityResult<ActivitySeries> {
    let mut series = Vec::with_capacity(weeks.len() * DAYS_PER_WEEK);

    for (index, week) in weeks.into_iter().enumerate() {
        if week.days.len() != DAYS_PER_WEEK {
            return Err(ActivityError::MalformedCalendar {
                subject: subject.to_string(),
                week: index,
                days: week.days.len(),
            });
        }

        series.extend(
            week.days
                .into_iter()
                .map(|day| DayRecord::new(day.date, day.count)),
        );
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn week(start: usize) -> CalendarWeek {
        CalendarWeek {
            days: (0..DAYS_PER_WEEK)
                .map(|d| CalendarDay {
                    date: format!("day-{}", start + d),
                    count: u32::try_from(start + d).unwrap(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_flatten_two_weeks() {
        let series = flatten_weeks("octocat", vec![week(0), week(7)]).unwrap();

        assert_eq!(series.len(), 14);
        for (i, day) in series.iter().enumerate() {
            assert_eq!(day.date, format!("day-{i}"));
        }
        assert_eq!(series[6].count, 6);
        assert_eq!(series[7].count, 7);
    }

    #[test]
    fn test_flatten_empty() {
        assert!(flatten_weeks("octocat", vec![]).unwrap().is_empty());
    }

    #[test]
    fn test_flatten_rejects_short_week() {
        let mut short = week(7);
        short.days.truncate(4);

        let err = flatten_weeks("octocat", vec![week(0), short]).unwrap_err();
        assert_eq!(
            err,
            ActivityError::MalformedCalendar {
                subject: "octocat".to_string(),
                week: 1,
                days: 4,
            }
        );
    }

    #[test]
    fn test_day_record_json_shape() {
        let json = serde_json::to_value(DayRecord::new("2024-01-01", 3)).unwrap();
        assert_eq!(json, serde_json::json!({"date": "2024-01-01", "contribs": 3}));
    }

    proptest! {
        #[test]
        fn prop_flatten_is_week_major(weeks in 0usize..60) {
            let input: Vec<_> = (0..weeks).map(|w| week(w * DAYS_PER_WEEK)).collect();
            let series = flatten_weeks("octocat", input).unwrap();

            prop_assert_eq!(series.len(), weeks * DAYS_PER_WEEK);
            for (i, day) in series.iter().enumerate() {
                prop_assert_eq!(day.count as usize, i);
            }
        }
    }
}
