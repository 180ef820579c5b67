//! GitHub GraphQL request and response shapes.

use serde::{Deserialize, Serialize};

use crate::domain::models::{CalendarDay, CalendarWeek};

/// Contribution calendar, week by week.
pub const CALENDAR_QUERY: &str = r"query getContributions($login: String!) {
  user(login: $login) {
    contributionsCollection {
      contributionCalendar {
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}";

/// Years the user has contributions in.
pub const YEARS_QUERY: &str = r"query getContributionYears($login: String!) {
  user(login: $login) {
    contributionsCollection {
      contributionYears
    }
  }
}";

/// Total contributions for the year starting at `$from`.
pub const YEAR_TOTAL_QUERY: &str = r"query getContributionsForYear($login: String!, $from: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $from) {
      contributionCalendar {
        totalContributions
      }
    }
  }
}";

/// GraphQL request envelope
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Serialize)]
pub struct LoginVariables<'a> {
    pub login: &'a str,
}

#[derive(Debug, Serialize)]
pub struct YearVariables<'a> {
    pub login: &'a str,
    /// RFC 3339 timestamp
    pub from: String,
}

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl GraphQlError {
    pub fn is_not_found(&self) -> bool {
        self.kind.as_deref() == Some("NOT_FOUND")
    }
}

/// `data` payload of every query: the user may be null
#[derive(Debug, Deserialize)]
pub struct UserData<T> {
    pub user: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User<C> {
    pub contributions_collection: C,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCollection {
    pub contribution_calendar: Calendar,
}

#[derive(Debug, Deserialize)]
pub struct Calendar {
    pub weeks: Vec<Week>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub contribution_days: Vec<Day>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub date: String,
    pub contribution_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearsCollection {
    pub contribution_years: Vec<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCollection {
    pub contribution_calendar: TotalCalendar,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCalendar {
    pub total_contributions: u64,
}

impl From<Week> for CalendarWeek {
    fn from(week: Week) -> Self {
        Self {
            days: week
                .contribution_days
                .into_iter()
                .map(|day| CalendarDay {
                    date: day.date,
                    count: day.contribution_count,
                })
                .collect(),
        }
    }
}
