//! Domain errors for the commitcrunch service.

use thiserror::Error;

/// Errors surfaced by the cache/aggregation core.
///
/// Every variant carries enough context (subject, operation) to be logged
/// on its own. The type is `Clone` so a single in-flight fetch result can be
/// handed to every caller waiting on it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActivityError {
    #[error("Remote unavailable during {operation} for {subject}: {message}")]
    RemoteUnavailable {
        subject: String,
        operation: RemoteOperation,
        message: String,
    },

    #[error("Subject not found upstream: {0}")]
    SubjectNotFound(String),

    #[error("Malformed calendar for {subject}: week {week} has {days} days, expected 7")]
    MalformedCalendar {
        subject: String,
        week: usize,
        days: usize,
    },

    #[error("Timed out during {operation} for {subject}")]
    Timeout {
        subject: String,
        operation: RemoteOperation,
    },

    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl ActivityError {
    /// Shorthand for a [`ActivityError::RemoteUnavailable`].
    pub fn remote(
        subject: impl Into<String>,
        operation: RemoteOperation,
        message: impl Into<String>,
    ) -> Self {
        Self::RemoteUnavailable {
            subject: subject.into(),
            operation,
            message: message.into(),
        }
    }

    /// Subject the failure relates to, if any.
    pub fn subject(&self) -> Option<&str> {
        match self {
            Self::RemoteUnavailable { subject, .. }
            | Self::MalformedCalendar { subject, .. }
            | Self::Timeout { subject, .. } => Some(subject),
            Self::SubjectNotFound(subject) => Some(subject),
            Self::Encoding(_) => None,
        }
    }
}

/// The remote call an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    FetchCalendar,
    ListPeriods,
    FetchPeriodTotal,
}

impl std::fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::FetchCalendar => "fetch_calendar",
            Self::ListPeriods => "list_periods",
            Self::FetchPeriodTotal => "fetch_period_total",
        };
        f.write_str(name)
    }
}

pub type ActivityResult<T> = Result<T, ActivityError>;

impl From<serde_json::Error> for ActivityError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}
