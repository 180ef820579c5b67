//! GitHub GraphQL API client implementation

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{header, Client as ReqwestClient};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::errors::GithubApiError;
use super::rate_limiter::GithubRateLimiter;
use super::types::{
    CalendarCollection, GraphQlRequest, GraphQlResponse, LoginVariables, TotalCollection, User,
    UserData, YearVariables, YearsCollection, CALENDAR_QUERY, YEARS_QUERY, YEAR_TOTAL_QUERY,
};
use crate::domain::errors::{ActivityResult, RemoteOperation};
use crate::domain::models::{CalendarWeek, Config};
use crate::domain::ports::RemoteDataSource;

/// Configuration for the GitHub API client
#[derive(Debug, Clone)]
pub struct GithubClientConfig {
    /// Token sent as `Authorization: bearer <token>`
    pub token: String,

    /// API root; GraphQL lives at `{base_url}/graphql`
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User-Agent header value
    pub user_agent: String,

    /// Sustained outbound request rate
    pub rate_limit_rps: f64,

    /// Outbound burst allowance
    pub burst_size: u32,
}

impl GithubClientConfig {
    /// Build from the application config and a resolved token
    pub fn from_config(config: &Config, token: String) -> Self {
        Self {
            token,
            base_url: config.github.base_url.clone(),
            timeout_secs: config.github.timeout_secs,
            user_agent: config.github.user_agent.clone(),
            rate_limit_rps: config.rate_limit.requests_per_second,
            burst_size: config.rate_limit.burst_size,
        }
    }
}

/// HTTP client for the GitHub GraphQL API
///
/// Features:
/// - Connection pooling and reuse (via reqwest::Client)
/// - Outbound rate limiting
/// - Request timeout
/// - GraphQL error and missing-user detection
pub struct GithubClient {
    http_client: ReqwestClient,
    token: String,
    graphql_url: String,
    rate_limiter: GithubRateLimiter,
}

impl GithubClient {
    /// Create a new GitHub client
    ///
    /// # Returns
    /// * `Ok(GithubClient)` - Successfully created client
    /// * `Err(anyhow::Error)` - Failed to build HTTP client or rate limiter
    pub fn new(config: GithubClientConfig) -> Result<Self> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent)
            .pool_max_idle_per_host(10)
            .tcp_nodelay(true)
            .build()
            .context("Failed to build HTTP client")?;

        let rate_limiter = GithubRateLimiter::new(config.rate_limit_rps, config.burst_size)
            .context("Invalid rate limit settings")?;

        Ok(Self {
            http_client,
            token: config.token,
            graphql_url: format!("{}/graphql", config.base_url.trim_end_matches('/')),
            rate_limiter,
        })
    }

    /// Send a GraphQL query and unwrap the `user` field of its data
    async fn query_user<V, C>(
        &self,
        login: &str,
        query: &str,
        variables: V,
    ) -> Result<User<C>, GithubApiError>
    where
        V: Serialize + Send,
        C: DeserializeOwned,
    {
        self.rate_limiter.acquire().await;

        let response = self
            .http_client
            .post(&self.graphql_url)
            .header(header::AUTHORIZATION, format!("bearer {}", self.token))
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            let err = GithubApiError::from_status(status, body);
            warn!(%status, transient = err.is_transient(), "GitHub API request failed");
            return Err(err);
        }

        let body = response.bytes().await?;
        let parsed: GraphQlResponse<UserData<User<C>>> = serde_json::from_slice(&body)?;

        if parsed.errors.iter().any(|e| e.is_not_found()) {
            return Err(GithubApiError::UserNotFound(login.to_string()));
        }
        if !parsed.errors.is_empty() {
            return Err(GithubApiError::GraphQl(
                parsed.errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        match parsed.data {
            Some(UserData { user: Some(user) }) => Ok(user),
            Some(UserData { user: None }) => Err(GithubApiError::UserNotFound(login.to_string())),
            None => Err(GithubApiError::EmptyResponse),
        }
    }
}

#[async_trait]
impl RemoteDataSource for GithubClient {
    #[instrument(skip(self))]
    async fn fetch_calendar(&self, subject: &str) -> ActivityResult<Vec<CalendarWeek>> {
        let user: User<CalendarCollection> = self
            .query_user(subject, CALENDAR_QUERY, LoginVariables { login: subject })
            .await
            .map_err(|e| e.into_activity_error(subject, RemoteOperation::FetchCalendar))?;

        let weeks = user.contributions_collection.contribution_calendar.weeks;
        debug!(weeks = weeks.len(), "Fetched contribution calendar");
        Ok(weeks.into_iter().map(CalendarWeek::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_periods(&self, subject: &str) -> ActivityResult<Vec<i32>> {
        let user: User<YearsCollection> = self
            .query_user(subject, YEARS_QUERY, LoginVariables { login: subject })
            .await
            .map_err(|e| e.into_activity_error(subject, RemoteOperation::ListPeriods))?;

        Ok(user.contributions_collection.contribution_years)
    }

    #[instrument(skip(self))]
    async fn fetch_period_total(
        &self,
        subject: &str,
        period_start: DateTime<Utc>,
    ) -> ActivityResult<u64> {
        let variables = YearVariables {
            login: subject,
            from: period_start.to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        let user: User<TotalCollection> = self
            .query_user(subject, YEAR_TOTAL_QUERY, variables)
            .await
            .map_err(|e| e.into_activity_error(subject, RemoteOperation::FetchPeriodTotal))?;

        Ok(user
            .contributions_collection
            .contribution_calendar
            .total_contributions)
    }
}
