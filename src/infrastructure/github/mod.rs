pub mod client;
pub mod errors;
pub mod rate_limiter;
pub mod types;

pub use client::{GithubClient, GithubClientConfig};
pub use errors::GithubApiError;
pub use rate_limiter::GithubRateLimiter;
