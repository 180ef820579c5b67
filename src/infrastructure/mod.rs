//! Infrastructure layer: adapters for GitHub, HTTP, configuration and logging.

pub mod config;
pub mod github;
pub mod http;
pub mod logging;
