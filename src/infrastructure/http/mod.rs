//! HTTP surface: `/contribs/{username}`, `/summary/{username}`, `/health`.

pub mod handlers;
pub mod server;

pub use handlers::{ApiError, AppState};
pub use server::{router, serve};
