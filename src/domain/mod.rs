//! Domain layer for commitcrunch
//!
//! Contribution models, the remote source port and the core error type.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{ActivityError, ActivityResult, RemoteOperation};
