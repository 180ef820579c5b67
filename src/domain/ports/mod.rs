//! Port trait definitions (Hexagonal Architecture)
//!
//! - RemoteDataSource: upstream contribution queries
//!
//! Infrastructure adapters implement these so the core stays independent
//! of the GitHub API specifics.

pub mod remote_data_source;

pub use remote_data_source::RemoteDataSource;
