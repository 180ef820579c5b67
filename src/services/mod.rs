//! Service layer: the cache, its reset daemon, summary aggregation and the
//! request coordinator that ties them to a remote data source.

pub mod activity_cache;
pub mod cache_reset_daemon;
pub mod remote_call;
pub mod request_coordinator;
pub mod summary_aggregator;

pub use activity_cache::ActivityCache;
pub use cache_reset_daemon::{CacheResetDaemon, DaemonHandle, DaemonStatus, ResetDaemonConfig};
pub use request_coordinator::RequestCoordinator;
pub use summary_aggregator::SummaryAggregator;
