//! Background cache reset daemon.
//!
//! Clears the [`ActivityCache`] on a fixed schedule, either on every
//! interval tick or a single time one interval after startup.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::domain::models::{CacheConfig, ResetMode};
use crate::services::activity_cache::ActivityCache;

/// Configuration for the cache reset daemon.
#[derive(Debug, Clone)]
pub struct ResetDaemonConfig {
    /// Delay before the first reset and between later ones.
    pub reset_interval: Duration,
    /// Recurring or one-shot.
    pub mode: ResetMode,
}

impl Default for ResetDaemonConfig {
    fn default() -> Self {
        Self {
            reset_interval: Duration::from_secs(3600),
            mode: ResetMode::Recurring,
        }
    }
}

impl From<&CacheConfig> for ResetDaemonConfig {
    fn from(config: &CacheConfig) -> Self {
        Self {
            reset_interval: Duration::from_secs(config.reset_interval_secs),
            mode: config.reset_mode,
        }
    }
}

/// Status of the reset daemon.
#[derive(Debug, Clone, Default)]
pub struct DaemonStatus {
    /// Whether the daemon loop is running.
    pub running: bool,
    /// Number of resets performed.
    pub total_resets: u64,
    /// When the last reset happened.
    pub last_reset: Option<Instant>,
}

/// Handle to control a spawned reset daemon.
pub struct DaemonHandle {
    stop_tx: watch::Sender<bool>,
    status: Arc<RwLock<DaemonStatus>>,
    join: JoinHandle<()>,
}

impl DaemonHandle {
    /// Request the daemon to stop. Takes effect immediately, even mid-interval.
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }

    /// Get current daemon status.
    pub async fn status(&self) -> DaemonStatus {
        self.status.read().await.clone()
    }

    /// Stop the daemon and wait for its loop to exit.
    pub async fn shutdown(self) {
        self.stop();
        let _ = self.join.await;
    }
}

/// Periodically clears an [`ActivityCache`].
pub struct CacheResetDaemon {
    cache: Arc<ActivityCache>,
    config: ResetDaemonConfig,
    status: Arc<RwLock<DaemonStatus>>,
}

impl CacheResetDaemon {
    /// Create a new reset daemon.
    pub fn new(cache: Arc<ActivityCache>, config: ResetDaemonConfig) -> Self {
        Self {
            cache,
            config,
            status: Arc::new(RwLock::new(DaemonStatus::default())),
        }
    }

    /// Spawn the daemon loop onto the runtime.
    pub fn spawn(self) -> DaemonHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let status = self.status.clone();
        let join = tokio::spawn(self.run_loop(stop_rx));

        DaemonHandle {
            stop_tx,
            status,
            join,
        }
    }

    /// Main daemon loop.
    async fn run_loop(self, mut stop_rx: watch::Receiver<bool>) {
        self.status.write().await.running = true;

        info!(
            interval_secs = self.config.reset_interval.as_secs(),
            mode = ?self.config.mode,
            "Cache reset daemon started"
        );

        let period = self.config.reset_interval;
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    self.reset_once().await;

                    if self.config.mode == ResetMode::Once {
                        debug!("One-shot cache reset done");
                        break;
                    }
                }
                changed = stop_rx.changed() => {
                    if changed.is_err() || *stop_rx.borrow() {
                        break;
                    }
                }
            }
        }

        self.status.write().await.running = false;
        info!("Cache reset daemon stopped");
    }

    /// Clear the cache and record the run.
    pub async fn reset_once(&self) {
        self.cache.clear().await;

        let mut status = self.status.write().await;
        status.total_resets += 1;
        status.last_reset = Some(Instant::now());
    }
}
