//! In-memory contribution calendar cache.
//!
//! One mutex guards the whole map. Eviction is all-or-nothing: a write that
//! finds the map over its threshold discards every entry before inserting.
//! The periodic reset lives in [`crate::services::cache_reset_daemon`].

use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::models::ActivitySeries;

/// Default entry count above which the next write resets the cache.
pub const DEFAULT_THRESHOLD: usize = 100;

/// Concurrency-safe subject → calendar cache.
#[derive(Debug)]
pub struct ActivityCache {
    data: Mutex<HashMap<String, ActivitySeries>>,
    threshold: usize,
}

impl Default for ActivityCache {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl ActivityCache {
    /// Create an empty cache that resets once it grows past `threshold`.
    pub fn new(threshold: usize) -> Self {
        Self {
            data: Mutex::new(HashMap::with_capacity(threshold)),
            threshold,
        }
    }

    /// Look up the series stored for `key`.
    pub async fn get(&self, key: &str) -> Option<ActivitySeries> {
        let data = self.data.lock().await;

        let item = data.get(key).cloned();
        if item.is_some() {
            info!(key, "Cache hit");
        } else {
            info!(key, "Cache miss");
        }
        item
    }

    /// Insert or overwrite the series for `key`.
    ///
    /// If the map already holds more than `threshold` entries it is replaced
    /// with an empty one first.
    pub async fn set(&self, key: impl Into<String>, series: ActivitySeries) {
        let mut data = self.data.lock().await;

        if data.len() > self.threshold {
            debug!(
                entries = data.len(),
                threshold = self.threshold,
                "Cache over threshold, discarding all entries"
            );
            *data = HashMap::new();
        }

        data.insert(key.into(), series);
    }

    /// Discard every entry.
    pub async fn clear(&self) {
        let mut data = self.data.lock().await;

        info!("Cache cleared");

        *data = HashMap::with_capacity(self.threshold);
    }

    /// Number of cached subjects.
    pub async fn len(&self) -> usize {
        self.data.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.lock().await.is_empty()
    }

    pub const fn threshold(&self) -> usize {
        self.threshold
    }
}
