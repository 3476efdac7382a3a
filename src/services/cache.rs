//! Session cache of fetched listings, one entry per platform.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use super::source::InfluencerSource;
use crate::metrics::Metrics;
use crate::models::entity::{Platform, RawEntity};
use crate::models::query::BundleQuery;

/// Fetch state of one platform's listing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheEntry {
    pub fetched: bool,
    #[serde(skip)]
    pub data: Arc<Vec<RawEntity>>,
    /// Set when the last fetch failed; `data` is then empty.
    pub error: bool,
    /// Bundle parameters of the fetch that filled this entry.
    pub query: BundleQuery,
}

/// Listings keyed by platform, fetched at most once per session.
///
/// Filter and period changes never reach this cache; only a platform that has
/// not been fetched (or was invalidated) triggers a fetch.
pub struct PlatformCache {
    entries: RwLock<HashMap<Platform, CacheEntry>>,
    fetch_lock: Mutex<()>,
    metrics: Option<Arc<Metrics>>,
}

impl PlatformCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            fetch_lock: Mutex::new(()),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Current entry without fetching. Unfetched platforms read as empty.
    pub async fn get(&self, platform: Platform) -> CacheEntry {
        self.entries
            .read()
            .await
            .get(&platform)
            .cloned()
            .unwrap_or_default()
    }

    /// Return the cached entry, fetching the listing first if needed.
    ///
    /// A failed fetch is cached as an empty, errored entry; it is retried
    /// only after [`PlatformCache::invalidate`].
    pub async fn ensure_loaded(
        &self,
        source: &dyn InfluencerSource,
        platform: Platform,
        query: &BundleQuery,
    ) -> CacheEntry {
        let current = self.get(platform).await;
        if current.fetched {
            return current;
        }

        let _guard = self.fetch_lock.lock().await;

        // Another caller may have finished the fetch while we waited.
        let current = self.get(platform).await;
        if current.fetched {
            return current;
        }

        if let Some(metrics) = &self.metrics {
            metrics
                .source_fetches_total
                .with_label_values(&[platform.key()])
                .inc();
        }

        let entry = match source.fetch_influencers(platform, query).await {
            Ok(data) => {
                info!(
                    platform = %platform,
                    count = data.len(),
                    "PlatformCache: cached {} influencers for {}",
                    data.len(),
                    platform
                );
                CacheEntry {
                    fetched: true,
                    data: Arc::new(data),
                    error: false,
                    query: query.clone(),
                }
            }
            Err(e) => {
                warn!(platform = %platform, error = %e, "PlatformCache: listing fetch failed");
                if let Some(metrics) = &self.metrics {
                    metrics
                        .source_fetch_failures_total
                        .with_label_values(&[platform.key()])
                        .inc();
                }
                CacheEntry {
                    fetched: true,
                    data: Arc::new(Vec::new()),
                    error: true,
                    query: query.clone(),
                }
            }
        };

        self.entries.write().await.insert(platform, entry.clone());
        entry
    }

    /// Forget a platform so the next `ensure_loaded` fetches again.
    pub async fn invalidate(&self, platform: Platform) {
        self.entries.write().await.remove(&platform);
    }
}

impl Default for PlatformCache {
    fn default() -> Self {
        Self::new()
    }
}
