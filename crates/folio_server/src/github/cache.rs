//! Single-value cache with a time-to-live.

use std::future::Future;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, instrument};

/// Holds one value and the instant it was stored.
///
/// A value is fresh while its age is below the TTL. Failed fetches are never
/// stored, so the next request retries upstream.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    slot: RwLock<Option<(Instant, T)>>,
}

impl<T: Clone> TtlCache<T> {
    /// Creates an empty cache.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Returns the cached value if it is still fresh.
    pub async fn get(&self) -> Option<T> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|(stored_at, _)| stored_at.elapsed() < self.ttl)
            .map(|(_, value)| value.clone())
    }

    /// Stores `value`, stamping it with the current instant.
    pub async fn put(&self, value: T) {
        *self.slot.write().await = Some((Instant::now(), value));
    }

    /// Returns the fresh value, or runs `fetch` and caches its success.
    ///
    /// No lock is held while `fetch` runs.
    #[instrument(skip_all, fields(ttl_secs = self.ttl.as_secs()))]
    pub async fn get_or_fetch<F, Fut, E>(&self, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.get().await {
            debug!("Cache hit");
            return Ok(value);
        }
        debug!("Cache miss");
        let value = fetch().await?;
        self.put(value.clone()).await;
        Ok(value)
    }
}
