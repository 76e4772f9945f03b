//! In-memory read-through cache for resolved records.
//!
//! Keys are the exact query strings used to search - no normalization,
//! so two spellings of the same name are distinct entries. Expired
//! entries are simply absent on the next lookup and get overwritten by
//! the fresh fetch; nothing is evicted eagerly.

use std::future::Future;
use std::time::Duration;

use moka::future::Cache;

use grimoire_core::SpellRecord;

use crate::error::CardError;

/// Default retention: one day.
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(86_400);

/// A cached record with its insertion time.
#[derive(Clone, Debug)]
pub struct CachedRecord {
    /// The resolved record.
    pub record: SpellRecord,
    /// When this entry was cached.
    pub cached_at: chrono::DateTime<chrono::Utc>,
}

/// Read-through TTL cache wrapping the search round trip.
#[derive(Clone)]
pub struct SpellCache {
    entries: Cache<String, CachedRecord>,
}

impl SpellCache {
    /// Create a cache whose entries stay valid for `retention`.
    ///
    /// No capacity bound: the universe of distinct names is small and the
    /// retention is short, so unbounded growth is acceptable.
    pub fn new(retention: Duration) -> Self {
        Self {
            entries: Cache::builder().time_to_live(retention).build(),
        }
    }

    /// Get a cached record or fetch and cache it.
    ///
    /// On a valid hit the cached record is returned without invoking
    /// `fetch`. On miss or expiry, `fetch` runs; a found record is stored
    /// with the current time before being returned, while an absent
    /// result is NOT cached - subsequent calls re-query. Concurrent
    /// misses for the same key may each fetch; the duplicate queries are
    /// accepted rather than coalesced.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        name: &str,
        fetch: F,
    ) -> Result<Option<SpellRecord>, CardError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<SpellRecord>, CardError>>,
    {
        if let Some(entry) = self.entries.get(name).await {
            tracing::debug!(name = %name, cached_at = %entry.cached_at, "cache hit");
            return Ok(Some(entry.record));
        }

        tracing::debug!(name = %name, "cache miss, querying search backend");
        let found = fetch().await?;

        if let Some(record) = &found {
            let entry = CachedRecord {
                record: record.clone(),
                cached_at: chrono::Utc::now(),
            };
            self.entries.insert(name.to_string(), entry).await;
        }

        Ok(found)
    }
}
