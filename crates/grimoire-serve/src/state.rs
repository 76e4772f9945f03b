//! Application state shared across all request handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::SpellCache;
use crate::config::Config;
use crate::search::SearchClient;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,

    /// Client for the external search backend.
    pub search: Arc<SearchClient>,

    /// Read-through record cache keyed by the exact queried name.
    pub cache: SpellCache,
}

impl AppState {
    /// Create a new application state from configuration.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let search = SearchClient::new(&config)?;
        let cache = SpellCache::new(Duration::from_secs(config.retention_secs));

        tracing::info!(
            retention_secs = config.retention_secs,
            "application state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            search: Arc::new(search),
            cache,
        })
    }
}
