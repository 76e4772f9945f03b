//! Application configuration loaded from environment variables.

use std::path::PathBuf;

/// Origins allowed to call the batch endpoint cross-origin.
pub const ALLOWED_ORIGINS: [&str; 2] = ["https://gmalmquist.github.io", "https://gwenscode.com"];

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8120").
    pub bind_addr: String,

    /// Search backend `_search` endpoint URL.
    pub search_url: String,

    /// Directory static files and the head/tail templates are read from.
    pub static_root: PathBuf,

    /// How long a fetched record stays valid in the cache, in seconds.
    pub retention_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `CARDS_BIND_ADDR`: Server bind address (default: "0.0.0.0:8120")
    /// - `CARDS_SEARCH_URL`: Search endpoint (default: the Archives of
    ///   Nethys Elasticsearch `_search` URL)
    /// - `CARDS_STATIC_ROOT`: Static file directory (default: ".")
    /// - `CARDS_RETENTION_SECS`: Cache retention in seconds (default: 86400)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("CARDS_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8120".to_string());

        let search_url = std::env::var("CARDS_SEARCH_URL").unwrap_or_else(|_| {
            "https://elasticsearch.aonprd.com/aon/_search?track_total_hits=true".to_string()
        });

        let static_root =
            PathBuf::from(std::env::var("CARDS_STATIC_ROOT").unwrap_or_else(|_| ".".to_string()));

        let retention_secs = match std::env::var("CARDS_RETENTION_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|e| anyhow::anyhow!("CARDS_RETENTION_SECS must be an integer: {e}"))?,
            Err(_) => 86_400,
        };

        tracing::info!(
            bind_addr = %bind_addr,
            search_url = %search_url,
            static_root = %static_root.display(),
            retention_secs,
            "configuration loaded"
        );

        Ok(Self {
            bind_addr,
            search_url,
            static_root,
            retention_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mutex to serialize config tests that manipulate env vars.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const ENV_KEYS: &[&str] = &[
        "CARDS_BIND_ADDR",
        "CARDS_SEARCH_URL",
        "CARDS_STATIC_ROOT",
        "CARDS_RETENTION_SECS",
    ];

    /// Helper to run config tests with isolated env vars.
    fn with_env_vars<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _guard = ENV_MUTEX.lock().unwrap();

        let saved: Vec<_> = ENV_KEYS
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        // SAFETY: Serialized by mutex; only test code touches these vars.
        unsafe {
            for k in ENV_KEYS {
                std::env::remove_var(k);
            }
            for (k, v) in vars {
                std::env::set_var(k, v);
            }
        }

        f();

        // SAFETY: Restoring original env state.
        unsafe {
            for (k, v) in &saved {
                match v {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn config_defaults() {
        with_env_vars(&[], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.bind_addr, "0.0.0.0:8120");
            assert!(config.search_url.contains("elasticsearch.aonprd.com"));
            assert_eq!(config.static_root, PathBuf::from("."));
            assert_eq!(config.retention_secs, 86_400);
        });
    }

    #[test]
    fn config_custom_values() {
        with_env_vars(
            &[
                ("CARDS_BIND_ADDR", "127.0.0.1:9000"),
                ("CARDS_SEARCH_URL", "http://search:9200/idx/_search"),
                ("CARDS_STATIC_ROOT", "/srv/cards"),
                ("CARDS_RETENTION_SECS", "60"),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.bind_addr, "127.0.0.1:9000");
                assert_eq!(config.search_url, "http://search:9200/idx/_search");
                assert_eq!(config.static_root, PathBuf::from("/srv/cards"));
                assert_eq!(config.retention_secs, 60);
            },
        );
    }

    #[test]
    fn config_rejects_non_numeric_retention() {
        with_env_vars(&[("CARDS_RETENTION_SECS", "a day")], || {
            assert!(Config::from_env().is_err());
        });
    }
}
