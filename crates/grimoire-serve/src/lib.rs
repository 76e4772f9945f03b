//! Grimoire Serve - printable spell cards over HTTP.
//!
//! This crate provides a small HTTP server (and a one-shot batch CLI)
//! that turns a list of rulebook entry names into a printable HTML page:
//! each name is resolved against an external full-text search backend,
//! cached briefly, rendered into a card fragment by `grimoire-core`, and
//! the sorted fragments are bracketed by opaque `head.html`/`tail.html`
//! template bytes.
//!
//! # Architecture
//!
//! - **Search**: one Elasticsearch query per name; only the top hit is used
//! - **Cache**: in-process moka cache keyed by the exact query string
//! - **Render**: presence-aware card fragments via `grimoire-core`
//! - **Dispatch**: axum routes - static files on GET, batch render on POST

pub mod batch;
pub mod cache;
pub mod config;
pub mod error;
pub mod routes;
pub mod search;
pub mod state;

pub use config::Config;
pub use error::CardError;
pub use routes::router;
pub use state::AppState;
