//! Route definitions for the card service.
//!
//! ## Routes
//!
//! - `GET /` - Index document from the static root
//! - `POST /` - Batch render: JSON array of names -> HTML page
//! - `GET /health` - Health check (JSON)
//! - `GET /{file}` - Static file (strict path pattern, fixed MIME table)
//!
//! HEAD is served alongside every GET; OPTIONS answers with an empty 200.

mod cards;
mod files;
mod health;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;

use crate::state::AppState;

/// Build the complete card service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(files::index_page)
                .post(cards::render_batch)
                .options(options_ok),
        )
        .route("/health", get(health::health_check))
        .fallback(files::static_file)
        .with_state(state)
}

/// Empty 200 for interoperability with preflight-averse clients.
async fn options_ok() -> StatusCode {
    StatusCode::OK
}
