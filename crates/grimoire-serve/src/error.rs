//! Error types for the card service.
//!
//! This is a user-facing HTML service, so error responses are plain
//! bodies rather than JSON: a short message for bad requests, a fixed
//! page for missing files.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, Markup, html};

/// Card service error type.
#[derive(Debug, thiserror::Error)]
pub enum CardError {
    /// The search round trip itself failed (connect, timeout, body read).
    #[error("search transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The search backend answered with a non-success status.
    #[error("search backend returned {status}: {body}")]
    SearchStatus { status: StatusCode, body: String },

    /// Malformed request body or unsafe path.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Static file missing. A name with no search hit is NOT this error -
    /// it is silently dropped from batch output.
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal error (template read, etc.).
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Fixed page returned for missing static files.
fn not_found_page() -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8";
                title { "404" }
            }
            body {
                h1 { "404 Not Found" }
            }
        }
    }
}

impl IntoResponse for CardError {
    fn into_response(self) -> Response {
        match &self {
            Self::Transport(err) => {
                tracing::error!(error = %err, "search transport error");
                (
                    StatusCode::BAD_GATEWAY,
                    "The search backend could not be reached.".to_string(),
                )
                    .into_response()
            }
            Self::SearchStatus { status, body } => {
                tracing::error!(status = %status, body = %body, "search backend error");
                (
                    StatusCode::BAD_GATEWAY,
                    "The search backend returned an error.".to_string(),
                )
                    .into_response()
            }
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()).into_response(),
            Self::NotFound(path) => {
                tracing::debug!(path = %path, "static file not found");
                (StatusCode::NOT_FOUND, not_found_page()).into_response()
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred.".to_string(),
                )
                    .into_response()
            }
        }
    }
}
