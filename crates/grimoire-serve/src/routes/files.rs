//! Static file serving with a strict path allowlist.
//!
//! Only single-segment alphanumeric paths with at most one alphanumeric
//! extension are served. Everything else - traversal attempts, odd
//! separators, encoded bytes - is a bad request before the filesystem is
//! ever consulted.

use std::sync::LazyLock;

use axum::extract::State;
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use regex::Regex;

use crate::error::CardError;
use crate::state::AppState;

/// Allowed path shape: alphanumeric stem, at most one alphanumeric extension.
static VALID_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]+(\.[a-zA-Z0-9]+)?$").expect("path regex should compile")
});

/// Fixed extension -> MIME table; unknown extensions fall back to HTML.
const CONTENT_TYPES: &[(&str, &str)] = &[
    ("css", "text/css"),
    ("js", "text/javascript"),
    ("json", "application/json"),
    ("html", "text/html"),
    ("png", "image/x-png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("ico", "image/x-icon"),
];

/// Whether a request path is shaped like a servable file name.
pub fn valid_path(path: &str) -> bool {
    VALID_PATH.is_match(path)
}

/// MIME type for a file name, from the fixed table.
pub fn content_type_for(path: &str) -> &'static str {
    let extension = path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    CONTENT_TYPES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(extension))
        .map(|(_, mime)| *mime)
        .unwrap_or("text/html")
}

/// Serve the index document for `GET /`.
pub async fn index_page(State(state): State<AppState>) -> Result<Response, CardError> {
    serve_file(&state, "index.html").await
}

/// Fallback handler: serve a static file for any unrouted path.
pub async fn static_file(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, CardError> {
    if method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }
    if method != Method::GET && method != Method::HEAD {
        return Ok(StatusCode::METHOD_NOT_ALLOWED.into_response());
    }

    let path = uri.path().trim_start_matches('/').trim();
    let path = if path.is_empty() { "index.html" } else { path };
    serve_file(&state, path).await
}

/// Read and return one file from the static root.
async fn serve_file(state: &AppState, path: &str) -> Result<Response, CardError> {
    if !valid_path(path) {
        tracing::warn!(path = %path, "rejected static path");
        return Err(CardError::BadRequest(
            "Invalid path. Don't be sneaky.".to_string(),
        ));
    }

    let full_path = state.config.static_root.join(path);
    let bytes = match tokio::fs::read(&full_path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CardError::NotFound(path.to_string()));
        }
        Err(e) => return Err(CardError::Internal(e.into())),
    };

    let mime = content_type_for(path);
    Ok(([(header::CONTENT_TYPE, mime)], bytes).into_response())
}
