//! Batch render endpoint.
//!
//! `POST /` with a JSON array of entry names returns the assembled HTML
//! page. The response is 200 regardless of how many names resolved; an
//! empty or fully-unresolved batch still yields the head and tail
//! templates with no cards between them.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::batch;
use crate::error::CardError;
use crate::state::AppState;

/// Handle a batch render request.
pub async fn render_batch(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, CardError> {
    let names: Vec<String> = serde_json::from_slice(&body)
        .map_err(|e| CardError::BadRequest(format!("Invalid data: {e}")))?;

    tracing::info!(names = names.len(), "batch render request");
    let page = batch::assemble_page(&state, &names).await?;

    Ok(([(header::CONTENT_TYPE, "text/html")], page).into_response())
}
