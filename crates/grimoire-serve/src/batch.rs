//! The batch rendering pipeline shared by the POST endpoint and the CLI.
//!
//! names -> cache/search -> drop absents -> sort -> card fragments,
//! bracketed by the opaque head/tail template bytes. The templates are
//! read fresh per invocation so they can be edited without a restart.

use anyhow::Context;

use grimoire_core::render_cards;

use crate::error::CardError;
use crate::state::AppState;

/// Template file prepended to every assembled page.
pub const HEAD_TEMPLATE: &str = "head.html";

/// Template file appended to every assembled page.
pub const TAIL_TEMPLATE: &str = "tail.html";

/// Assemble the full page for a batch of entry names.
///
/// Names are looked up concurrently; output order is imposed by the sort
/// step, not fetch completion. Names without a hit are silently dropped -
/// an empty batch still yields head + tail.
pub async fn assemble_page(state: &AppState, names: &[String]) -> Result<Vec<u8>, CardError> {
    let head = read_template(state, HEAD_TEMPLATE).await?;
    let tail = read_template(state, TAIL_TEMPLATE).await?;

    let lookups = names.iter().map(|name| async move {
        state
            .cache
            .get_or_fetch(name, || state.search.search(name))
            .await
    });
    let results = futures::future::join_all(lookups).await;

    let mut records = Vec::new();
    for result in results {
        if let Some(record) = result? {
            records.push(record);
        }
    }
    tracing::debug!(
        requested = names.len(),
        resolved = records.len(),
        "batch resolved"
    );

    let mut page = head;
    page.extend_from_slice(render_cards(records).as_bytes());
    page.extend_from_slice(&tail);
    Ok(page)
}

/// Read one of the opaque template files from the static root.
async fn read_template(state: &AppState, name: &str) -> Result<Vec<u8>, CardError> {
    let path = state.config.static_root.join(name);
    let bytes = tokio::fs::read(&path)
        .await
        .with_context(|| format!("failed to read template {}", path.display()))?;
    Ok(bytes)
}
