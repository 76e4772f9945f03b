//! Printable card rendering.
//!
//! A card is one HTML fragment describing a single rulebook entry:
//! header (title + rank), trait tags, a fixed sequence of optional
//! property rows, and the transformed body text. Rows whose value is
//! absent under the presence rule are omitted entirely.

use std::sync::LazyLock;

use maud::{Markup, PreEscaped, html};
use regex::Regex;
use serde_json::Value;

use crate::markdown;
use crate::presence::{present, present_str};
use crate::record::SpellRecord;

static NON_ALNUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("class regex should compile"));

/// Derive a CSS-safe class from a free-text action cost.
///
/// Lowercases and collapses every maximal run of non-alphanumerics to a
/// single hyphen: "Two Actions" becomes "two-actions".
pub fn action_css_class(actions: &str) -> String {
    NON_ALNUM_RE
        .replace_all(actions.trim(), "-")
        .to_lowercase()
}

/// Text form of a scalar value, if it has renderable content.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Flatten a scalar-or-sequence value into its renderable items.
fn list_items(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    }
}

/// A labeled single-value row, omitted when the value is absent.
fn prop_row(class: &str, label: &str, value: Option<&str>) -> Markup {
    if !present_str(value) {
        return html! {};
    }
    html! {
        div class="prop" {
            label { (label) }
            span class=(class) { (value.unwrap_or_default()) }
        }
    }
}

/// An unlabeled list row: one span per present item, the whole row
/// omitted when nothing is present.
fn list_row(class: &str, value: &Value) -> Markup {
    let items = list_items(value);
    if items.is_empty() {
        return html! {};
    }
    html! {
        div class="prop" {
            @for item in &items {
                span class=(class) { (item) }
            }
        }
    }
}

/// Render one record into its card fragment.
///
/// Total over any record: absent fields drop their rows, and an entry
/// with nothing but a name still renders a header and an empty body.
pub fn render_card(spell: &SpellRecord) -> Markup {
    // Cantrips auto-heighten; their numeric rank is meaningless.
    let rank = match spell.level {
        Some(level) if spell.spell_type != "Cantrip" => level.to_string(),
        _ => String::new(),
    };

    // PFS "Standard" is the default everywhere and not worth a row.
    let pfs = spell
        .pfs
        .as_deref()
        .filter(|status| *status != "Standard");

    let actions_class = spell
        .actions
        .as_deref()
        .map(|actions| format!("actions {}", action_css_class(actions)))
        .unwrap_or_default();

    let range_pairs = [
        ("Range", &spell.range),
        ("Area", &spell.area),
        ("Targets", &spell.target),
    ];
    let has_range_block = range_pairs.iter().any(|(_, value)| present(value));

    let body = markdown::card_body(&spell.markdown);

    html! {
        div class="card" {
            div class="card-head" {
                span class="card-title" { (spell.name) }
                span class="card-rank" { (spell.spell_type) " " (rank) }
            }
            @if !spell.traits.is_empty() {
                div class="traits" {
                    @for trait_name in &spell.traits {
                        span class="trait" { (trait_name) }
                    }
                }
            }
            (prop_row("pfs", "PFS", pfs))
            (list_row("source", &spell.source_raw))
            (list_row("tradition", &spell.tradition))
            (list_row("deity", &spell.deity))
            (list_row("lesson", &spell.lesson))
            (list_row("patron-theme", &spell.patron_theme))
            (prop_row(&actions_class, "Cast", spell.actions.as_deref()))
            @if has_range_block {
                div class="prop" {
                    @for (label, value) in range_pairs {
                        @if let Some(text) = scalar_text(value) {
                            label { (label) }
                            span class="range" { (text) }
                        }
                    }
                }
            }
            (prop_row("defense", "Defense", spell.saving_throw.as_deref()))
            (prop_row("duration", "Duration", spell.duration_raw.as_deref()))
            div class="card-body" {
                (PreEscaped(body))
            }
        }
    }
}

/// Order records for page assembly: type, then rank, then name.
pub fn sort_records(records: &mut [SpellRecord]) {
    records.sort_by(|a, b| {
        (a.spell_type.as_str(), a.level, a.name.as_str())
            .cmp(&(b.spell_type.as_str(), b.level, b.name.as_str()))
    });
}

/// Sort and render a batch of records into one concatenated fragment.
pub fn render_cards(mut records: Vec<SpellRecord>) -> String {
    sort_records(&mut records);
    records
        .iter()
        .map(|record| render_card(record).into_string())
        .collect()
}
