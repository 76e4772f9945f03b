//! Grimoire Core - spell records and printable card rendering.
//!
//! This crate holds the pure half of the grimoire service: the typed
//! [`SpellRecord`] produced by the search layer, the recursive presence
//! rule that decides whether an optional field is worth printing, the
//! limited markdown-to-HTML transform used for card bodies, and the card
//! renderer itself.
//!
//! Everything here is side-effect free. The HTTP surface, the search
//! client, and the cache live in `grimoire-serve`.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/) for compile-time
//! HTML generation; dynamic field values are escaped automatically, while
//! the transformed card body is inserted pre-escaped (its tags are
//! produced by the transform itself, never by record data).

pub mod card;
pub mod markdown;
pub mod presence;
pub mod record;

pub use card::{render_card, render_cards, sort_records};
pub use record::SpellRecord;
