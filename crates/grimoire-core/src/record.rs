//! The typed spell record deserialized from a search hit.

use serde::Deserialize;
use serde_json::Value;

/// One rulebook entry as returned by the search backend.
///
/// Deserialized from the `_source` of the top search hit. The backend's
/// documents are sparse and heterogeneous, so every optional field
/// defaults rather than failing the whole record: scalars that are
/// reliably strings are `Option<String>`, while fields observed to be
/// either a scalar or a sequence (or a bare number) stay as
/// [`serde_json::Value`] and are interpreted at render time.
#[derive(Debug, Clone, Deserialize)]
pub struct SpellRecord {
    /// Entry name, used as the card title and the last sort key.
    #[serde(default)]
    pub name: String,

    /// Entry type ("Spell", "Cantrip", ...). Cantrips never display a rank.
    #[serde(default)]
    pub spell_type: String,

    /// Spell rank. Meaningless for cantrips.
    #[serde(default)]
    pub level: Option<i64>,

    /// Trait tags, one rendered span each.
    #[serde(default, rename = "trait")]
    pub traits: Vec<String>,

    /// Pathfinder Society status. The literal "Standard" is treated as
    /// absent at render time.
    #[serde(default)]
    pub pfs: Option<String>,

    /// Source book(s) - scalar or sequence.
    #[serde(default)]
    pub source_raw: Value,

    /// Magical tradition(s) - scalar or sequence.
    #[serde(default)]
    pub tradition: Value,

    /// Granting deity or deities - scalar or sequence.
    #[serde(default)]
    pub deity: Value,

    /// Witch lesson(s) - scalar or sequence.
    #[serde(default)]
    pub lesson: Value,

    /// Witch patron theme(s) - scalar or sequence.
    #[serde(default)]
    pub patron_theme: Value,

    /// Free-text action cost ("Single Action", "Two Actions", "1 minute", ...).
    #[serde(default)]
    pub actions: Option<String>,

    /// Range - a string or a bare number of feet depending on the entry.
    #[serde(default)]
    pub range: Value,

    /// Area of effect.
    #[serde(default)]
    pub area: Value,

    /// Target description.
    #[serde(default)]
    pub target: Value,

    /// Saving throw / defense.
    #[serde(default)]
    pub saving_throw: Option<String>,

    /// Duration.
    #[serde(default)]
    pub duration_raw: Option<String>,

    /// Long-form body text. Contains a literal `---` separator before the
    /// printable portion.
    #[serde(default)]
    pub markdown: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_from_sparse_source() {
        let json = r#"{"name":"Light","spell_type":"Cantrip","level":1}"#;
        let record: SpellRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Light");
        assert_eq!(record.spell_type, "Cantrip");
        assert_eq!(record.level, Some(1));
        assert!(record.traits.is_empty());
        assert_eq!(record.pfs, None);
        assert!(record.source_raw.is_null());
        assert_eq!(record.markdown, "");
    }

    #[test]
    fn record_trait_field_renamed() {
        let json = r#"{"name":"Heal","trait":["Healing","Vitality"]}"#;
        let record: SpellRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.traits, vec!["Healing", "Vitality"]);
    }

    #[test]
    fn record_heterogeneous_fields() {
        // tradition as a list, source_raw as a scalar, range as a number
        let json = r#"{
            "name":"Fireball",
            "tradition":["Arcane","Primal"],
            "source_raw":"Player Core",
            "range":500
        }"#;
        let record: SpellRecord = serde_json::from_str(json).unwrap();
        assert!(record.tradition.is_array());
        assert!(record.source_raw.is_string());
        assert!(record.range.is_number());
    }

    #[test]
    fn record_ignores_unknown_fields() {
        let json = r#"{"name":"Heal","remaster_name":"Heal","category":"spell"}"#;
        let record: SpellRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Heal");
    }
}
