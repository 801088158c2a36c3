//! Canonical field names for animal rows.
//!
//! Animal rows reach the API from more than one schema generation: the legacy
//! Portuguese columns (`nome`, `foto`, `porte`, ...) and the newer English ones
//! (`name`, `profile_picture_url`, `size`, ...). The front end relies on the
//! canonical names, so every animal row is widened with aliases before it is
//! returned.

use crate::Row;

/// Source column to canonical key, applied in declaration order.
///
/// When two sources map to the same canonical key the earlier one wins,
/// because a canonical key is only ever added while it is still absent.
pub const ALIASES: &[(&str, &str)] = &[
    ("profile_picture_url", "picture_url"),
    ("foto", "picture_url"),
    ("shelter_name", "shelter"),
    ("nome", "name"),
    ("raça", "breed"),
    ("faixa_etaria", "age_range"),
    ("sexo", "sex"),
    ("porte", "size"),
    ("especie", "species"),
];

/// Returns `row` widened with every canonical alias it is missing.
///
/// Existing keys are never removed or overwritten, so the result is a superset
/// of the input and applying it twice is the same as applying it once.
pub fn normalize(mut row: Row) -> Row {
    for (source, canonical) in ALIASES {
        if row.contains_key(*canonical) {
            continue;
        }
        if let Some(value) = row.get(*source).cloned() {
            row.insert((*canonical).to_string(), value);
        }
    }
    row
}

/// Normalizes every row of a result set, preserving order.
pub fn normalize_all(rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter().map(normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn adds_aliases_for_legacy_columns() {
        let input = row(json!({
            "id": 7,
            "nome": "Bolt",
            "foto": "https://cdn/bolt.jpg",
            "porte": "médio",
            "sexo": "M",
            "especie": "cão",
            "raça": "SRD",
            "faixa_etaria": "adulto",
        }));

        let output = normalize(input.clone());

        assert_eq!(output["name"], "Bolt");
        assert_eq!(output["picture_url"], "https://cdn/bolt.jpg");
        assert_eq!(output["size"], "médio");
        assert_eq!(output["sex"], "M");
        assert_eq!(output["species"], "cão");
        assert_eq!(output["breed"], "SRD");
        assert_eq!(output["age_range"], "adulto");
        assert!(!output.contains_key("shelter"));
        for (key, value) in &input {
            assert_eq!(output.get(key), Some(value));
        }
        assert_eq!(output.len(), input.len() + 7);
    }

    #[test]
    fn never_overwrites_a_canonical_key() {
        let output = normalize(row(json!({ "name": "Rex", "nome": "Bolt" })));
        assert_eq!(output["name"], "Rex");
        assert_eq!(output["nome"], "Bolt");
    }

    #[test]
    fn earlier_source_wins_for_picture_url() {
        let output = normalize(row(json!({
            "foto": "legacy.jpg",
            "profile_picture_url": "current.jpg",
        })));
        assert_eq!(output["picture_url"], "current.jpg");
    }

    #[test]
    fn falls_back_to_later_source() {
        let output = normalize(row(json!({ "foto": "legacy.jpg", "shelter_name": "Lar Feliz" })));
        assert_eq!(output["picture_url"], "legacy.jpg");
        assert_eq!(output["shelter"], "Lar Feliz");
    }

    #[test]
    fn null_sources_are_still_aliased() {
        let output = normalize(row(json!({ "profile_picture_url": null, "foto": "x.jpg" })));
        assert_eq!(output["picture_url"], serde_json::Value::Null);
    }

    #[test]
    fn empty_row_is_unchanged() {
        assert!(normalize(Row::new()).is_empty());
    }
}
