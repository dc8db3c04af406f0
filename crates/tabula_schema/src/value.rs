//! Cell values, rows and ingestion
//!
//! A row is an open-ended field → value mapping. Columns typed as
//! `surrogate` or `labelItem` hold a two-part `{value, label}` pair and
//! `textItem` columns hold `{value, text}`; every other column type holds a
//! scalar. The serde representation is untagged so fixture JSON reads
//! naturally (`null`, `true`, `42`, `1.5`, `"x"`, `{"value":..,"label":..}`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One cell of a row.
///
/// Equality is deep structural equality, including the composite variants.
/// The edit session's dirty check and the engine's default refresh policy
/// both rely on this, so it is part of the contract, not an implementation
/// detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Value for surrogate and labelItem columns.
    LabelItem { value: String, label: String },
    /// Value for textItem columns.
    TextItem { value: String, text: String },
}

impl CellValue {
    /// The required-field check: a field is missing when it is null or an
    /// empty string. Composite values are never considered empty.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Str(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

/// A row as supplied by a data source, before identity assignment.
pub type RawRow = BTreeMap<String, CellValue>;

/// A row with its synthetic identity attached.
///
/// `row_id` is the sole identity used for update/merge and never changes
/// after ingestion; all other fields may be replaced wholesale on commit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub row_id: i64,
    pub fields: RawRow,
}

impl Row {
    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.fields.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: CellValue) {
        self.fields.insert(name.into(), value);
    }
}

/// Assign row identity to a sequence of incoming rows.
///
/// `row_id` is the row's position in the incoming sequence unless the
/// source row already carries an integer `row_id` field, in which case the
/// source value wins (and is lifted out of the field map). Order is
/// preserved.
pub fn ingest(raw: Vec<RawRow>) -> Vec<Row> {
    raw.into_iter()
        .enumerate()
        .map(|(index, mut fields)| {
            let row_id = match fields.get("row_id") {
                Some(CellValue::Int(id)) => {
                    let id = *id;
                    fields.remove("row_id");
                    id
                }
                _ => index as i64,
            };
            Row { row_id, fields }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(entries: &[(&str, CellValue)]) -> RawRow {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn ingest_assigns_positional_row_ids() {
        let rows = ingest(vec![
            raw(&[("name", CellValue::Str("a".into()))]),
            raw(&[("name", CellValue::Str("b".into()))]),
            raw(&[("name", CellValue::Str("c".into()))]),
        ]);
        let ids: Vec<i64> = rows.iter().map(|r| r.row_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(rows[1].get("name"), Some(&CellValue::Str("b".into())));
    }

    #[test]
    fn ingest_preserves_existing_row_id() {
        let rows = ingest(vec![
            raw(&[("row_id", CellValue::Int(42)), ("name", CellValue::Str("a".into()))]),
            raw(&[("name", CellValue::Str("b".into()))]),
        ]);
        assert_eq!(rows[0].row_id, 42);
        assert_eq!(rows[1].row_id, 1);
        // the identity field is lifted out of the mapping
        assert_eq!(rows[0].get("row_id"), None);
    }

    #[test]
    fn ingest_preserves_field_values_exactly() {
        let source = raw(&[
            ("rating", CellValue::Float(87.125)),
            ("approved", CellValue::Bool(false)),
            (
                "country",
                CellValue::TextItem {
                    value: "GB".into(),
                    text: "United Kingdom".into(),
                },
            ),
        ]);
        let rows = ingest(vec![source.clone()]);
        assert_eq!(rows[0].fields, source);
    }

    #[test]
    fn composite_equality_is_deep() {
        let a = CellValue::LabelItem {
            value: "en".into(),
            label: "English".into(),
        };
        let b = CellValue::LabelItem {
            value: "en".into(),
            label: "English".into(),
        };
        let c = CellValue::LabelItem {
            value: "en".into(),
            label: "Anglais".into(),
        };
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(
            a,
            CellValue::TextItem {
                value: "en".into(),
                text: "English".into()
            }
        );
    }

    #[test]
    fn is_empty_covers_null_and_blank_strings() {
        assert!(CellValue::Null.is_empty());
        assert!(CellValue::Str(String::new()).is_empty());
        assert!(!CellValue::Str(" ".into()).is_empty());
        assert!(!CellValue::Bool(false).is_empty());
        assert!(!CellValue::Int(0).is_empty());
    }

    #[test]
    fn untagged_serde_reads_fixture_shapes() {
        let json = r#"{
            "approved": false,
            "rating": 87.5,
            "age": 41,
            "firstName": "Ada",
            "language": {"value": "en", "label": "English"},
            "country": {"value": "GB", "text": "United Kingdom"},
            "notes": null
        }"#;
        let row: RawRow = serde_json::from_str(json).unwrap();
        assert_eq!(row["approved"], CellValue::Bool(false));
        assert_eq!(row["rating"], CellValue::Float(87.5));
        assert_eq!(row["age"], CellValue::Int(41));
        assert_eq!(row["firstName"], CellValue::Str("Ada".into()));
        assert_eq!(
            row["language"],
            CellValue::LabelItem {
                value: "en".into(),
                label: "English".into()
            }
        );
        assert_eq!(
            row["country"],
            CellValue::TextItem {
                value: "GB".into(),
                text: "United Kingdom".into()
            }
        );
        assert_eq!(row["notes"], CellValue::Null);
    }
}
