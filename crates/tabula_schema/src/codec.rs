//! The value codec
//!
//! Pure functions mapping a column descriptor plus a row to display text,
//! and a raw form-control change back to a typed field value. Rounding is
//! display-only: nothing here coerces or rounds on write.

use crate::column::{ColumnDescriptor, ColumnType, LookupOption};
use crate::value::{CellValue, Row};

/// A raw change event from a form control.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    /// Text typed into a string/text/date/numeric control, kept verbatim.
    Text(String),
    /// A boolean control toggled.
    Toggle(bool),
    /// An option picked from a lookup select.
    Pick(LookupOption),
}

/// Display text for one cell, per the column's declared type.
///
/// Float columns honor `decimals` (absent ⇒ default float formatting; a
/// string holding a parseable number is parsed first, since edits store
/// form input verbatim). Booleans render as `True`/`False` using JS-style
/// truthiness, composite values render their label/text sub-field, and a
/// missing field renders as an empty string.
pub fn display_value(col: &ColumnDescriptor, row: &Row) -> String {
    let Some(value) = row.get(&col.name) else {
        return String::new();
    };

    match col.column_type {
        ColumnType::Float => {
            let parsed = match value {
                CellValue::Float(f) => Some(*f),
                CellValue::Int(i) => Some(*i as f64),
                CellValue::Str(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            match (parsed, col.decimals) {
                (Some(f), Some(d)) => format!("{:.*}", d as usize, f),
                (Some(f), None) => f.to_string(),
                (None, _) => scalar_string(value),
            }
        }
        ColumnType::Boolean => {
            if truthy(value) {
                "True".to_string()
            } else {
                "False".to_string()
            }
        }
        ColumnType::Surrogate | ColumnType::LabelItem => match value {
            CellValue::LabelItem { label, .. } => label.clone(),
            other => scalar_string(other),
        },
        ColumnType::TextItem => match value {
            CellValue::TextItem { text, .. } => text.clone(),
            other => scalar_string(other),
        },
        _ => scalar_string(value),
    }
}

/// Display text for list cells: identical to [`display_value`] except that
/// `text` columns are truncated to `max_width` with an ellipsis. Form
/// display never truncates.
pub fn list_display_value(col: &ColumnDescriptor, row: &Row, max_width: usize) -> String {
    let full = display_value(col, row);
    if col.column_type == ColumnType::Text {
        truncate(&full, max_width)
    } else {
        full
    }
}

/// The form-control representation of a field: the raw scalar as a string,
/// with no rounding applied. Lookup-typed fields yield their stored key.
pub fn form_value(col: &ColumnDescriptor, row: &Row) -> String {
    let Some(value) = row.get(&col.name) else {
        return String::new();
    };
    match value {
        CellValue::LabelItem { value, .. } | CellValue::TextItem { value, .. } => value.clone(),
        other => scalar_string(other),
    }
}

/// Interpret a raw form-control change into the typed field value for the
/// column. There is no failure path: malformed input is stored as typed by
/// the control.
pub fn interpret_change(col: &ColumnDescriptor, input: FieldInput) -> CellValue {
    match input {
        FieldInput::Pick(option) => match col.column_type {
            ColumnType::TextItem => CellValue::TextItem {
                value: option.value,
                text: option.label,
            },
            ColumnType::Surrogate | ColumnType::LabelItem => CellValue::LabelItem {
                value: option.value,
                label: option.label,
            },
            // a pick aimed at a non-lookup column stores the raw key
            _ => CellValue::Str(option.value),
        },
        FieldInput::Toggle(b) => CellValue::Bool(b),
        FieldInput::Text(s) => CellValue::Str(s),
    }
}

fn scalar_string(value: &CellValue) -> String {
    match value {
        CellValue::Null => String::new(),
        CellValue::Bool(b) => {
            if *b {
                "True".to_string()
            } else {
                "False".to_string()
            }
        }
        CellValue::Int(i) => i.to_string(),
        CellValue::Float(f) => f.to_string(),
        CellValue::Str(s) => s.clone(),
        CellValue::LabelItem { label, .. } => label.clone(),
        CellValue::TextItem { text, .. } => text.clone(),
    }
}

fn truthy(value: &CellValue) -> bool {
    match value {
        CellValue::Null => false,
        CellValue::Bool(b) => *b,
        CellValue::Int(i) => *i != 0,
        CellValue::Float(f) => *f != 0.0,
        CellValue::Str(s) => !s.is_empty(),
        _ => true,
    }
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return text.chars().take(max_width).collect();
    }
    let kept: String = text.chars().take(max_width - 1).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Lookup;
    use crate::value::RawRow;

    fn row_with(name: &str, value: CellValue) -> Row {
        let mut fields = RawRow::new();
        fields.insert(name.to_string(), value);
        Row { row_id: 0, fields }
    }

    #[test]
    fn float_display_honors_decimals() {
        let col = ColumnDescriptor::new("rating", ColumnType::Float).with_decimals(2);
        let row = row_with("rating", CellValue::Float(87.125));
        assert_eq!(display_value(&col, &row), "87.13");

        let unrounded = ColumnDescriptor::new("rating", ColumnType::Float);
        assert_eq!(display_value(&unrounded, &row), "87.125");
    }

    #[test]
    fn float_display_parses_form_strings() {
        // edits store form input verbatim, so a float cell may hold a string
        let col = ColumnDescriptor::new("rating", ColumnType::Float).with_decimals(1);
        let row = row_with("rating", CellValue::Str("90.26".into()));
        assert_eq!(display_value(&col, &row), "90.3");

        let garbage = row_with("rating", CellValue::Str("n/a".into()));
        assert_eq!(display_value(&col, &garbage), "n/a");
    }

    #[test]
    fn boolean_display_uses_truthiness() {
        let col = ColumnDescriptor::new("approved", ColumnType::Boolean);
        assert_eq!(display_value(&col, &row_with("approved", CellValue::Bool(true))), "True");
        assert_eq!(display_value(&col, &row_with("approved", CellValue::Bool(false))), "False");
        assert_eq!(display_value(&col, &row_with("approved", CellValue::Null)), "False");
        assert_eq!(
            display_value(&col, &row_with("approved", CellValue::Str("x".into()))),
            "True"
        );
    }

    #[test]
    fn composite_display_uses_label_and_text() {
        let lang = ColumnDescriptor::new("language", ColumnType::Surrogate)
            .with_lookup(Lookup::fixed(vec![]));
        let row = row_with(
            "language",
            CellValue::LabelItem {
                value: "en".into(),
                label: "English".into(),
            },
        );
        assert_eq!(display_value(&lang, &row), "English");
        assert_eq!(form_value(&lang, &row), "en");

        let country = ColumnDescriptor::new("country", ColumnType::TextItem)
            .with_lookup(Lookup::fixed(vec![]));
        let row = row_with(
            "country",
            CellValue::TextItem {
                value: "GB".into(),
                text: "United Kingdom".into(),
            },
        );
        assert_eq!(display_value(&country, &row), "United Kingdom");
    }

    #[test]
    fn missing_field_renders_empty() {
        let col = ColumnDescriptor::new("notes", ColumnType::Text);
        let row = row_with("other", CellValue::Int(1));
        assert_eq!(display_value(&col, &row), "");
    }

    #[test]
    fn text_truncates_for_list_display_only() {
        let col = ColumnDescriptor::new("notes", ColumnType::Text);
        let row = row_with("notes", CellValue::Str("a long note about a client".into()));
        assert_eq!(list_display_value(&col, &row, 10), "a long no…");
        assert_eq!(display_value(&col, &row), "a long note about a client");

        let short = ColumnDescriptor::new("name", ColumnType::String);
        let row = row_with("name", CellValue::Str("a long untruncated string".into()));
        assert_eq!(list_display_value(&short, &row, 5), "a long untruncated string");
    }

    #[test]
    fn interpret_builds_composites_from_picks() {
        let lang = ColumnDescriptor::new("language", ColumnType::LabelItem)
            .with_lookup(Lookup::fixed(vec![]));
        assert_eq!(
            interpret_change(&lang, FieldInput::Pick(LookupOption::new("fr", "French"))),
            CellValue::LabelItem {
                value: "fr".into(),
                label: "French".into()
            }
        );

        let country = ColumnDescriptor::new("country", ColumnType::TextItem)
            .with_lookup(Lookup::fixed(vec![]));
        assert_eq!(
            interpret_change(&country, FieldInput::Pick(LookupOption::new("DE", "Germany"))),
            CellValue::TextItem {
                value: "DE".into(),
                text: "Germany".into()
            }
        );
    }

    #[test]
    fn interpret_stores_text_verbatim() {
        // no numeric coercion on write; rounding is display-only
        let col = ColumnDescriptor::new("rating", ColumnType::Float).with_decimals(2);
        assert_eq!(
            interpret_change(&col, FieldInput::Text("90.256".into())),
            CellValue::Str("90.256".into())
        );
        let bad = interpret_change(&col, FieldInput::Text("not a number".into()));
        assert_eq!(bad, CellValue::Str("not a number".into()));
    }

    #[test]
    fn surrogate_round_trip_returns_selected_label() {
        let col = ColumnDescriptor::new("language", ColumnType::Surrogate)
            .with_lookup(Lookup::fixed(vec![LookupOption::new("en", "English")]));
        let option = col.lookup_options()[0].clone();
        let shown = option.label.clone();
        let value = interpret_change(&col, FieldInput::Pick(option));
        let mut row = row_with("language", CellValue::Null);
        row.set("language", value);
        assert_eq!(display_value(&col, &row), shown);
    }
}
