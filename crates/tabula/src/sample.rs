//! Built-in sample catalog and data
//!
//! A deterministic stand-in for a real backend: a `ClientDB.client` table
//! exercising every column type, plus a few placeholder schemas so the
//! tree has something to fold. Used when no fixture file is given and by
//! tests.

use tabula_schema::{
    CellValue, ColumnDescriptor, ColumnType, InMemorySource, Lookup, LookupOption, RawRow,
    SchemaCatalog, SchemaDescriptor, TableDescriptor,
};

const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("fr", "French"),
    ("de", "German"),
    ("es", "Spanish"),
    ("pt", "Portuguese"),
];

const COUNTRIES: &[(&str, &str)] = &[
    ("GB", "United Kingdom"),
    ("FR", "France"),
    ("DE", "Germany"),
    ("ES", "Spain"),
    ("BR", "Brazil"),
    ("US", "United States"),
];

const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Alan", "Edsger", "Barbara", "Donald", "Margaret", "Tony", "Niklaus", "Radia",
];

const LAST_NAMES: &[&str] = &[
    "Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov", "Knuth", "Hamilton", "Hoare", "Wirth",
    "Perlman",
];

fn language_lookup() -> Lookup {
    Lookup::new(|| {
        LANGUAGES
            .iter()
            .map(|(code, name)| LookupOption::new(*code, *name))
            .collect()
    })
}

fn country_lookup() -> Lookup {
    Lookup::new(|| {
        COUNTRIES
            .iter()
            .map(|(code, name)| LookupOption::new(*code, *name))
            .collect()
    })
}

fn client_type_lookup() -> Lookup {
    Lookup::fixed(vec![
        LookupOption::new("individual", "Individual"),
        LookupOption::new("non-individual", "Non-Individual"),
    ])
}

fn client_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("firstName", ColumnType::String)
            .with_display_name("First Name")
            .required(),
        ColumnDescriptor::new("lastName", ColumnType::String)
            .with_display_name("Last Name")
            .required(),
        ColumnDescriptor::new("dob", ColumnType::Date).required(),
        ColumnDescriptor::new("clientType", ColumnType::LabelItem)
            .with_display_name("Client Type")
            .required()
            .with_lookup(client_type_lookup()),
        ColumnDescriptor::new("language", ColumnType::Surrogate)
            .with_display_name("Language")
            .required()
            .with_lookup(language_lookup()),
        ColumnDescriptor::new("country", ColumnType::TextItem)
            .with_display_name("Country")
            .required()
            .with_lookup(country_lookup()),
        ColumnDescriptor::new("clientID", ColumnType::String)
            .with_display_name("Client ID")
            .primary_key()
            .read_only(),
        ColumnDescriptor::new("rating", ColumnType::Float)
            .with_display_name("Rating")
            .with_decimals(2),
        ColumnDescriptor::new("approved", ColumnType::Boolean).with_display_name("Approved"),
        ColumnDescriptor::new("notes", ColumnType::Text).with_display_name("Notes"),
    ]
}

/// 20 deterministic client rows covering every column type.
pub fn client_rows() -> Vec<RawRow> {
    (0..20)
        .map(|i| {
            let (lang_code, lang_name) = LANGUAGES[i % LANGUAGES.len()];
            let (country_code, country_name) = COUNTRIES[i % COUNTRIES.len()];
            let (type_value, type_label) = if i % 3 == 0 {
                ("non-individual", "Non-Individual")
            } else {
                ("individual", "Individual")
            };

            let mut row = RawRow::new();
            row.insert(
                "firstName".into(),
                CellValue::Str(FIRST_NAMES[i % FIRST_NAMES.len()].into()),
            );
            row.insert(
                "lastName".into(),
                CellValue::Str(LAST_NAMES[(i + 3) % LAST_NAMES.len()].into()),
            );
            row.insert(
                "dob".into(),
                CellValue::Str(format!("19{:02}-{:02}-{:02}", 40 + i * 2, 1 + i % 12, 1 + i)),
            );
            row.insert(
                "clientType".into(),
                CellValue::LabelItem {
                    value: type_value.into(),
                    label: type_label.into(),
                },
            );
            row.insert(
                "language".into(),
                CellValue::LabelItem {
                    value: lang_code.into(),
                    label: lang_name.into(),
                },
            );
            row.insert(
                "country".into(),
                CellValue::TextItem {
                    value: country_code.into(),
                    text: country_name.into(),
                },
            );
            row.insert("clientID".into(), CellValue::Str(format!("c-{:04}", i + 1)));
            row.insert("rating".into(), CellValue::Float(75.0 + (i as f64) * 1.237));
            row.insert("approved".into(), CellValue::Bool(i % 2 == 0));
            row.insert(
                "notes".into(),
                CellValue::Str(format!(
                    "Client {} onboarded via the sample data set; no review items outstanding.",
                    i + 1
                )),
            );
            row
        })
        .collect()
}

/// The sample catalog: `ClientDB.client` plus placeholder schemas with
/// plain string columns.
pub fn sample_catalog() -> SchemaCatalog {
    let mut schemas = vec![SchemaDescriptor::new(
        "ClientDB",
        vec![TableDescriptor::new("ClientDB", "client", client_columns())],
    )];

    for z in 0..3 {
        let schema_name = format!("fakeSchema{z}");
        let tables = (0..=z.min(1))
            .map(|i| {
                let columns = (0..3 + z)
                    .map(|j| {
                        ColumnDescriptor::new(format!("field{j}"), ColumnType::String).required()
                    })
                    .collect();
                TableDescriptor::new(schema_name.clone(), format!("fakeTable{i}"), columns)
            })
            .collect();
        schemas.push(SchemaDescriptor::new(schema_name, tables));
    }

    SchemaCatalog::new(schemas)
}

/// A data source serving the sample rows. Any table other than
/// `ClientDB.client` fetches as an empty result, as the sample backend
/// only populates that one.
pub fn sample_source() -> InMemorySource {
    let mut source = InMemorySource::new();
    source.insert_table("ClientDB", "client", client_rows());
    source
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_schema::TableDataSource;

    #[test]
    fn sample_catalog_is_valid() {
        sample_catalog().validate().unwrap();
    }

    #[test]
    fn sample_catalog_has_four_schemas() {
        assert_eq!(sample_catalog().schemas.len(), 4);
    }

    #[test]
    fn client_fetch_returns_twenty_rows() {
        let source = sample_source();
        let result = source
            .fetch_table_data("ClientDB", "client", 0, 20)
            .unwrap();
        assert_eq!(result.count, 20);
        assert_eq!(result.count, result.data.len());
    }

    #[test]
    fn placeholder_tables_fetch_empty() {
        let source = sample_source();
        let result = source
            .fetch_table_data("fakeSchema0", "fakeTable0", 0, 20)
            .unwrap();
        assert_eq!(result.count, 0);
    }

    #[test]
    fn every_lookup_column_produces_options() {
        for col in client_columns() {
            if col.column_type.is_lookup() {
                assert!(!col.lookup_options().is_empty(), "{} has no options", col.name);
            }
        }
    }
}
