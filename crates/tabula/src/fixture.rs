//! JSON fixture loading
//!
//! A fixture file supplies the whole session in one document: the schema
//! catalog (with static lookup option lists) and per-table row data keyed
//! by `"schema.table"`. The catalog is validated before use; the rows feed
//! an [`InMemorySource`].
//!
//! ```json
//! {
//!   "schemas": [
//!     {
//!       "schemaName": "crm",
//!       "tables": [
//!         {
//!           "tableName": "client",
//!           "columns": [
//!             {"name": "firstName", "type": "string", "required": true},
//!             {"name": "language", "type": "surrogate",
//!              "lookup": [{"value": "en", "label": "English"}]}
//!           ]
//!         }
//!       ]
//!     }
//!   ],
//!   "rows": {
//!     "crm.client": [{"firstName": "Ada", "language": {"value": "en", "label": "English"}}]
//!   }
//! }
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tabula_schema::{
    ColumnDescriptor, ColumnType, InMemorySource, Lookup, LookupOption, RawRow, SchemaCatalog,
    SchemaDescriptor, TableDescriptor,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FixtureFile {
    schemas: Vec<FixtureSchema>,
    #[serde(default)]
    rows: HashMap<String, Vec<RawRow>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FixtureSchema {
    schema_name: String,
    tables: Vec<FixtureTable>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FixtureTable {
    table_name: String,
    columns: Vec<FixtureColumn>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FixtureColumn {
    name: String,
    display_name: Option<String>,
    #[serde(rename = "type")]
    column_type: ColumnType,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    primary_key: bool,
    decimals: Option<u32>,
    #[serde(default)]
    form_read_only: bool,
    lookup: Option<Vec<LookupOption>>,
}

impl FixtureColumn {
    fn into_descriptor(self) -> ColumnDescriptor {
        ColumnDescriptor {
            name: self.name,
            display_name: self.display_name,
            column_type: self.column_type,
            required: self.required,
            primary_key: self.primary_key,
            decimals: self.decimals,
            form_read_only: self.form_read_only,
            lookup: self.lookup.map(Lookup::fixed),
        }
    }
}

/// Load and validate a fixture file into a catalog plus its data source.
pub fn load(path: &Path) -> Result<(SchemaCatalog, InMemorySource)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixture {}", path.display()))?;
    let fixture: FixtureFile = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse fixture {}", path.display()))?;

    let schemas = fixture
        .schemas
        .into_iter()
        .map(|schema| {
            let schema_name = schema.schema_name;
            let tables = schema
                .tables
                .into_iter()
                .map(|table| {
                    TableDescriptor::new(
                        schema_name.clone(),
                        table.table_name,
                        table
                            .columns
                            .into_iter()
                            .map(FixtureColumn::into_descriptor)
                            .collect(),
                    )
                })
                .collect();
            SchemaDescriptor::new(schema_name, tables)
        })
        .collect();

    let catalog = SchemaCatalog::new(schemas);
    catalog
        .validate()
        .with_context(|| format!("invalid catalog in fixture {}", path.display()))?;

    let mut source = InMemorySource::new();
    for (key, rows) in fixture.rows {
        let Some((schema, table)) = key.split_once('.') else {
            bail!("fixture row key '{key}' is not of the form 'schema.table'");
        };
        if catalog.table(schema, table).is_none() {
            bail!("fixture rows reference unknown table '{key}'");
        }
        source.insert_table(schema, table, rows);
    }

    Ok((catalog, source))
}
