//! Table and schema descriptors
//!
//! The catalog is supplied wholesale by the caller at startup and is
//! immutable for the session; the engine only ever mutates the row set of
//! the currently selected table.

use crate::column::{ColumnDescriptor, ColumnType};
use crate::error::SchemaError;
use std::collections::HashSet;

/// One table: its qualified name plus the ordered column descriptors.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDescriptor {
    pub schema_name: String,
    pub table_name: String,
    pub columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    pub fn new(
        schema_name: impl Into<String>,
        table_name: impl Into<String>,
        columns: Vec<ColumnDescriptor>,
    ) -> Self {
        Self {
            schema_name: schema_name.into(),
            table_name: table_name.into(),
            columns,
        }
    }

    /// "schema.table" for titles and log lines.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema_name, self.table_name)
    }

    fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for col in &self.columns {
            if !seen.insert(col.name.as_str()) {
                return Err(SchemaError::DuplicateColumn {
                    schema: self.schema_name.clone(),
                    table: self.table_name.clone(),
                    column: col.name.clone(),
                });
            }
            match (col.column_type.is_lookup(), col.lookup.is_some()) {
                (true, false) => {
                    return Err(SchemaError::MissingLookup {
                        schema: self.schema_name.clone(),
                        table: self.table_name.clone(),
                        column: col.name.clone(),
                        column_type: col.column_type.to_string(),
                    })
                }
                (false, true) => {
                    return Err(SchemaError::UnexpectedLookup {
                        schema: self.schema_name.clone(),
                        table: self.table_name.clone(),
                        column: col.name.clone(),
                        column_type: col.column_type.to_string(),
                    })
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// One schema: a named, ordered collection of tables.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDescriptor {
    pub schema_name: String,
    pub tables: Vec<TableDescriptor>,
}

impl SchemaDescriptor {
    pub fn new(schema_name: impl Into<String>, tables: Vec<TableDescriptor>) -> Self {
        Self {
            schema_name: schema_name.into(),
            tables,
        }
    }
}

/// The full caller-supplied schema → table → column mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaCatalog {
    pub schemas: Vec<SchemaDescriptor>,
}

impl SchemaCatalog {
    pub fn new(schemas: Vec<SchemaDescriptor>) -> Self {
        Self { schemas }
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn schema(&self, name: &str) -> Option<&SchemaDescriptor> {
        self.schemas.iter().find(|s| s.schema_name == name)
    }

    pub fn table(&self, schema: &str, table: &str) -> Option<&TableDescriptor> {
        self.schema(schema)?
            .tables
            .iter()
            .find(|t| t.table_name == table)
    }

    /// Enforce the catalog invariants: (schema, table) pairs unique, column
    /// names unique per table (hence the (schema, table, column) triple is
    /// unique catalog-wide), and `lookup` present exactly on lookup-typed
    /// columns.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for schema in &self.schemas {
            for table in &schema.tables {
                if !seen.insert((schema.schema_name.as_str(), table.table_name.as_str())) {
                    return Err(SchemaError::DuplicateTable {
                        schema: schema.schema_name.clone(),
                        table: table.table_name.clone(),
                    });
                }
                table.validate()?;
            }
        }
        Ok(())
    }
}

/// The fixed column set used by the Properties view, which renders a
/// table's own column descriptors as rows.
pub fn properties_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("name", ColumnType::String),
        ColumnDescriptor::new("type", ColumnType::String),
        ColumnDescriptor::new("primaryKey", ColumnType::Boolean),
        ColumnDescriptor::new("required", ColumnType::Boolean),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{Lookup, LookupOption};

    fn table(schema: &str, name: &str, columns: Vec<ColumnDescriptor>) -> TableDescriptor {
        TableDescriptor::new(schema, name, columns)
    }

    #[test]
    fn valid_catalog_passes() {
        let catalog = SchemaCatalog::new(vec![SchemaDescriptor::new(
            "crm",
            vec![table(
                "crm",
                "client",
                vec![
                    ColumnDescriptor::new("firstName", ColumnType::String).required(),
                    ColumnDescriptor::new("language", ColumnType::Surrogate)
                        .with_lookup(Lookup::fixed(vec![LookupOption::new("en", "English")])),
                ],
            )],
        )]);
        assert!(catalog.validate().is_ok());
        assert!(catalog.table("crm", "client").is_some());
        assert!(catalog.table("crm", "missing").is_none());
    }

    #[test]
    fn duplicate_column_is_rejected() {
        let catalog = SchemaCatalog::new(vec![SchemaDescriptor::new(
            "crm",
            vec![table(
                "crm",
                "client",
                vec![
                    ColumnDescriptor::new("name", ColumnType::String),
                    ColumnDescriptor::new("name", ColumnType::Text),
                ],
            )],
        )]);
        assert!(matches!(
            catalog.validate(),
            Err(SchemaError::DuplicateColumn { .. })
        ));
    }

    #[test]
    fn duplicate_table_is_rejected() {
        let cols = || vec![ColumnDescriptor::new("id", ColumnType::Integer)];
        let catalog = SchemaCatalog::new(vec![SchemaDescriptor::new(
            "crm",
            vec![table("crm", "client", cols()), table("crm", "client", cols())],
        )]);
        assert!(matches!(
            catalog.validate(),
            Err(SchemaError::DuplicateTable { .. })
        ));
    }

    #[test]
    fn lookup_presence_must_match_type() {
        let missing = SchemaCatalog::new(vec![SchemaDescriptor::new(
            "crm",
            vec![table(
                "crm",
                "client",
                vec![ColumnDescriptor::new("language", ColumnType::Surrogate)],
            )],
        )]);
        assert!(matches!(
            missing.validate(),
            Err(SchemaError::MissingLookup { .. })
        ));

        let unexpected = SchemaCatalog::new(vec![SchemaDescriptor::new(
            "crm",
            vec![table(
                "crm",
                "client",
                vec![ColumnDescriptor::new("firstName", ColumnType::String)
                    .with_lookup(Lookup::fixed(vec![]))],
            )],
        )]);
        assert!(matches!(
            unexpected.validate(),
            Err(SchemaError::UnexpectedLookup { .. })
        ));
    }

    #[test]
    fn properties_columns_are_the_fixed_set() {
        let columns = properties_columns();
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["name", "type", "primaryKey", "required"]);
    }
}
