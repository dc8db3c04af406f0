//! The schema browser
//!
//! Navigates a schema → table index and issues fetch requests to the
//! data-access collaborator when a table is selected. Expand/collapse
//! state is local UI state, kept per schema node; the catalog itself is
//! never mutated. Selection is synchronous: a new selection simply issues
//! a new fetch and the previous table's engine is discarded by the host.

use crate::catalog::{properties_columns, SchemaCatalog, TableDescriptor};
use crate::column::{ColumnDescriptor, ColumnType};
use crate::error::FetchError;
use crate::fetch::TableDataSource;
use crate::value::{CellValue, RawRow};
use std::collections::HashSet;
use tracing::{debug, info};

/// Default page window passed through to the data source.
pub const DEFAULT_LIMIT: usize = 20;

/// One visible line of the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEntry {
    /// Disabled placeholder shown when the catalog has no schemas.
    Placeholder(&'static str),
    Schema {
        name: String,
        expanded: bool,
    },
    Table {
        schema: String,
        name: String,
        selected: bool,
    },
}

/// What selecting a table produced: the table's column descriptors plus
/// the fetched page of raw rows, ready to hand to a list engine.
#[derive(Debug)]
pub struct TableSelection {
    pub qualified_name: String,
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<RawRow>,
    /// Total available at the source; `rows.len()` may be smaller.
    pub count: usize,
}

pub struct SchemaBrowser {
    catalog: SchemaCatalog,
    source: Box<dyn TableDataSource>,
    expanded: HashSet<String>,
    selected: Option<(String, String)>,
    offset: usize,
    limit: usize,
}

impl SchemaBrowser {
    pub fn new(catalog: SchemaCatalog, source: Box<dyn TableDataSource>) -> Self {
        Self {
            catalog,
            source,
            expanded: HashSet::new(),
            selected: None,
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn catalog(&self) -> &SchemaCatalog {
        &self.catalog
    }

    /// The currently selected table's descriptor, if any.
    pub fn selected_table(&self) -> Option<&TableDescriptor> {
        let (schema, table) = self.selected.as_ref()?;
        self.catalog.table(schema, table)
    }

    /// Flatten the tree into its visible lines: every schema node, plus
    /// table nodes beneath expanded schemas. An empty catalog yields a
    /// single disabled placeholder and no table list.
    pub fn entries(&self) -> Vec<BrowserEntry> {
        if self.catalog.is_empty() {
            return vec![BrowserEntry::Placeholder("No data schemas")];
        }
        let mut entries = Vec::new();
        for schema in &self.catalog.schemas {
            let expanded = self.expanded.contains(&schema.schema_name);
            entries.push(BrowserEntry::Schema {
                name: schema.schema_name.clone(),
                expanded,
            });
            if expanded {
                for table in &schema.tables {
                    let selected = self
                        .selected
                        .as_ref()
                        .map(|(s, t)| s == &schema.schema_name && t == &table.table_name)
                        .unwrap_or(false);
                    entries.push(BrowserEntry::Table {
                        schema: schema.schema_name.clone(),
                        name: table.table_name.clone(),
                        selected,
                    });
                }
            }
        }
        entries
    }

    /// Expand or collapse one schema node.
    pub fn toggle_schema(&mut self, schema: &str) {
        if !self.expanded.remove(schema) {
            self.expanded.insert(schema.to_string());
        }
    }

    pub fn expand_schema(&mut self, schema: &str) {
        self.expanded.insert(schema.to_string());
    }

    pub fn collapse_schema(&mut self, schema: &str) {
        self.expanded.remove(schema);
    }

    /// Select a table: fetch its page from the collaborator and return the
    /// columns + rows for the host's data engine. A table absent from the
    /// catalog yields `Ok(None)`.
    pub fn select_table(
        &mut self,
        schema: &str,
        table: &str,
    ) -> Result<Option<TableSelection>, FetchError> {
        let Some(descriptor) = self.catalog.table(schema, table) else {
            return Ok(None);
        };
        let columns = descriptor.columns.clone();
        let qualified_name = descriptor.qualified_name();

        debug!(schema, table, offset = self.offset, limit = self.limit, "fetching table data");
        let result = self
            .source
            .fetch_table_data(schema, table, self.offset, self.limit)?;
        info!(
            table = %qualified_name,
            count = result.count,
            page = result.data.len(),
            "table selected"
        );

        self.selected = Some((schema.to_string(), table.to_string()));
        Ok(Some(TableSelection {
            qualified_name,
            columns,
            rows: result.data,
            count: result.count,
        }))
    }

    /// The Properties view: the selected table's own column descriptors
    /// rendered as rows under the fixed {name, type, primaryKey, required}
    /// column set.
    pub fn properties_view(table: &TableDescriptor) -> (Vec<ColumnDescriptor>, Vec<RawRow>) {
        let rows = table
            .columns
            .iter()
            .map(|col| {
                let mut row = RawRow::new();
                row.insert("name".into(), CellValue::Str(col.name.clone()));
                row.insert("type".into(), CellValue::Str(col.column_type.to_string()));
                row.insert("primaryKey".into(), CellValue::Bool(col.primary_key));
                row.insert("required".into(), CellValue::Bool(col.required));
                row
            })
            .collect();
        (properties_columns(), rows)
    }
}

impl std::fmt::Debug for SchemaBrowser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaBrowser")
            .field("schemas", &self.catalog.schemas.len())
            .field("expanded", &self.expanded)
            .field("selected", &self.selected)
            .finish()
    }
}
