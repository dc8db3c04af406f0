//! The data-fetch collaborator contract
//!
//! A single external source serves row data for every table in the
//! catalog. The call is synchronous within the core's contract; callers
//! may wrap it asynchronously, but the core does not model in-flight
//! state, cancellation or retries.

use crate::error::FetchError;
use crate::value::RawRow;
use std::collections::HashMap;

/// One page of fetched rows. `count` is the total available; `data` is the
/// page returned and its length need not equal `count`. The core renders
/// exactly what `data` contains.
#[derive(Debug, Clone, Default)]
pub struct FetchResult {
    pub count: usize,
    pub data: Vec<RawRow>,
}

/// The data-access collaborator the schema browser calls per selected
/// table. Offset/limit are passed through unchanged; the core does not
/// paginate beyond that.
pub trait TableDataSource {
    fn fetch_table_data(
        &self,
        schema: &str,
        table: &str,
        offset: usize,
        limit: usize,
    ) -> Result<FetchResult, FetchError>;
}

/// In-memory source backed by per-table row lists; serves fixtures, the
/// built-in sample data and tests. An unknown (schema, table) pair yields
/// an empty result, not an error.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    tables: HashMap<(String, String), Vec<RawRow>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_table(
        &mut self,
        schema: impl Into<String>,
        table: impl Into<String>,
        rows: Vec<RawRow>,
    ) {
        self.tables.insert((schema.into(), table.into()), rows);
    }
}

impl TableDataSource for InMemorySource {
    fn fetch_table_data(
        &self,
        schema: &str,
        table: &str,
        offset: usize,
        limit: usize,
    ) -> Result<FetchResult, FetchError> {
        let Some(rows) = self.tables.get(&(schema.to_string(), table.to_string())) else {
            return Ok(FetchResult::default());
        };
        let data: Vec<RawRow> = rows.iter().skip(offset).take(limit).cloned().collect();
        Ok(FetchResult {
            count: rows.len(),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CellValue;

    fn rows(n: usize) -> Vec<RawRow> {
        (0..n)
            .map(|i| {
                let mut row = RawRow::new();
                row.insert("n".into(), CellValue::Int(i as i64));
                row
            })
            .collect()
    }

    #[test]
    fn unknown_table_yields_empty_result() {
        let source = InMemorySource::new();
        let result = source.fetch_table_data("crm", "client", 0, 20).unwrap();
        assert_eq!(result.count, 0);
        assert!(result.data.is_empty());
    }

    #[test]
    fn offset_and_limit_slice_the_page() {
        let mut source = InMemorySource::new();
        source.insert_table("crm", "client", rows(30));

        let page = source.fetch_table_data("crm", "client", 10, 5).unwrap();
        assert_eq!(page.count, 30);
        assert_eq!(page.data.len(), 5);
        assert_eq!(page.data[0]["n"], CellValue::Int(10));

        // count reports the total even when the page is short
        let tail = source.fetch_table_data("crm", "client", 28, 20).unwrap();
        assert_eq!(tail.count, 30);
        assert_eq!(tail.data.len(), 2);
    }
}
