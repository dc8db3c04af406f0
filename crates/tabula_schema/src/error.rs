//! Error types for the table model
//!
//! The core has no fatal paths: empty catalogs, empty data sets and
//! malformed lookup results all degrade to "nothing to show". The errors
//! here cover caller mistakes (invalid catalogs), strict-mode identity
//! violations, and data-source failures.

use thiserror::Error;

/// Catalog validation failures. Raised when a caller-supplied catalog
/// breaks a structural invariant; the catalog is rejected wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("duplicate table '{schema}.{table}' in catalog")]
    DuplicateTable { schema: String, table: String },

    #[error("duplicate column '{column}' in table '{schema}.{table}'")]
    DuplicateColumn {
        schema: String,
        table: String,
        column: String,
    },

    #[error("column '{column}' in '{schema}.{table}' has type {column_type} but no lookup")]
    MissingLookup {
        schema: String,
        table: String,
        column: String,
        column_type: String,
    },

    #[error("column '{column}' in '{schema}.{table}' has type {column_type} and must not carry a lookup")]
    UnexpectedLookup {
        schema: String,
        table: String,
        column: String,
        column_type: String,
    },
}

/// Row-identity violations, only raised under [`Strictness::Strict`].
///
/// [`Strictness::Strict`]: crate::engine::Strictness::Strict
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("duplicate row_id {0} in ingested data")]
    DuplicateRowId(i64),

    #[error("commit targets row_id {0} which is not in the row set")]
    MissingCommitTarget(i64),
}

/// Data-source failures surfaced by a [`TableDataSource`].
///
/// [`TableDataSource`]: crate::fetch::TableDataSource
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("data source failure: {0}")]
    Source(String),
}
