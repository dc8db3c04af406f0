//! Schema-driven table model
//!
//! # Philosophy: the schema is the UI
//!
//! Instead of hand-writing a browse table and an edit form per entity, a
//! caller supplies two things:
//!
//! 1. A [`SchemaCatalog`] — schemas, tables and ordered column descriptors.
//! 2. A [`TableDataSource`] — the data-fetch collaborator that returns rows
//!    for a (schema, table) pair.
//!
//! Everything else is generic: the [`codec`] maps a column's declared type
//! to display strings and typed field values, the [`EditSession`] state
//! machine drives one in-progress row edit, and the [`ListEngine`] owns the
//! row set and merges committed edits back by row identity.
//!
//! # Modules
//!
//! - [`column`]: column descriptors, types and lookup providers
//! - [`catalog`]: table/schema descriptors and catalog validation
//! - [`value`]: cell values, rows and ingestion
//! - [`codec`]: display formatting and form-input interpretation
//! - [`session`]: the per-row edit state machine
//! - [`engine`]: the owned row set (ingest, select, commit/merge)
//! - [`browser`]: schema → table navigation over a data source
//! - [`fetch`]: the data-fetch collaborator contract

pub mod browser;
pub mod catalog;
pub mod codec;
pub mod column;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod session;
pub mod value;

pub use browser::{BrowserEntry, SchemaBrowser, TableSelection};
pub use catalog::{SchemaCatalog, SchemaDescriptor, TableDescriptor};
pub use codec::FieldInput;
pub use column::{ColumnDescriptor, ColumnType, Lookup, LookupOption};
pub use engine::{
    default_refresh_policy, CommitOutcome, ListEngine, RefreshPolicy, RowSelection, Strictness,
};
pub use error::{EngineError, FetchError, SchemaError};
pub use fetch::{FetchResult, InMemorySource, TableDataSource};
pub use session::{EditSession, SubmitOutcome};
pub use value::{ingest, CellValue, RawRow, Row};
