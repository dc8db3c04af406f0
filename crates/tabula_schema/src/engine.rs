//! The table/list engine
//!
//! Owns the current row set for one table: ingestion, row identity, the
//! active selection, and the merge of committed edits back into the set.
//! External row/column updates go through an explicit refresh policy rather
//! than an inheritance hook: the policy decides whether the incoming data
//! replaces the owned set.

use crate::column::ColumnDescriptor;
use crate::error::EngineError;
use crate::session::EditSession;
use crate::value::{ingest, RawRow, Row};
use std::collections::HashSet;
use std::fmt;
use tracing::{info, warn};

/// How the engine treats row-identity violations.
///
/// The source contract is silent on colliding `row_id`s, so this is a
/// caller decision: `Lenient` reproduces the original behavior (collisions
/// accepted, a commit then updates every matching row, a missing commit
/// target is a silent no-op), `Strict` turns both into errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    #[default]
    Lenient,
    Strict,
}

/// Decides whether an external row/column update replaces the owned set.
/// Evaluated on every [`ListEngine::sync`]; the default is structural
/// inequality, so the same visual table refreshes when it is reused across
/// different selected tables without being remounted.
pub type RefreshPolicy =
    fn(&[ColumnDescriptor], &[Row], &[ColumnDescriptor], &[Row]) -> bool;

/// Replace the row set when the column descriptors or the row data differ
/// structurally (not by reference).
pub fn default_refresh_policy(
    prev_columns: &[ColumnDescriptor],
    prev_rows: &[Row],
    next_columns: &[ColumnDescriptor],
    next_rows: &[Row],
) -> bool {
    prev_columns != next_columns || prev_rows != next_rows
}

/// Result of a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Submitted clean; the owned set is untouched.
    Clean,
    /// Rows whose `row_id` matched were replaced (one, unless the source
    /// supplied colliding ids under `Lenient`).
    Updated(usize),
    /// No row matched the committed `row_id`; the set is unchanged.
    NoMatch,
}

/// What a row selection produced.
pub enum RowSelection {
    /// A caller-supplied click handler took over (or there was no row).
    Handled,
    /// The built-in behavior: an edit session opened over the row.
    Edit(EditSession),
}

type RowUpdateHook = Box<dyn FnMut(&Row) + Send>;
type RowClickHook = Box<dyn FnMut(&Row, &[ColumnDescriptor]) + Send>;

/// Owner of the row set for one table.
pub struct ListEngine {
    columns: Vec<ColumnDescriptor>,
    rows: Vec<Row>,
    active: Option<i64>,
    strictness: Strictness,
    refresh_policy: RefreshPolicy,
    on_row_update: Option<RowUpdateHook>,
    on_row_click: Option<RowClickHook>,
}

impl ListEngine {
    /// Ingest `raw` (identity assignment per [`ingest`]) and take ownership
    /// of the resulting set.
    pub fn new(
        columns: Vec<ColumnDescriptor>,
        raw: Vec<RawRow>,
        strictness: Strictness,
    ) -> Result<Self, EngineError> {
        let rows = ingest(raw);
        check_identity(&rows, strictness)?;
        Ok(Self {
            columns,
            rows,
            active: None,
            strictness,
            refresh_policy: default_refresh_policy,
            on_row_update: None,
            on_row_click: None,
        })
    }

    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            active: None,
            strictness: Strictness::Lenient,
            refresh_policy: default_refresh_policy,
            on_row_update: None,
            on_row_click: None,
        }
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn active(&self) -> Option<i64> {
        self.active
    }

    /// Inject a non-default refresh policy.
    pub fn set_refresh_policy(&mut self, policy: RefreshPolicy) {
        self.refresh_policy = policy;
    }

    /// Install the commit notification hook. Absence is valid; commits
    /// still apply locally.
    pub fn set_on_row_update(&mut self, hook: RowUpdateHook) {
        self.on_row_update = Some(hook);
    }

    /// Install a row-click override, fully replacing the built-in
    /// open-edit-form behavior.
    pub fn set_on_row_click(&mut self, hook: RowClickHook) {
        self.on_row_click = Some(hook);
    }

    /// Offer new columns/rows from outside (a fresh fetch, a different
    /// table). The refresh policy decides whether they replace the owned
    /// set; returns whether a replacement happened.
    pub fn sync(
        &mut self,
        columns: Vec<ColumnDescriptor>,
        raw: Vec<RawRow>,
    ) -> Result<bool, EngineError> {
        let next = ingest(raw);
        if !(self.refresh_policy)(&self.columns, &self.rows, &columns, &next) {
            return Ok(false);
        }
        check_identity(&next, self.strictness)?;
        self.columns = columns;
        self.rows = next;
        self.active = None;
        Ok(true)
    }

    /// A row was activated. Either the caller-supplied click handler runs
    /// (no internal state change), or an edit session opens over the row
    /// and it becomes the active selection.
    pub fn select_row(&mut self, index: usize) -> RowSelection {
        let Some(row) = self.rows.get(index).cloned() else {
            return RowSelection::Handled;
        };
        if let Some(hook) = self.on_row_click.as_mut() {
            hook(&row, &self.columns);
            return RowSelection::Handled;
        }
        self.active = Some(row.row_id);
        RowSelection::Edit(EditSession::open(&row))
    }

    /// Merge a submitted edit back into the owned set by row identity.
    ///
    /// A clean submit never changes the set. A dirty submit replaces every
    /// row whose `row_id` matches, preserving order and position; with no
    /// match the set is unchanged (`Lenient`) or the commit is an error
    /// (`Strict`). The active selection is cleared and the update hook, if
    /// any, fires with the submitted row.
    pub fn commit(&mut self, dirty: bool, updated: Row) -> Result<CommitOutcome, EngineError> {
        self.active = None;

        let outcome = if !dirty {
            CommitOutcome::Clean
        } else {
            let mut replaced = 0;
            for row in &mut self.rows {
                if row.row_id == updated.row_id {
                    *row = updated.clone();
                    replaced += 1;
                }
            }
            if replaced == 0 {
                if self.strictness == Strictness::Strict {
                    return Err(EngineError::MissingCommitTarget(updated.row_id));
                }
                warn!(row_id = updated.row_id, "commit target not in row set, dropped");
                CommitOutcome::NoMatch
            } else {
                info!(row_id = updated.row_id, replaced, "row committed");
                CommitOutcome::Updated(replaced)
            }
        };

        if let Some(hook) = self.on_row_update.as_mut() {
            hook(&updated);
        }
        Ok(outcome)
    }
}

impl fmt::Debug for ListEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListEngine")
            .field("columns", &self.columns.len())
            .field("rows", &self.rows.len())
            .field("active", &self.active)
            .field("strictness", &self.strictness)
            .finish()
    }
}

fn check_identity(rows: &[Row], strictness: Strictness) -> Result<(), EngineError> {
    let mut seen = HashSet::new();
    for row in rows {
        if !seen.insert(row.row_id) {
            if strictness == Strictness::Strict {
                return Err(EngineError::DuplicateRowId(row.row_id));
            }
            warn!(row_id = row.row_id, "duplicate row_id in ingested data");
        }
    }
    Ok(())
}
