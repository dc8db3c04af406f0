//! The per-row edit state machine
//!
//! A session is a plain value: a working copy of exactly one row plus the
//! dirty and validated flags. The hosting UI owns the `Option<EditSession>`
//! and invokes the transitions explicitly; dropping the session is
//! close/cancel. Only one session is open per engine at a time.

use crate::codec::{self, FieldInput};
use crate::column::ColumnDescriptor;
use crate::value::Row;
use tracing::trace;

/// The ephemeral working state of one in-progress row edit.
#[derive(Debug, Clone)]
pub struct EditSession {
    working: Row,
    dirty: bool,
    validated: bool,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Required fields are empty; nothing was committed and the session
    /// stays open with `validated` set so the form can show its invalid
    /// state.
    Invalid { missing: Vec<String> },
    /// Validation passed; the working copy is yielded to the engine and
    /// the host destroys the session.
    Commit { dirty: bool, row: Row },
}

impl EditSession {
    /// Open a session over a snapshot of `row`; dirty=false, validated=false.
    pub fn open(row: &Row) -> Self {
        Self {
            working: row.clone(),
            dirty: false,
            validated: false,
        }
    }

    pub fn working(&self) -> &Row {
        &self.working
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    /// Whether validation feedback should be shown. This flags that the
    /// validation process has run, not that the form is valid.
    pub fn validated(&self) -> bool {
        self.validated
    }

    /// Apply a form-control change to the working copy.
    ///
    /// An unknown field name is ignored, not an error. Dirty is set the
    /// first time an interpreted value actually differs from the current
    /// one and never resets within a session.
    pub fn field_changed(&mut self, columns: &[ColumnDescriptor], name: &str, input: FieldInput) {
        let Some(col) = columns.iter().find(|c| c.name == name) else {
            trace!(field = name, "change event for unknown column ignored");
            return;
        };

        let value = codec::interpret_change(col, input);
        if self.working.get(name) != Some(&value) {
            self.dirty = true;
        }
        self.working.set(name, value);
        self.validated = true;
    }

    /// Run required-field validation and either yield the working copy or
    /// report the missing fields.
    pub fn submit(&mut self, columns: &[ColumnDescriptor]) -> SubmitOutcome {
        let missing: Vec<String> = columns
            .iter()
            .filter(|col| col.required)
            .filter(|col| {
                self.working
                    .get(&col.name)
                    .map(|v| v.is_empty())
                    .unwrap_or(true)
            })
            .map(|col| col.name.clone())
            .collect();

        self.validated = true;
        if missing.is_empty() {
            SubmitOutcome::Commit {
                dirty: self.dirty,
                row: self.working.clone(),
            }
        } else {
            SubmitOutcome::Invalid { missing }
        }
    }

    /// Whether a given field currently fails the required check; used by
    /// the form to highlight invalid fields once `validated` is set.
    pub fn field_missing(&self, col: &ColumnDescriptor) -> bool {
        col.required
            && self
                .working
                .get(&col.name)
                .map(|v| v.is_empty())
                .unwrap_or(true)
    }
}
