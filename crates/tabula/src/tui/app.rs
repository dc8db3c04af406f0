//! Application state for the TUI

use crossterm::event::KeyEvent;
use tabula_schema::{
    ColumnDescriptor, EditSession, ListEngine, SchemaBrowser, Strictness,
};

#[path = "views/form.rs"]
mod form;
#[path = "views/table.rs"]
mod table;
#[path = "views/tree.rs"]
mod tree;

/// Which pane owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Tree, // schema navigation
    Table, // data/properties of the selected table
}

/// Tabs over the selected table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableTab {
    #[default]
    Data,
    Properties,
}

impl TableTab {
    pub fn next(self) -> Self {
        match self {
            TableTab::Data => TableTab::Properties,
            TableTab::Properties => TableTab::Data,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TableTab::Data => "Browse Data",
            TableTab::Properties => "Properties",
        }
    }
}

/// The open row-edit form: the edit session plus the form's own cursor
/// state. The session itself holds the working copy and flags; this wrapper
/// only tracks which field has focus and the text buffer being typed into.
pub struct FormState {
    pub session: EditSession,
    pub columns: Vec<ColumnDescriptor>,
    /// Which tab's engine the session was opened from (commit target).
    pub target: TableTab,
    pub field_index: usize,
    pub input: String,
}

pub struct App {
    pub running: bool,
    pub focus: Focus,
    pub browser: SchemaBrowser,
    /// Selection within the flattened tree entries.
    pub tree_index: usize,
    pub tab: TableTab,
    /// Title of the selected table ("schema.table"), if any.
    pub table_title: Option<String>,
    /// Total rows available at the source for the selected table.
    pub total_count: usize,
    pub data_engine: ListEngine,
    pub props_engine: ListEngine,
    /// Selected row within the current tab's engine.
    pub row_index: usize,
    pub form: Option<FormState>,
    pub status: Option<String>,
}

impl App {
    pub fn new(browser: SchemaBrowser, strictness: Strictness) -> Self {
        Self {
            running: true,
            focus: Focus::Tree,
            browser,
            tree_index: 0,
            tab: TableTab::Data,
            table_title: None,
            total_count: 0,
            data_engine: ListEngine::empty().with_strictness(strictness),
            props_engine: ListEngine::empty(),
            row_index: 0,
            form: None,
            status: None,
        }
    }

    /// Route a key press to the form, or to whichever pane has focus.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status = None;
        if self.form.is_some() {
            self.handle_form_key(key);
            return;
        }
        match self.focus {
            Focus::Tree => self.handle_tree_key(key),
            Focus::Table => self.handle_table_key(key),
        }
    }

    pub fn tick(&mut self) {}

    pub fn current_engine(&self) -> &ListEngine {
        match self.tab {
            TableTab::Data => &self.data_engine,
            TableTab::Properties => &self.props_engine,
        }
    }

    pub(super) fn current_engine_mut(&mut self) -> &mut ListEngine {
        match self.tab {
            TableTab::Data => &mut self.data_engine,
            TableTab::Properties => &mut self.props_engine,
        }
    }

    pub(super) fn engine_for(&mut self, tab: TableTab) -> &mut ListEngine {
        match tab {
            TableTab::Data => &mut self.data_engine,
            TableTab::Properties => &mut self.props_engine,
        }
    }

    pub(super) fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }
}
