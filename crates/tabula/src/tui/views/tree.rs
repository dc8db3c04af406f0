use super::*;
use crossterm::event::{KeyCode, KeyEvent};
use tabula_schema::{BrowserEntry, SchemaBrowser};

impl App {
    pub(super) fn handle_tree_key(&mut self, key: KeyEvent) {
        let entries = self.browser.entries();
        if self.tree_index >= entries.len() {
            self.tree_index = entries.len().saturating_sub(1);
        }

        match key.code {
            KeyCode::Char('q') => {
                self.running = false;
            }
            KeyCode::Down => {
                if self.tree_index + 1 < entries.len() {
                    self.tree_index += 1;
                }
            }
            KeyCode::Up => {
                if self.tree_index > 0 {
                    self.tree_index -= 1;
                }
            }
            KeyCode::Right => {
                if let Some(BrowserEntry::Schema { name, .. }) = entries.get(self.tree_index) {
                    self.browser.expand_schema(name);
                }
            }
            KeyCode::Left => {
                if let Some(BrowserEntry::Schema { name, .. }) = entries.get(self.tree_index) {
                    self.browser.collapse_schema(name);
                }
            }
            KeyCode::Enter => match entries.get(self.tree_index) {
                Some(BrowserEntry::Schema { name, .. }) => {
                    let name = name.clone();
                    self.browser.toggle_schema(&name);
                }
                Some(BrowserEntry::Table { schema, name, .. }) => {
                    let (schema, name) = (schema.clone(), name.clone());
                    self.open_table(&schema, &name);
                }
                _ => {} // disabled placeholder
            },
            KeyCode::Tab => {
                if self.table_title.is_some() {
                    self.focus = Focus::Table;
                }
            }
            _ => {}
        }
    }

    /// Select a table: fetch its page and hand columns + rows to the data
    /// engine; the properties engine gets the table's own descriptors as
    /// rows. Both go through the engines' refresh policy, so reusing the
    /// same visual table across selections still refreshes the row sets.
    pub(crate) fn open_table(&mut self, schema: &str, name: &str) {
        let selection = match self.browser.select_table(schema, name) {
            Ok(Some(selection)) => selection,
            Ok(None) => return,
            Err(err) => {
                self.set_status(format!("Fetch failed: {err}"));
                return;
            }
        };

        self.table_title = Some(selection.qualified_name);
        self.total_count = selection.count;
        if let Err(err) = self.data_engine.sync(selection.columns, selection.rows) {
            self.set_status(format!("Load failed: {err}"));
            return;
        }

        if let Some(table) = self.browser.selected_table() {
            let (prop_columns, prop_rows) = SchemaBrowser::properties_view(table);
            if let Err(err) = self.props_engine.sync(prop_columns, prop_rows) {
                self.set_status(format!("Load failed: {err}"));
                return;
            }
        }

        self.tab = TableTab::Data;
        self.row_index = 0;
        self.focus = Focus::Table;
    }
}
