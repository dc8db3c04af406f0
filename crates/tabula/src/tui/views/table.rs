use super::*;
use crossterm::event::{KeyCode, KeyEvent};
use tabula_schema::RowSelection;

impl App {
    pub(super) fn handle_table_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.running = false;
            }
            KeyCode::Esc => {
                self.focus = Focus::Tree;
            }
            KeyCode::Tab => {
                self.tab = self.tab.next();
                self.row_index = 0;
            }
            KeyCode::Down => {
                let len = self.current_engine().rows().len();
                if len > 0 && self.row_index + 1 < len {
                    self.row_index += 1;
                }
            }
            KeyCode::Up => {
                if self.row_index > 0 {
                    self.row_index -= 1;
                }
            }
            KeyCode::Enter => {
                self.open_row_form();
            }
            _ => {}
        }
    }

    /// Activate the selected row. The engine either runs a caller-supplied
    /// click override or opens an edit session, which becomes the modal
    /// form.
    fn open_row_form(&mut self) {
        let index = self.row_index;
        let target = self.tab;
        let engine = self.current_engine_mut();
        let columns = engine.columns().to_vec();
        match engine.select_row(index) {
            RowSelection::Edit(session) => {
                let mut form = FormState {
                    session,
                    columns,
                    target,
                    field_index: 0,
                    input: String::new(),
                };
                form.refresh_input();
                self.form = Some(form);
            }
            RowSelection::Handled => {}
        }
    }
}
