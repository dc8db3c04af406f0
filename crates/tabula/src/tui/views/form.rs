use super::*;
use crossterm::event::{KeyCode, KeyEvent};
use tabula_schema::{codec, CellValue, ColumnType, FieldInput, SubmitOutcome};

impl FormState {
    pub(super) fn focused_column(&self) -> Option<&ColumnDescriptor> {
        self.columns.get(self.field_index)
    }

    /// Rebuild the text buffer from the working copy, e.g. after moving
    /// field focus.
    pub(super) fn refresh_input(&mut self) {
        self.input = self
            .focused_column()
            .map(|col| codec::form_value(col, self.session.working()))
            .unwrap_or_default();
    }

    fn move_field(&mut self, delta: isize) {
        if self.columns.is_empty() {
            return;
        }
        let last = self.columns.len() as isize - 1;
        let next = (self.field_index as isize + delta).clamp(0, last);
        self.field_index = next as usize;
        self.refresh_input();
    }

    /// Cycle a lookup field to the adjacent option. Options come from the
    /// column's lookup provider on every call.
    fn cycle_lookup(&mut self, delta: isize) {
        let Some(col) = self.focused_column().cloned() else {
            return;
        };
        let options = col.lookup_options();
        if options.is_empty() {
            return;
        }
        let current = codec::form_value(&col, self.session.working());
        let position = options
            .iter()
            .position(|opt| opt.value == current)
            .unwrap_or(0);
        let next = (position as isize + delta).rem_euclid(options.len() as isize) as usize;
        self.session.field_changed(
            &self.columns,
            &col.name,
            FieldInput::Pick(options[next].clone()),
        );
        self.refresh_input();
    }

    fn toggle_boolean(&mut self) {
        let Some(col) = self.focused_column().cloned() else {
            return;
        };
        let current = matches!(
            self.session.working().get(&col.name),
            Some(CellValue::Bool(true))
        );
        self.session
            .field_changed(&self.columns, &col.name, FieldInput::Toggle(!current));
        self.refresh_input();
    }

    fn edit_text(&mut self, code: KeyCode) {
        let Some(col) = self.focused_column().cloned() else {
            return;
        };
        match code {
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            _ => return,
        }
        self.session
            .field_changed(&self.columns, &col.name, FieldInput::Text(self.input.clone()));
    }
}

impl App {
    pub(super) fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            return;
        };

        let field_type = form.focused_column().map(|col| col.column_type);
        let read_only = form
            .focused_column()
            .map(|col| col.form_read_only)
            .unwrap_or(true);

        match key.code {
            KeyCode::Esc => {
                // cancel: discard the working copy regardless of dirty state
                self.form = None;
            }
            KeyCode::Down | KeyCode::Tab => form.move_field(1),
            KeyCode::Up | KeyCode::BackTab => form.move_field(-1),
            KeyCode::Enter => self.submit_form(),
            _ if read_only => {}
            KeyCode::Left | KeyCode::Right => {
                let delta = if key.code == KeyCode::Left { -1 } else { 1 };
                match field_type {
                    Some(t) if t.is_lookup() => form.cycle_lookup(delta),
                    Some(ColumnType::Boolean) => form.toggle_boolean(),
                    _ => {}
                }
            }
            KeyCode::Char(' ') if field_type == Some(ColumnType::Boolean) => {
                form.toggle_boolean();
            }
            KeyCode::Char(_) | KeyCode::Backspace => match field_type {
                Some(ColumnType::Boolean) => {}
                Some(t) if t.is_lookup() => {}
                _ => form.edit_text(key.code),
            },
            _ => {}
        }
    }

    /// Validate and, when clean, hand the working copy to the engine the
    /// session was opened from.
    fn submit_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };

        match form.session.submit(&form.columns) {
            SubmitOutcome::Invalid { missing } => {
                // suppressed: the form stays open showing its invalid state
                self.set_status(format!("Required fields missing: {}", missing.join(", ")));
            }
            SubmitOutcome::Commit { dirty, row } => {
                let target = form.target;
                self.form = None;
                match self.engine_for(target).commit(dirty, row) {
                    Ok(_) => {
                        if dirty {
                            self.set_status("Row saved");
                        }
                    }
                    Err(err) => self.set_status(format!("Commit failed: {err}")),
                }
            }
        }
    }
}
