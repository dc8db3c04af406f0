//! UI rendering for the TUI
//!
//! Pure rendering over the application state: the schema tree on the left,
//! the selected table (Data/Properties tabs) on the right, and the row-edit
//! form as a modal. No state lives here.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row as TableRow, Table, TableState},
};
use tabula_schema::{codec, BrowserEntry, ColumnType};

use super::app::{App, Focus, TableTab};
use super::components::modal;

/// Maximum characters shown for `text` columns in list cells.
const TEXT_CELL_WIDTH: usize = 32;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title bar
            Constraint::Min(0),    // main
            Constraint::Length(1), // status bar
        ])
        .split(frame.area());

    draw_title_bar(frame, chunks[0]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(0)])
        .split(chunks[1]);

    draw_schema_tree(frame, app, main[0]);
    draw_table_pane(frame, app, main[1]);
    draw_status_bar(frame, app, chunks[2]);

    if app.form.is_some() {
        draw_form_modal(frame, app, frame.area());
    }
}

fn draw_title_bar(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(" tabula — schema-driven data browser")
        .style(Style::default().fg(Color::Black).bg(Color::Cyan));
    frame.render_widget(title, area);
}

fn draw_schema_tree(frame: &mut Frame, app: &App, area: Rect) {
    let entries = app.browser.entries();
    let mut lines: Vec<Line> = Vec::new();

    for (i, entry) in entries.iter().enumerate() {
        let is_cursor = app.focus == Focus::Tree && i == app.tree_index;
        let line = match entry {
            BrowserEntry::Placeholder(text) => {
                Line::from(Span::styled(*text, Style::default().fg(Color::DarkGray)))
            }
            BrowserEntry::Schema { name, expanded } => {
                let marker = if *expanded { "▾" } else { "▸" };
                let style = if is_cursor {
                    Style::default().fg(Color::Cyan).bold()
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(Span::styled(format!("{marker} {name}"), style))
            }
            BrowserEntry::Table {
                name, selected, ..
            } => {
                let style = if is_cursor {
                    Style::default().fg(Color::Cyan).bold()
                } else if *selected {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Line::from(Span::styled(format!("   {name}"), style))
            }
        };
        lines.push(line);
    }

    let border_style = if app.focus == Focus::Tree {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Schemas ")
        .border_style(border_style);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_table_pane(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.focus == Focus::Table {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let Some(ref title) = app.table_title else {
        let block = Block::default().borders(Borders::ALL).border_style(border_style);
        let hint = Paragraph::new("Select a schema table")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Min(0),    // table
            Constraint::Length(1), // row count
        ])
        .split(inner);

    draw_tabs(frame, app, chunks[0]);
    draw_data_table(frame, app, chunks[1]);

    let engine = app.current_engine();
    let count_text = match app.tab {
        TableTab::Data => format!(
            "{} of {} rows",
            engine.rows().len(),
            app.total_count
        ),
        TableTab::Properties => format!("{} columns", engine.rows().len()),
    };
    frame.render_widget(
        Paragraph::new(count_text).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    for tab in [TableTab::Data, TableTab::Properties] {
        let style = if tab == app.tab {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", tab.label()), style));
        spans.push(Span::raw("│"));
    }
    spans.pop();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Header + body straight from the column descriptors and the engine's
/// rows; every cell goes through the value codec.
fn draw_data_table(frame: &mut Frame, app: &App, area: Rect) {
    let engine = app.current_engine();
    let columns = engine.columns();
    if columns.is_empty() {
        frame.render_widget(
            Paragraph::new("Nothing to show").style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let header = TableRow::new(columns.iter().map(|col| {
        let name = if col.primary_key {
            // key marker on primary-key columns
            format!("⚷ {}", col.display_name())
        } else {
            col.display_name().to_string()
        };
        Cell::from(name).style(Style::default().fg(Color::White).bold())
    }));

    let rows = engine.rows().iter().map(|row| {
        TableRow::new(columns.iter().map(|col| {
            Cell::from(codec::list_display_value(col, row, TEXT_CELL_WIDTH))
        }))
    });

    let widths = vec![Constraint::Fill(1); columns.len()];
    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default();
    if app.focus == Focus::Table && !engine.rows().is_empty() {
        state.select(Some(app.row_index.min(engine.rows().len() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match app.status {
        Some(ref message) => (
            message.as_str(),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
        None => {
            let help = match (app.form.is_some(), app.focus) {
                (true, _) => " Enter save · Esc cancel",
                (false, Focus::Tree) => " ↑↓ move · Enter open · →← expand · Tab table · q quit",
                (false, Focus::Table) => " ↑↓ row · Enter edit · Tab switch view · Esc tree · q quit",
            };
            (help, Style::default().fg(Color::DarkGray))
        }
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}

fn draw_form_modal(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref form) = app.form else {
        return;
    };

    let height = (form.columns.len() as u16 + 4).min(area.height.saturating_sub(2));
    let layout = modal::render_modal(
        frame,
        area,
        70,
        height.max(6),
        1,
        " Row Edit ",
        Style::default().fg(Color::Cyan),
    );

    let label_width = form
        .columns
        .iter()
        .map(|col| col.display_name().chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = Vec::new();
    for (i, col) in form.columns.iter().enumerate() {
        let focused = i == form.field_index;
        let invalid = form.session.validated() && form.session.field_missing(col);

        let label_style = if invalid {
            Style::default().fg(Color::Red).bold()
        } else if focused {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };

        let value = field_display(form, i, focused);
        let value_style = if col.form_read_only {
            Style::default().fg(Color::DarkGray)
        } else if focused {
            Style::default().fg(Color::White).bold()
        } else {
            Style::default().fg(Color::White)
        };

        let marker = if focused { "▌" } else { " " };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(
                format!("{:>width$}", col.display_name(), width = label_width),
                label_style,
            ),
            Span::raw("  "),
            Span::styled(value, value_style),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), layout.body);
    frame.render_widget(
        Paragraph::new("Enter Save · Esc Cancel · ↑↓ Field · ←→ Option · Space Toggle")
            .style(Style::default().fg(Color::DarkGray)),
        layout.footer,
    );
}

/// Form representation of one field: the live text buffer for the focused
/// field, cycle arrows around lookup options, and the untruncated codec
/// display otherwise.
fn field_display(form: &super::app::FormState, index: usize, focused: bool) -> String {
    let col = &form.columns[index];
    let working = form.session.working();

    if col.column_type.is_lookup() || col.column_type == ColumnType::Boolean {
        let shown = codec::display_value(col, working);
        if focused && !col.form_read_only {
            return format!("◂ {shown} ▸");
        }
        return shown;
    }

    if focused && !col.form_read_only {
        format!("{}█", form.input)
    } else {
        codec::display_value(col, working)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tabula_schema::{SchemaBrowser, Strictness};

    fn sample_app() -> App {
        let browser = SchemaBrowser::new(
            sample::sample_catalog(),
            Box::new(sample::sample_source()),
        );
        App::new(browser, Strictness::Lenient)
    }

    #[test]
    fn renders_initial_screen_without_panic() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = sample_app();
        terminal.draw(|frame| draw(frame, &app)).unwrap();
    }

    #[test]
    fn renders_empty_catalog_placeholder() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = App::new(
            SchemaBrowser::new(
                tabula_schema::SchemaCatalog::default(),
                Box::new(tabula_schema::InMemorySource::new()),
            ),
            Strictness::Lenient,
        );
        terminal.draw(|frame| draw(frame, &app)).unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("No data schemas"));
    }

    #[test]
    fn renders_selected_table_with_key_marker() {
        let backend = TestBackend::new(140, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = sample_app();
        app.browser.expand_schema("ClientDB");
        app.open_table("ClientDB", "client");

        terminal.draw(|frame| draw(frame, &app)).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("ClientDB.client"));
        assert!(text.contains("⚷"));
        assert!(text.contains("20 of 20 rows"));
    }

    #[test]
    fn renders_edit_form_modal() {
        let backend = TestBackend::new(140, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = sample_app();
        app.open_table("ClientDB", "client");
        app.handle_key(crossterm::event::KeyEvent::from(
            crossterm::event::KeyCode::Enter,
        ));
        assert!(app.form.is_some());

        terminal.draw(|frame| draw(frame, &app)).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Row Edit"));
        assert!(text.contains("First Name"));
    }

    fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }
}
