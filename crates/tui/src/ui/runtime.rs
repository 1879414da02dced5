//! Runtime: terminal lifecycle, event loop and effect execution.
//!
//! The loading state is drawn before the loader runs, so the spinner is on
//! screen while data is fetched. After that a single loop polls crossterm
//! with a short timeout, routes input to the table, and turns timeouts into
//! `Msg::Tick`. Effects returned by the table are executed here; the table
//! itself never performs I/O.

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use gridview_types::{Effect, ExportRequest, LoadError, Msg, ReportExporter, Row};
use ratatui::{Terminal, prelude::*, widgets::Paragraph};
use tracing::{debug, error, info, warn};

use crate::ui::{
    components::{Component, DataTable, data_table::ViewState},
    theme::Theme,
};

const TICK_INTERVAL: Duration = Duration::from_millis(100);
const MOUSE_MOVE_THROTTLE: Duration = Duration::from_millis(16);

/// Message shown in the bottom bar after an effect ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Info(String),
    Error(String),
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Draws the table above a one-line status/hint bar.
pub fn draw(frame: &mut Frame, table: &mut DataTable, status: Option<&StatusLine>) {
    let [table_area, bar_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
    table.render(frame, table_area);

    let theme = table.theme();
    let line = match status {
        Some(StatusLine::Info(message)) => Line::from(Span::styled(message.clone(), theme.accent_style())),
        Some(StatusLine::Error(message)) => Line::from(Span::styled(message.clone(), theme.status_error())),
        None => Line::from(table.get_hint_spans()),
    };
    frame.render_widget(Paragraph::new(line), bar_area);
}

fn is_quit_key(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
}

/// Executes one effect and reports what to show in the status bar.
pub fn apply_effect<E>(effect: Effect, exporter: &E) -> StatusLine
where
    E: ReportExporter + ?Sized,
{
    match effect {
        Effect::ExportRequested(request) => export(&request, exporter),
        Effect::ActionTriggered(id) => {
            info!(action = %id, "Header action triggered");
            StatusLine::Info(format!("Action: {id}"))
        }
        Effect::SelectedRowsChanged(rows) => {
            debug!(count = rows.len(), "Selection changed");
            StatusLine::Info(format!("{} selected", rows.len()))
        }
    }
}

fn export<E>(request: &ExportRequest, exporter: &E) -> StatusLine
where
    E: ReportExporter + ?Sized,
{
    match exporter.export(request) {
        Ok(path) => {
            info!(path = %path.display(), rows = request.rows.len(), "Report exported");
            StatusLine::Info(format!("Exported {} rows to {}", request.rows.len(), path.display()))
        }
        Err(err) => {
            error!(error = %err, report = %request.report_name, "Export failed");
            StatusLine::Error(format!("Export failed: {err}"))
        }
    }
}

/// Runs the table until the user quits.
///
/// `loader` is invoked once, after the loading state is on screen.
pub fn run_app<L, E>(mut table: DataTable, loader: L, exporter: &E) -> Result<()>
where
    L: FnOnce() -> Result<Vec<Row>, LoadError>,
    E: ReportExporter + ?Sized,
{
    let mut terminal = setup_terminal()?;

    table.handle_message(Msg::FetchStarted);
    terminal.draw(|frame| draw(frame, &mut table, None))?;

    let loaded = match loader() {
        Ok(rows) => {
            info!(rows = rows.len(), "Data loaded");
            Msg::DataLoaded(rows)
        }
        Err(err) => {
            warn!(error = %err, "Data load failed");
            Msg::FetchFailed(err)
        }
    };
    table.handle_message(loaded);

    let result = event_loop(&mut terminal, &mut table, exporter);
    cleanup_terminal(&mut terminal)?;
    result
}

fn event_loop<E>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    table: &mut DataTable,
    exporter: &E,
) -> Result<()>
where
    E: ReportExporter + ?Sized,
{
    let mut status: Option<StatusLine> = None;
    let mut last_mouse_move = Instant::now();
    terminal.draw(|frame| draw(frame, table, status.as_ref()))?;

    loop {
        let mut effects = Vec::new();
        let mut needs_render = false;

        if event::poll(TICK_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => {
                    if is_quit_key(&key) {
                        break;
                    }
                    status = None;
                    effects.extend(table.handle_key_events(key));
                    needs_render = true;
                }
                Event::Mouse(mouse) => {
                    // Throttle mouse moves to once per 16 ms.
                    if mouse.kind == MouseEventKind::Moved {
                        if last_mouse_move.elapsed() < MOUSE_MOVE_THROTTLE {
                            continue;
                        }
                        last_mouse_move = Instant::now();
                    }
                    effects.extend(table.handle_mouse_events(mouse));
                    needs_render = true;
                }
                Event::Resize(width, height) => {
                    effects.extend(table.handle_message(Msg::Resize(width, height)));
                    needs_render = true;
                }
                Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
            }
        } else {
            effects.extend(table.handle_message(Msg::Tick));
            needs_render = table.view_state() == ViewState::Loading;
        }

        for effect in effects {
            status = Some(apply_effect(effect, exporter));
            needs_render = true;
        }

        if needs_render {
            terminal.draw(|frame| draw(frame, table, status.as_ref()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridview_types::{ColumnDescriptor, ExportError, PaperSize};
    use ratatui::backend::TestBackend;
    use serde_json::json;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[derive(Default)]
    struct RecordingExporter {
        calls: RefCell<Vec<(String, usize)>>,
        fail: bool,
    }

    impl ReportExporter for RecordingExporter {
        fn export(&self, request: &ExportRequest) -> Result<PathBuf, ExportError> {
            self.calls.borrow_mut().push((request.report_name.clone(), request.rows.len()));
            if self.fail {
                return Err(ExportError::InvalidReportName(request.report_name.clone()));
            }
            Ok(PathBuf::from("/tmp/out.txt"))
        }
    }

    fn request() -> ExportRequest {
        let rows: Vec<Row> = vec![json!({"id": 1}).as_object().cloned().expect("object")];
        ExportRequest {
            rows: Arc::from(rows),
            columns: Arc::from(vec![ColumnDescriptor::new("id")]),
            paper_size: PaperSize::A4,
            report_name: "Users".to_string(),
        }
    }

    #[test]
    fn export_effect_calls_exporter() {
        let exporter = RecordingExporter::default();
        let status = apply_effect(Effect::ExportRequested(request()), &exporter);
        assert_eq!(status, StatusLine::Info("Exported 1 rows to /tmp/out.txt".to_string()));
        assert_eq!(exporter.calls.borrow().as_slice(), &[("Users".to_string(), 1)]);
    }

    #[test]
    fn failed_export_is_reported() {
        let exporter = RecordingExporter {
            fail: true,
            ..RecordingExporter::default()
        };
        let status = apply_effect(Effect::ExportRequested(request()), &exporter);
        assert!(matches!(status, StatusLine::Error(message) if message.starts_with("Export failed")));
    }

    #[test]
    fn action_and_selection_effects_report_status() {
        let exporter = RecordingExporter::default();
        let status = apply_effect(Effect::ActionTriggered("refresh".into()), &exporter);
        assert_eq!(status, StatusLine::Info("Action: refresh".to_string()));
        let rows = request().rows.to_vec();
        let status = apply_effect(Effect::SelectedRowsChanged(rows), &exporter);
        assert_eq!(status, StatusLine::Info("1 selected".to_string()));
        assert!(exporter.calls.borrow().is_empty());
    }

    #[test]
    fn quit_keys() {
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)));
        assert!(!is_quit_key(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
    }

    #[test]
    fn status_bar_shows_hints_then_status() {
        let mut table = DataTable::new("Users", vec![ColumnDescriptor::new("id")]);
        let mut terminal = Terminal::new(TestBackend::new(100, 10)).expect("terminal");
        terminal.draw(|frame| draw(frame, &mut table, None)).expect("draw");
        let bottom = bottom_line(&terminal);
        assert!(bottom.contains("filter"));

        let status = StatusLine::Info("Exported 0 rows to out.txt".to_string());
        terminal.draw(|frame| draw(frame, &mut table, Some(&status))).expect("draw");
        assert!(bottom_line(&terminal).contains("Exported 0 rows"));
    }

    fn bottom_line(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let y = buffer.area.height - 1;
        (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect()
    }
}
