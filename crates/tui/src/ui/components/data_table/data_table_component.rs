//! The data table: a search header with an export action on top of a
//! themed, paginated grid.
//!
//! While fetching only the loading indicator is drawn, on error only the
//! error notice, otherwise the header and the grid. The grid always receives
//! the rows that survive the current filter, while the export action always
//! carries the complete data set.
//!
//! Key routing in the ready state:
//! - `Ctrl+E` exports from anywhere.
//! - `Tab`/`BackTab` move focus between the search box and the grid.
//! - With the search box focused, keys edit the filter; `Esc` clears it
//!   (and hands focus back to the grid when it is already empty).
//! - With the grid focused, `/` focuses the search box, header action keys
//!   trigger their action, and everything else goes to the grid. Action
//!   keys take precedence over grid keys.
//! - With the header hidden there is no search box and no action row, so
//!   every key goes to the grid.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use gridview_types::{ColumnDescriptor, Effect, LoadError, Msg, Row, TableOptions};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tracing::{debug, info};

use super::{
    dispatch::{ERROR_NOTICE, ViewState},
    filter::filter_rows,
    header::{HeaderAction, HeaderComposer, HeaderDeps, HeaderModel},
    search_box::{SearchBox, SearchEdit},
    state::FilterState,
};
use crate::ui::{
    components::{
        component::Component,
        grid::{ExpandedRowRenderer, GridComponent, GridProps, GridView, SubHeaderAlign},
        spinner::Spinner,
    },
    theme::{DEFAULT_THEME, Palette, Theme, ensure_cyberdrain_theme, resolve_or_default, theme_helpers as th},
    utils::{centered_rect, infer_columns},
};

const HEADER_HEIGHT: u16 = 3;
const SEARCH_WIDTH: u16 = 32;

pub struct DataTable {
    data: Arc<[Row]>,
    columns: Arc<[ColumnDescriptor]>,
    report_name: String,
    is_fetching: bool,
    error: Option<LoadError>,
    options: TableOptions,

    filter: FilterState,
    header: HeaderComposer,
    search: SearchBox,
    grid: GridComponent,
    spinner: Spinner,

    /// Grid props for the reset toggle they were built with.
    props: GridProps,
    props_toggle: Option<bool>,
    theme: Arc<Palette>,

    container: FocusFlag,
    grid_focus: FocusFlag,
    search_area: Rect,
    grid_area: Rect,
}

impl DataTable {
    pub fn new(report_name: impl Into<String>, columns: impl Into<Arc<[ColumnDescriptor]>>) -> Self {
        let options = TableOptions::default();
        let grid_focus = FocusFlag::named("gridview.grid");
        grid_focus.set(true);
        let mut table = Self {
            data: Arc::from(Vec::new()),
            columns: columns.into(),
            report_name: report_name.into(),
            is_fetching: false,
            error: None,
            props: GridProps::default(),
            props_toggle: None,
            theme: resolve_or_default(DEFAULT_THEME),
            options,
            filter: FilterState::new(),
            header: HeaderComposer::new(),
            search: SearchBox::default(),
            grid: GridComponent::new(),
            spinner: Spinner::default(),
            container: FocusFlag::named("gridview.table"),
            grid_focus,
            search_area: Rect::default(),
            grid_area: Rect::default(),
        };
        table.refresh_props();
        table
    }

    pub fn with_options(mut self, options: TableOptions) -> Self {
        self.set_options(options);
        self
    }

    pub fn with_data(mut self, data: impl Into<Arc<[Row]>>) -> Self {
        self.set_data(data);
        self
    }

    pub fn with_expanded_row_renderer(mut self, renderer: ExpandedRowRenderer) -> Self {
        self.grid = self.grid.with_expanded_renderer(renderer);
        self
    }

    // Selectors
    pub fn view_state(&self) -> ViewState {
        ViewState::dispatch(self.is_fetching, self.error.as_ref())
    }
    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }
    pub fn options(&self) -> &TableOptions {
        &self.options
    }
    pub fn data(&self) -> &Arc<[Row]> {
        &self.data
    }
    pub fn grid(&self) -> &GridComponent {
        &self.grid
    }
    /// The resolved palette the table renders with.
    pub fn theme(&self) -> Arc<Palette> {
        Arc::clone(&self.theme)
    }
    pub fn is_search_focused(&self) -> bool {
        self.search.focus.get()
    }

    /// Rows that pass the current filter, in data order.
    pub fn filtered_rows(&self) -> Vec<&Row> {
        filter_rows(&self.data, self.filter.filter_text())
    }

    /// The header for the current state; rebuilt only when a dependency changed.
    pub fn header(&mut self) -> &HeaderModel {
        self.header.compose(HeaderDeps {
            filter_text: self.filter.filter_text(),
            reset_toggle: self.filter.reset_toggle(),
            columns: &self.columns,
            data: &self.data,
            report_name: &self.report_name,
            actions: &self.options.actions,
        })
    }

    // Reducers
    pub fn set_data(&mut self, data: impl Into<Arc<[Row]>>) {
        self.data = data.into();
        debug!(rows = self.data.len(), "Table data replaced");
    }

    pub fn set_columns(&mut self, columns: impl Into<Arc<[ColumnDescriptor]>>) {
        self.columns = columns.into();
    }

    pub fn set_fetching(&mut self, is_fetching: bool) {
        self.is_fetching = is_fetching;
    }

    pub fn set_error(&mut self, error: Option<LoadError>) {
        self.error = error;
    }

    pub fn set_report_name(&mut self, report_name: impl Into<String>) {
        self.report_name = report_name.into();
    }

    pub fn set_options(&mut self, options: TableOptions) {
        self.options = options;
        self.props_toggle = None;
        self.refresh_props();
    }

    /// Rebuilds grid props and the theme when the options or the reset toggle changed.
    fn refresh_props(&mut self) {
        let toggle = self.filter.reset_toggle();
        if self.props_toggle == Some(toggle) {
            return;
        }
        let theme_changed = self.props_toggle.is_none();
        self.props = GridProps::for_table(&self.options, toggle);
        self.props_toggle = Some(toggle);
        if theme_changed {
            ensure_cyberdrain_theme();
            self.theme = resolve_or_default(&self.props.theme);
        }
        if !self.props.sub_header && self.search.focus.get() {
            self.focus_grid();
        }
    }

    fn focus_search(&mut self) {
        self.search.focus.set(true);
        self.grid_focus.set(false);
    }

    fn focus_grid(&mut self) {
        self.search.focus.set(false);
        self.grid_focus.set(true);
    }

    fn cycle_focus(&mut self, forward: bool) {
        let focus = FocusBuilder::build_for(&*self);
        if forward {
            focus.next();
        } else {
            focus.prev();
        }
    }

    fn export_effect(&mut self) -> Vec<Effect> {
        match self.header().export_request() {
            Some(request) => {
                info!(report = %request.report_name, rows = request.rows.len(), "Export requested");
                vec![Effect::ExportRequested(request.clone())]
            }
            None => Vec::new(),
        }
    }

    fn action_effect(&mut self, key: char) -> Option<Effect> {
        let effect = match self.header().action_for_key(key)? {
            HeaderAction::Export(request) => Effect::ExportRequested(request.clone()),
            HeaderAction::Custom(spec) => Effect::ActionTriggered(spec.id.clone()),
        };
        debug!(key = %key, "Header action triggered");
        Some(effect)
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Enter | KeyCode::Down => {
                self.focus_grid();
                return Vec::new();
            }
            KeyCode::Esc if !self.filter.is_filtering() => {
                self.search.handle_key(key);
                self.focus_grid();
                return Vec::new();
            }
            _ => {}
        }
        match self.search.handle_key(key) {
            Some(SearchEdit::Changed(text)) => self.filter.set_filter(text),
            Some(SearchEdit::Cleared) => {
                self.filter.clear();
            }
            None => {}
        }
        Vec::new()
    }

    fn handle_grid_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let rows = filter_rows(&self.data, self.filter.filter_text());
        let view = GridView {
            props: &self.props,
            rows: &rows,
            columns: &self.columns,
            theme: &*self.theme,
        };
        self.grid.handle_key_events(&view, key)
    }

    fn render_ready(&mut self, frame: &mut Frame, area: Rect, theme: &dyn Theme) {
        let header_height = if self.props.sub_header { HEADER_HEIGHT } else { 0 };
        let [header_area, grid_area] =
            Layout::vertical([Constraint::Length(header_height), Constraint::Min(1)]).areas(area);

        if self.props.sub_header {
            self.render_header(frame, header_area, theme);
        } else {
            self.search_area = Rect::default();
        }

        self.grid_area = grid_area;
        let rows = filter_rows(&self.data, self.filter.filter_text());
        let view = GridView {
            props: &self.props,
            rows: &rows,
            columns: &self.columns,
            theme,
        };
        let focused = self.grid_focus.get();
        self.grid.render(frame, grid_area, &view, focused);
    }

    fn render_header(&mut self, frame: &mut Frame, area: Rect, theme: &dyn Theme) {
        let [left, right] = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
        let width = SEARCH_WIDTH.min(left.width);
        let x = match self.props.sub_header_align {
            SubHeaderAlign::Left => left.x,
            SubHeaderAlign::Center => left.x + (left.width - width) / 2,
            SubHeaderAlign::Right => left.right() - width,
        };
        self.search_area = Rect { x, width, ..left };

        let header = self.header.compose(HeaderDeps {
            filter_text: self.filter.filter_text(),
            reset_toggle: self.filter.reset_toggle(),
            columns: &self.columns,
            data: &self.data,
            report_name: &self.report_name,
            actions: &self.options.actions,
        });
        self.search.sync(&header.search);
        self.search.render(frame, self.search_area, &header.search, theme);

        let actions_area = Rect {
            y: right.y + right.height / 2,
            height: right.height.min(1),
            ..right
        };
        let actions = Paragraph::new(action_line(header, theme)).alignment(Alignment::Right);
        frame.render_widget(actions, actions_area);
    }
}

fn action_line<'a>(header: &'a HeaderModel, theme: &dyn Theme) -> Line<'a> {
    let mut spans = Vec::with_capacity(header.actions.len() * 2);
    for (index, action) in header.actions.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        let label = match action.key() {
            Some(key) => format!(" {} ({key}) ", action.label()),
            None => format!(" {} ", action.label()),
        };
        spans.push(Span::styled(label, th::button_style(theme, true, false)));
    }
    Line::from(spans)
}

impl HasFocus for DataTable {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        if self.props.sub_header {
            builder.leaf_widget(&self.search.focus);
        }
        builder.leaf_widget(&self.grid_focus);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

impl Component for DataTable {
    fn handle_message(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::FetchStarted => self.set_fetching(true),
            Msg::DataLoaded(rows) => {
                if self.columns.is_empty() {
                    self.columns = infer_columns(&rows).into();
                    debug!(columns = self.columns.len(), "Inferred columns from data");
                }
                self.set_data(rows);
                self.is_fetching = false;
                self.error = None;
            }
            Msg::FetchFailed(error) => {
                self.is_fetching = false;
                self.error = Some(error);
            }
            Msg::ColumnsChanged(columns) => self.set_columns(columns),
            Msg::Tick => {
                if self.is_fetching {
                    self.spinner.tick();
                }
            }
            Msg::Resize(..) => {}
        }
        Vec::new()
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Vec<Effect> {
        self.refresh_props();
        if self.view_state() != ViewState::Ready {
            return Vec::new();
        }
        if !self.props.sub_header {
            return self.handle_grid_key(key);
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('e') {
            return self.export_effect();
        }
        match key.code {
            KeyCode::Tab => {
                self.cycle_focus(true);
                return Vec::new();
            }
            KeyCode::BackTab => {
                self.cycle_focus(false);
                return Vec::new();
            }
            _ => {}
        }
        if self.search.focus.get() {
            return self.handle_search_key(key);
        }
        if key.code == KeyCode::Char('/') {
            self.focus_search();
            return Vec::new();
        }
        if let KeyCode::Char(c) = key.code
            && !ctrl
            && let Some(effect) = self.action_effect(c)
        {
            return vec![effect];
        }
        self.handle_grid_key(key)
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Vec<Effect> {
        self.refresh_props();
        if self.view_state() != ViewState::Ready {
            return Vec::new();
        }
        let position = Position {
            x: mouse.column,
            y: mouse.row,
        };
        if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            if self.search_area.contains(position) {
                self.focus_search();
                return Vec::new();
            }
            if self.grid_area.contains(position) {
                self.focus_grid();
            }
        }
        let rows = filter_rows(&self.data, self.filter.filter_text());
        let view = GridView {
            props: &self.props,
            rows: &rows,
            columns: &self.columns,
            theme: &*self.theme,
        };
        self.grid.handle_mouse_events(&view, mouse)
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect) {
        self.refresh_props();
        let theme = Arc::clone(&self.theme);
        let theme: &dyn Theme = &*theme;
        frame.render_widget(Block::default().style(th::panel_style(theme)), rect);
        match self.view_state() {
            ViewState::Loading => self.spinner.render(frame, rect, theme),
            ViewState::Error => {
                let notice = Paragraph::new(ERROR_NOTICE)
                    .alignment(Alignment::Center)
                    .style(theme.status_error());
                frame.render_widget(notice, centered_rect(60, 20, rect));
            }
            ViewState::Ready => self.render_ready(frame, rect, theme),
        }
    }

    fn get_hint_spans(&self) -> Vec<Span<'_>> {
        let theme = &*self.theme;
        if self.view_state() != ViewState::Ready {
            return th::build_hint_spans(theme, &[("Ctrl+C", " quit")]);
        }
        if self.search.focus.get() {
            return th::build_hint_spans(
                theme,
                &[("Esc", " clear  "), ("Enter", " done  "), ("Tab", " focus  "), ("Ctrl+E", " export")],
            );
        }
        let mut hints = Vec::with_capacity(8);
        if self.props.sub_header {
            hints.push(("/", " filter  "));
        }
        hints.extend([("1-9", " sort  "), ("←/→", " page  ")]);
        if self.props.pagination {
            hints.push(("r", " rows/page  "));
        }
        if self.props.selectable_rows {
            hints.push(("Space", " select  "));
        }
        if self.props.expandable_rows {
            hints.push(("Enter", " expand  "));
        }
        if self.props.sub_header {
            hints.push(("e", " export  "));
        }
        hints.push(("Ctrl+C", " quit"));
        th::build_hint_spans(theme, &hints)
    }
}
