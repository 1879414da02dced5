//! Grid engine: sorts, paginates and renders the rows handed to it.
//!
//! The data table drives this component only through [`GridProps`] plus the
//! rows and columns it renders. Row selection is reported back as
//! `Effect::SelectedRowsChanged`.

use std::fmt;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use gridview_types::{ColumnDescriptor, Effect, Row};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    text::{Line, Span, Text},
    widgets::{Cell, Paragraph, Row as TableRow, Table, Wrap},
};

use super::{
    props::GridProps,
    state::{GridState, row_key},
};
use crate::ui::{
    theme::{Theme, theme_helpers as th},
    utils::cell_text,
};

/// Renders the detail view of an expanded row.
pub type ExpandedRowRenderer = Arc<dyn Fn(&Row) -> Text<'static> + Send + Sync>;

/// Pretty-printed JSON of the row.
pub fn default_expanded_renderer() -> ExpandedRowRenderer {
    Arc::new(|row: &Row| {
        let pretty = serde_json::to_string_pretty(row).unwrap_or_default();
        Text::from(pretty)
    })
}

const EXPANDED_MAX_HEIGHT: u16 = 10;
const SELECTION_COLUMN: &str = "[ ]";

/// Everything the engine renders in one pass.
pub struct GridView<'v, 'a> {
    pub props: &'v GridProps,
    /// Rows after filtering, before sorting.
    pub rows: &'v [&'a Row],
    pub columns: &'v [ColumnDescriptor],
    pub theme: &'v dyn Theme,
}

pub struct GridComponent {
    state: GridState,
    expanded_renderer: ExpandedRowRenderer,
    table_area: Rect,
    row_height: u16,
}

impl Default for GridComponent {
    fn default() -> Self {
        Self {
            state: GridState::default(),
            expanded_renderer: default_expanded_renderer(),
            table_area: Rect::default(),
            row_height: 1,
        }
    }
}

impl fmt::Debug for GridComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridComponent")
            .field("state", &self.state)
            .field("table_area", &self.table_area)
            .finish_non_exhaustive()
    }
}

impl GridComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expanded_renderer(mut self, renderer: ExpandedRowRenderer) -> Self {
        self.expanded_renderer = renderer;
        self
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    /// Rows of the current page, in display order.
    pub fn visible_rows<'a>(&mut self, view: &GridView<'_, 'a>) -> Vec<&'a Row> {
        self.state.sync(view.props, view.columns, view.rows.len());
        let arranged = self.state.arrange(view.rows, view.columns);
        let bounds = self.state.page_bounds(view.props, arranged.len());
        arranged[bounds].to_vec()
    }

    /// Handles keys while the grid has focus.
    pub fn handle_key_events(&mut self, view: &GridView<'_, '_>, key: KeyEvent) -> Vec<Effect> {
        let page_rows = self.visible_rows(view);
        let total = view.rows.len();
        let props = view.props;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.move_cursor(-1, page_rows.len()),
            KeyCode::Down | KeyCode::Char('j') => self.state.move_cursor(1, page_rows.len()),
            KeyCode::PageDown | KeyCode::Right => self.state.next_page(props, total),
            KeyCode::PageUp | KeyCode::Left => self.state.prev_page(),
            KeyCode::Home => self.state.first_page(),
            KeyCode::End => self.state.last_page(props, total),
            KeyCode::Char('r') if props.pagination => self.state.cycle_per_page(props),
            KeyCode::Char(digit @ '1'..='9') => {
                let visible_index = digit as usize - '1' as usize;
                if let Some(column) = visible_column_indices(view.columns).get(visible_index) {
                    self.state.sort_by_column(*column, view.columns);
                }
            }
            KeyCode::Char(' ') if props.selectable_rows => {
                if let Some(row) = page_rows.get(self.state.cursor()) {
                    self.state.toggle_selection(row, &props.key_field);
                    return vec![Effect::SelectedRowsChanged(self.state.selected_rows())];
                }
            }
            KeyCode::Enter if props.expandable_rows => {
                if let Some(row) = page_rows.get(self.state.cursor()) {
                    self.state.toggle_expanded(row, &props.key_field);
                }
            }
            _ => {}
        }
        Vec::new()
    }

    pub fn handle_mouse_events(&mut self, view: &GridView<'_, '_>, mouse: MouseEvent) -> Vec<Effect> {
        let page_rows = self.visible_rows(view);
        let position = Position {
            x: mouse.column,
            y: mouse.row,
        };
        let hit = self.hit_test(position).filter(|idx| *idx < page_rows.len());
        match mouse.kind {
            MouseEventKind::ScrollUp if self.table_area.contains(position) => self.state.move_cursor(-1, page_rows.len()),
            MouseEventKind::ScrollDown if self.table_area.contains(position) => self.state.move_cursor(1, page_rows.len()),
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(idx) = hit {
                    self.state.set_cursor(idx, page_rows.len());
                    if view.props.expandable_rows && view.props.expand_on_row_clicked {
                        self.state.toggle_expanded(page_rows[idx], &view.props.key_field);
                    }
                }
            }
            _ => {}
        }
        if mouse.kind == MouseEventKind::Moved || mouse.kind == MouseEventKind::Up(MouseButton::Left) {
            self.state.mouse_over_idx = if view.props.highlight_on_hover { hit } else { None };
        }
        Vec::new()
    }

    fn hit_test(&self, position: Position) -> Option<usize> {
        if !self.table_area.contains(position) {
            return None;
        }
        let header_bottom = self.table_area.y + 1;
        if position.y < header_bottom {
            return None;
        }
        let line = (position.y - header_bottom) / self.row_height.max(1);
        Some(line as usize + self.state.table_state.offset())
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, view: &GridView<'_, '_>, focused: bool) {
        let page_rows = self.visible_rows(view);
        let props = view.props;
        let theme = view.theme;

        let expanded_row = page_rows
            .iter()
            .copied()
            .find(|row| props.expandable_rows && self.state.is_expanded(&row_key(row, &props.key_field)));
        let expanded_text = expanded_row.map(|row| (self.expanded_renderer)(row));
        let expanded_height = expanded_text
            .as_ref()
            .map(|text| {
                u16::try_from(text.height())
                    .unwrap_or(u16::MAX)
                    .saturating_add(2)
                    .min(EXPANDED_MAX_HEIGHT)
            })
            .unwrap_or(0);
        let context_height = u16::from(props.selectable_rows && self.state.selected_count() > 0);
        let footer_height = u16::from(props.pagination);

        let [context_area, table_area, expanded_area, footer_area] = Layout::vertical([
            Constraint::Length(context_height),
            Constraint::Min(1),
            Constraint::Length(expanded_height),
            Constraint::Length(footer_height),
        ])
        .areas(area);

        if context_height > 0 {
            let banner = Paragraph::new(format!(" {} selected", self.state.selected_count())).style(theme.context_style());
            frame.render_widget(banner, context_area);
        }

        self.table_area = table_area;
        if page_rows.is_empty() {
            let placeholder = Paragraph::new(props.no_data_message.as_str())
                .alignment(Alignment::Center)
                .style(theme.text_muted_style());
            frame.render_widget(placeholder, table_area);
        } else {
            self.render_table(frame, table_area, view, &page_rows, focused);
        }

        if let Some(text) = expanded_text {
            let detail = Paragraph::new(text)
                .block(th::block(theme, Some("Details"), false))
                .wrap(Wrap { trim: false })
                .style(theme.text_secondary_style());
            frame.render_widget(detail, expanded_area);
        }

        if props.pagination {
            frame.render_widget(self.footer(view), footer_area);
        }
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect, view: &GridView<'_, '_>, page_rows: &[&Row], focused: bool) {
        let props = view.props;
        let theme = view.theme;
        let visible = visible_column_indices(view.columns);
        let show_selection = props.selectable_rows;
        let show_expander = props.expandable_rows && !props.expandable_rows_hide_expander;
        let sort = self.state.sort();

        let mut widths = Vec::with_capacity(visible.len() + 2);
        let mut header_cells = Vec::with_capacity(visible.len() + 2);
        if show_selection {
            widths.push(Constraint::Length(SELECTION_COLUMN.len() as u16));
            header_cells.push(Cell::from(""));
        }
        if show_expander {
            widths.push(Constraint::Length(1));
            header_cells.push(Cell::from(""));
        }
        for index in &visible {
            let column = &view.columns[*index];
            widths.push(match (props.responsive, column.width) {
                (true, _) => Constraint::Fill(1),
                (false, Some(width)) => Constraint::Length(width),
                (false, None) => Constraint::Length(16),
            });
            let sorted = sort.filter(|sort| sort.column == *index);
            let cell = match sorted {
                Some(sort) => {
                    let arrow = if sort.ascending { " ▲" } else { " ▼" };
                    Cell::from(format!("{}{}", column.name, arrow)).style(th::table_sorted_header_style(theme))
                }
                None => Cell::from(column.name.clone()),
            };
            header_cells.push(cell);
        }

        self.row_height = if props.dense { 1 } else { 2 };
        let mouse_over = self.state.mouse_over_idx;
        let rows: Vec<TableRow> = page_rows
            .iter()
            .enumerate()
            .map(|(position, row)| {
                let key = row_key(row, &props.key_field);
                let mut cells = Vec::with_capacity(widths.len());
                if show_selection {
                    let mark = if self.state.is_selected(&key) { "[x]" } else { SELECTION_COLUMN };
                    cells.push(Cell::from(mark));
                }
                if show_expander {
                    cells.push(Cell::from(if self.state.is_expanded(&key) { "▾" } else { "▸" }));
                }
                for index in &visible {
                    cells.push(Cell::from(cell_text(view.columns[*index].value_in(row))));
                }
                let style = if props.highlight_on_hover && mouse_over == Some(position) {
                    theme.hover_style()
                } else {
                    th::table_row_style(theme, position, props.striped)
                };
                TableRow::new(cells).style(style).bottom_margin(self.row_height - 1)
            })
            .collect();

        let table = Table::new(rows, widths)
            .header(TableRow::new(header_cells).style(th::table_header_row_style(theme)))
            .column_spacing(1)
            .row_highlight_style(if focused {
                th::table_selected_style(theme)
            } else {
                ratatui::style::Style::default()
            })
            .style(th::panel_style(theme));

        self.state.table_state.select(Some(self.state.cursor()));
        frame.render_stateful_widget(table, area, &mut self.state.table_state);
    }

    fn footer(&self, view: &GridView<'_, '_>) -> Paragraph<'static> {
        let props = view.props;
        let theme = view.theme;
        let total = view.rows.len();
        let bounds = self.state.page_bounds(props, total);
        let range = if total == 0 {
            "0 of 0".to_string()
        } else {
            format!("{}-{} of {}", bounds.start + 1, bounds.end, total)
        };
        let page = format!(
            "‹ {}/{} ›",
            self.state.page() + 1,
            self.state.page_count(props, total)
        );
        let line = Line::from(vec![
            Span::styled("Rows per page: ", theme.text_muted_style()),
            Span::styled(self.state.per_page(props).to_string(), theme.text_primary_style()),
            Span::styled("   ", theme.text_muted_style()),
            Span::styled(range, theme.text_primary_style()),
            Span::styled("   ", theme.text_muted_style()),
            Span::styled(page, theme.accent_style()),
        ]);
        Paragraph::new(line).alignment(Alignment::Right).style(th::panel_style(theme))
    }
}

/// Indices of columns that are not omitted.
pub fn visible_column_indices(columns: &[ColumnDescriptor]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .filter(|(_, column)| !column.omit)
        .map(|(index, _)| index)
        .collect()
}
