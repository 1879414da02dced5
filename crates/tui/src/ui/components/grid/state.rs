use std::ops::Range;

use gridview_types::{ColumnDescriptor, Row};
use indexmap::IndexMap;
use ratatui::widgets::TableState;
use serde_json::Value;

use super::props::GridProps;
use super::sort::{SortSpec, sort_rows};

/// Identity of a row under `key_field`.
///
/// The key value is kept in its JSON form, so `1` and `"1"` are distinct
/// rows. Rows without the key field are identified by the whole serialized
/// row.
pub fn row_key(row: &Row, key_field: &str) -> String {
    match row.get(key_field) {
        Some(Value::Null) | None => serde_json::to_string(row).unwrap_or_default(),
        Some(key) => key.to_string(),
    }
}

/// Sort, paging, selection and expansion state owned by the grid engine.
#[derive(Debug, Default)]
pub struct GridState {
    page: usize,
    per_page: Option<usize>,
    sort: Option<SortSpec>,
    sort_initialized: bool,
    last_reset_signal: Option<bool>,
    selected: IndexMap<String, Row>,
    expanded_key: Option<String>,
    /// Cursor row, relative to the current page.
    cursor: usize,
    pub table_state: TableState,
    pub mouse_over_idx: Option<usize>,
}

impl GridState {
    // Selectors
    pub fn page(&self) -> usize {
        self.page
    }
    pub fn cursor(&self) -> usize {
        self.cursor
    }
    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }
    pub fn selected_rows(&self) -> Vec<Row> {
        self.selected.values().cloned().collect()
    }
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }
    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.contains_key(key)
    }
    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded_key.as_deref() == Some(key)
    }

    pub fn per_page(&self, props: &GridProps) -> usize {
        self.per_page.unwrap_or(props.pagination_per_page).max(1)
    }

    pub fn page_count(&self, props: &GridProps, total_rows: usize) -> usize {
        if !props.pagination {
            return 1;
        }
        total_rows.div_ceil(self.per_page(props)).max(1)
    }

    /// Index range of the current page inside the arranged rows.
    pub fn page_bounds(&self, props: &GridProps, total_rows: usize) -> Range<usize> {
        if !props.pagination {
            return 0..total_rows;
        }
        let per_page = self.per_page(props);
        let start = (self.page * per_page).min(total_rows);
        let end = (start + per_page).min(total_rows);
        start..end
    }

    /// Reconciles state with the latest props before handling input or rendering.
    ///
    /// A change of `pagination_reset_default_page` since the previous sync
    /// sends the grid back to its first page.
    pub fn sync(&mut self, props: &GridProps, columns: &[ColumnDescriptor], total_rows: usize) {
        let signal = props.pagination_reset_default_page;
        if self.last_reset_signal.is_some_and(|last| last != signal) {
            self.first_page();
        }
        self.last_reset_signal = Some(signal);

        if !self.sort_initialized {
            self.sort_initialized = true;
            let index = props.default_sort_field_id.saturating_sub(1);
            if columns.get(index).is_some_and(|column| column.sortable) {
                self.sort = Some(SortSpec {
                    column: index,
                    ascending: props.default_sort_asc,
                });
            }
        }
        if self.sort.is_some_and(|sort| sort.column >= columns.len()) {
            self.sort = None;
        }

        let last_page = self.page_count(props, total_rows) - 1;
        if self.page > last_page {
            self.page = last_page;
        }
        let page_len = self.page_bounds(props, total_rows).len();
        self.cursor = self.cursor.min(page_len.saturating_sub(1));
    }

    /// Applies the active sort to `rows` (already filtered by the caller).
    pub fn arrange<'a>(&self, rows: &[&'a Row], columns: &[ColumnDescriptor]) -> Vec<&'a Row> {
        let mut arranged = rows.to_vec();
        if let Some(sort) = self.sort
            && let Some(column) = columns.get(sort.column)
        {
            sort_rows(&mut arranged, column, sort.ascending);
        }
        arranged
    }

    // Reducers
    pub fn next_page(&mut self, props: &GridProps, total_rows: usize) {
        if self.page + 1 < self.page_count(props, total_rows) {
            self.page += 1;
            self.cursor = 0;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
            self.cursor = 0;
        }
    }

    pub fn first_page(&mut self) {
        self.page = 0;
        self.cursor = 0;
    }

    pub fn last_page(&mut self, props: &GridProps, total_rows: usize) {
        self.page = self.page_count(props, total_rows) - 1;
        self.cursor = 0;
    }

    /// Moves to the next page-size option, wrapping around, and returns to the first page.
    pub fn cycle_per_page(&mut self, props: &GridProps) {
        let options = &props.pagination_rows_per_page_options;
        if options.is_empty() {
            return;
        }
        let current = self.per_page(props);
        let next = options
            .iter()
            .position(|option| *option == current)
            .map(|index| options[(index + 1) % options.len()])
            .unwrap_or(options[0]);
        self.per_page = Some(next);
        self.first_page();
    }

    /// Sorts by `column`, toggling direction when it is already the sort column.
    ///
    /// Returns `false` for unknown or unsortable columns.
    pub fn sort_by_column(&mut self, column: usize, columns: &[ColumnDescriptor]) -> bool {
        if !columns.get(column).is_some_and(|descriptor| descriptor.sortable) {
            return false;
        }
        self.sort = match self.sort {
            Some(sort) if sort.column == column => Some(SortSpec {
                column,
                ascending: !sort.ascending,
            }),
            _ => Some(SortSpec { column, ascending: true }),
        };
        self.first_page();
        true
    }

    pub fn move_cursor(&mut self, delta: isize, page_len: usize) {
        if page_len == 0 {
            self.cursor = 0;
            return;
        }
        let max = page_len - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
    }

    pub fn set_cursor(&mut self, cursor: usize, page_len: usize) {
        self.cursor = cursor.min(page_len.saturating_sub(1));
    }

    /// Selects or deselects `row`. Returns whether it is now selected.
    pub fn toggle_selection(&mut self, row: &Row, key_field: &str) -> bool {
        let key = row_key(row, key_field);
        if self.selected.shift_remove(&key).is_some() {
            return false;
        }
        self.selected.insert(key, row.clone());
        true
    }

    pub fn toggle_expanded(&mut self, row: &Row, key_field: &str) {
        let key = row_key(row, key_field);
        if self.expanded_key.as_deref() == Some(key.as_str()) {
            self.expanded_key = None;
        } else {
            self.expanded_key = Some(key);
        }
    }
}
