//! Props accepted by the grid engine.
//!
//! The data table assembles these from its `TableOptions`, then applies the
//! caller's pass-through map last. Recognized pass-through keys override the
//! typed fields; anything else is kept in `extra`.

use gridview_types::TableOptions;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

pub const DEFAULT_PER_PAGE: usize = 25;
pub const PER_PAGE_OPTIONS: [usize; 5] = [25, 50, 100, 200, 500];
pub const DEFAULT_NO_DATA_MESSAGE: &str = "There are no records to display";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubHeaderAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl SubHeaderAlign {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Some(SubHeaderAlign::Left),
            "center" => Some(SubHeaderAlign::Center),
            "right" => Some(SubHeaderAlign::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridProps {
    pub theme: String,
    pub sub_header: bool,
    pub sub_header_align: SubHeaderAlign,
    pub selectable_rows: bool,
    pub pagination: bool,
    /// The engine returns to its first page whenever this value changes.
    pub pagination_reset_default_page: bool,
    pub responsive: bool,
    pub dense: bool,
    pub striped: bool,
    pub highlight_on_hover: bool,
    pub expandable_rows: bool,
    pub expandable_rows_hide_expander: bool,
    pub expand_on_row_clicked: bool,
    pub key_field: String,
    pub default_sort_asc: bool,
    /// 1-based index of the column sorted on first render.
    pub default_sort_field_id: usize,
    pub pagination_per_page: usize,
    pub pagination_rows_per_page_options: Vec<usize>,
    pub no_data_message: String,
    /// Pass-through keys the engine has no typed field for.
    pub extra: IndexMap<String, Value>,
}

impl Default for GridProps {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            sub_header: false,
            sub_header_align: SubHeaderAlign::Left,
            selectable_rows: false,
            pagination: false,
            pagination_reset_default_page: false,
            responsive: true,
            dense: false,
            striped: false,
            highlight_on_hover: false,
            expandable_rows: false,
            expandable_rows_hide_expander: false,
            expand_on_row_clicked: false,
            key_field: "id".to_string(),
            default_sort_asc: true,
            default_sort_field_id: 1,
            pagination_per_page: 10,
            pagination_rows_per_page_options: vec![10, 15, 20, 25, 30],
            no_data_message: DEFAULT_NO_DATA_MESSAGE.to_string(),
            extra: IndexMap::new(),
        }
    }
}

impl GridProps {
    /// Props the data table hands to the engine in its ready state.
    pub fn for_table(options: &TableOptions, reset_toggle: bool) -> Self {
        let mut props = Self {
            theme: options.theme.clone(),
            sub_header: options.subheader,
            sub_header_align: SubHeaderAlign::Left,
            selectable_rows: options.selectable_rows,
            pagination: options.pagination,
            pagination_reset_default_page: reset_toggle,
            responsive: options.responsive,
            dense: options.dense,
            striped: options.striped,
            highlight_on_hover: options.highlight_on_hover,
            expandable_rows: options.expandable_rows,
            expandable_rows_hide_expander: options.expandable_rows_hide_expander,
            expand_on_row_clicked: options.expand_on_row_clicked,
            key_field: options.key_field.clone(),
            default_sort_asc: true,
            default_sort_field_id: 1,
            pagination_per_page: DEFAULT_PER_PAGE,
            pagination_rows_per_page_options: PER_PAGE_OPTIONS.to_vec(),
            no_data_message: DEFAULT_NO_DATA_MESSAGE.to_string(),
            extra: IndexMap::new(),
        };
        props.apply_overrides(&options.rest);
        props
    }

    /// Applies pass-through options on top of the current values.
    ///
    /// Malformed values for recognized keys are ignored.
    pub fn apply_overrides(&mut self, overrides: &IndexMap<String, Value>) {
        for (key, value) in overrides {
            let applied = match key.as_str() {
                "paginationPerPage" => positive(value).map(|per_page| self.pagination_per_page = per_page),
                "paginationRowsPerPageOptions" => page_size_options(value).map(|options| self.pagination_rows_per_page_options = options),
                "defaultSortAsc" => value.as_bool().map(|asc| self.default_sort_asc = asc),
                "defaultSortFieldId" => positive(value).map(|id| self.default_sort_field_id = id),
                "subHeader" => value.as_bool().map(|show| self.sub_header = show),
                "subHeaderAlign" => value
                    .as_str()
                    .and_then(SubHeaderAlign::parse)
                    .map(|align| self.sub_header_align = align),
                "paginationResetDefaultPage" => value.as_bool().map(|reset| self.pagination_reset_default_page = reset),
                "noDataMessage" => value.as_str().map(|message| self.no_data_message = message.to_string()),
                _ => {
                    debug!(option = %key, "Keeping unrecognized grid option");
                    self.extra.insert(key.clone(), value.clone());
                    continue;
                }
            };
            if applied.is_none() {
                warn!(option = %key, value = %value, "Ignoring malformed grid option");
            }
        }
    }
}

fn positive(value: &Value) -> Option<usize> {
    value.as_u64().filter(|n| *n > 0).and_then(|n| usize::try_from(n).ok())
}

fn page_size_options(value: &Value) -> Option<Vec<usize>> {
    let options = value.as_array()?.iter().map(positive).collect::<Option<Vec<_>>>()?;
    if options.is_empty() { None } else { Some(options) }
}
