//! Shared types for the gridview data table.
//!
//! These types describe the data flowing into the table (rows, column
//! descriptors, options), the effects the table reports back to its host,
//! and the contract consumed by report exporters.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub mod options;

pub use options::{ActionSpec, TableOptions};

/// A single record displayed by the table.
///
/// The shape is owned by the caller. Field order is preserved so the
/// serialized form matches what the caller supplied.
pub type Row = Map<String, Value>;

/// Describes one column of the grid.
///
/// The data table never interprets descriptors; they are forwarded to the
/// grid engine and to report exporters unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Header text.
    pub name: String,
    /// Dotted path of the field to display (e.g. `owner.email`).
    #[serde(default)]
    pub selector: Option<String>,
    #[serde(default = "default_sortable")]
    pub sortable: bool,
    /// Fixed width in cells, used when the grid is not responsive.
    #[serde(default)]
    pub width: Option<u16>,
    /// Hide the column from the grid while keeping it in exports.
    #[serde(default)]
    pub omit: bool,
    /// Engine-specific keys that have no typed counterpart.
    #[serde(default, flatten)]
    pub extra: Map<String, Value>,
}

fn default_sortable() -> bool {
    true
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selector: None,
            sortable: true,
            width: None,
            omit: false,
            extra: Map::new(),
        }
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Field path used to pull this column's value out of a row.
    pub fn field(&self) -> &str {
        self.selector.as_deref().unwrap_or(&self.name)
    }

    /// Resolves this column's value inside `row`, following dotted paths.
    pub fn value_in<'a>(&self, row: &'a Row) -> Option<&'a Value> {
        let field = self.field();
        if let Some(value) = row.get(field) {
            return Some(value);
        }
        let mut segments = field.split('.');
        let mut current = row.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }
}

/// Paper size requested from the report exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaperSize {
    #[default]
    A4,
}

impl PaperSize {
    /// Printable lines per page at a 10pt monospace layout.
    pub fn lines_per_page(self) -> usize {
        match self {
            PaperSize::A4 => 66,
        }
    }
}

/// Everything an exporter needs to produce a report artifact.
///
/// `rows` is always the complete, unfiltered data set handed to the table.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub rows: Arc<[Row]>,
    pub columns: Arc<[ColumnDescriptor]>,
    pub paper_size: PaperSize,
    pub report_name: String,
}

impl PartialEq for ExportRequest {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.rows, &other.rows)
            && Arc::ptr_eq(&self.columns, &other.columns)
            && self.paper_size == other.paper_size
            && self.report_name == other.report_name
    }
}

/// Error raised by a report exporter.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("report name `{0}` does not produce a usable file name")]
    InvalidReportName(String),
}

/// Produces a downloadable artifact from an [`ExportRequest`].
pub trait ReportExporter {
    /// Writes the report and returns where it was written.
    fn export(&self, request: &ExportRequest) -> Result<PathBuf, ExportError>;
}

/// Error indicator supplied by the caller when loading data failed.
///
/// The table only checks for its presence; the message is kept for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LoadError {
    pub message: String,
}

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Side effects requested by the table.
///
/// Components never perform I/O themselves; the runtime executes these.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// The export action was triggered.
    ExportRequested(ExportRequest),
    /// A caller-supplied header action was triggered, identified by its id.
    ActionTriggered(String),
    /// The set of selected rows changed.
    SelectedRowsChanged(Vec<Row>),
}

/// Messages pushed into the table by its host.
#[derive(Debug, Clone)]
pub enum Msg {
    FetchStarted,
    DataLoaded(Vec<Row>),
    FetchFailed(LoadError),
    ColumnsChanged(Vec<ColumnDescriptor>),
    Tick,
    Resize(u16, u16),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn column_descriptor_defaults() {
        let column: ColumnDescriptor = serde_json::from_str(r#"{"name":"name"}"#).expect("deserialize");
        assert_eq!(column.field(), "name");
        assert!(column.sortable);
        assert!(!column.omit);
        assert!(column.width.is_none());
        assert!(column.extra.is_empty());
    }

    #[test]
    fn column_descriptor_keeps_unknown_keys() {
        let column: ColumnDescriptor =
            serde_json::from_str(r#"{"name":"Owner","selector":"owner.email","exportSelector":"owner"}"#).expect("deserialize");
        assert_eq!(column.field(), "owner.email");
        assert_eq!(column.extra.get("exportSelector"), Some(&json!("owner")));
    }

    #[test]
    fn value_in_follows_dotted_paths() {
        let column = ColumnDescriptor::new("Owner").with_selector("owner.email");
        let data = row(json!({"owner": {"email": "a@b.c"}}));
        assert_eq!(column.value_in(&data), Some(&json!("a@b.c")));

        let missing = row(json!({"owner": "nobody"}));
        assert_eq!(column.value_in(&missing), None);
    }

    #[test]
    fn value_in_prefers_literal_keys_with_dots() {
        let column = ColumnDescriptor::new("v").with_selector("a.b");
        let data = row(json!({"a.b": 1, "a": {"b": 2}}));
        assert_eq!(column.value_in(&data), Some(&json!(1)));
    }

    #[test]
    fn export_requests_compare_by_identity() {
        let rows: Arc<[Row]> = Arc::from(vec![row(json!({"id": 1}))]);
        let columns: Arc<[ColumnDescriptor]> = Arc::from(vec![ColumnDescriptor::new("id")]);
        let first = ExportRequest {
            rows: rows.clone(),
            columns: columns.clone(),
            paper_size: PaperSize::A4,
            report_name: "Report".into(),
        };
        let same = first.clone();
        let copied = ExportRequest {
            rows: Arc::from(rows.to_vec()),
            ..first.clone()
        };
        assert_eq!(first, same);
        assert_ne!(first, copied);
    }

    #[test]
    fn load_error_is_a_std_error() {
        let error = LoadError::new("rows.json must contain a list of objects");
        assert_eq!(error.to_string(), "rows.json must contain a list of objects");
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(error);
        assert!(boxed.source().is_none());
    }
}
