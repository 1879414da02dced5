//! # Gridview TUI Library
//!
//! A searchable, exportable, themed data table for the terminal, built on
//! Ratatui.
//!
//! ## Key Features
//!
//! - Free-text filter over every field of every row
//! - Export of the complete, unfiltered data set through a pluggable exporter
//! - Sortable, paginated grid with optional row selection and expansion
//! - Named themes, including the derived `cyberdrain` palette
//!
//! ## Architecture
//!
//! The [`DataTable`] component owns the filter text and the pagination reset
//! toggle, memoizes its header, and hands the filtered rows to the grid
//! engine. It reports side effects (export, header actions, selection) as
//! `Effect`s; the runtime executes them.

pub mod ui;

use anyhow::Result;
use gridview_types::{LoadError, ReportExporter, Row};

pub use ui::components::data_table::{DataTable, ERROR_NOTICE, FilterState, HeaderAction, HeaderModel, ViewState, filter_rows};
pub use ui::components::grid::{ExpandedRowRenderer, GridProps, SubHeaderAlign, default_expanded_renderer};
pub use ui::components::Component;
pub use ui::runtime::{StatusLine, draw};
pub use ui::theme::{
    CYBERDRAIN_THEME, DEFAULT_THEME, Palette, RolePatch, Theme, ThemeRoles, create_theme, ensure_cyberdrain_theme,
    resolve_or_default,
};
pub use ui::utils::{cell_text, infer_columns};

/// Runs the table in the terminal until the user quits.
///
/// The loading state is drawn first, then `loader` runs and its result is
/// fed to the table. Export requests are written through `exporter`.
///
/// # Errors
///
/// Terminal setup, drawing or teardown failures.
///
/// # Example
///
/// ```no_run
/// use gridview_tui::{DataTable, run};
/// use gridview_types::{ColumnDescriptor, ExportError, ExportRequest, ReportExporter};
/// use std::path::PathBuf;
///
/// struct Discard;
/// impl ReportExporter for Discard {
///     fn export(&self, _request: &ExportRequest) -> Result<PathBuf, ExportError> {
///         Ok(PathBuf::from("/dev/null"))
///     }
/// }
///
/// let table = DataTable::new("Users", vec![ColumnDescriptor::new("Name").with_selector("name")]);
/// run(table, || Ok(Vec::new()), &Discard)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn run<L, E>(table: DataTable, loader: L, exporter: &E) -> Result<()>
where
    L: FnOnce() -> Result<Vec<Row>, LoadError>,
    E: ReportExporter + ?Sized,
{
    ui::runtime::run_app(table, loader, exporter)
}
