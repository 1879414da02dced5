//! UI components: the data table and the grid engine it drives.

pub mod common;
pub mod component;
pub mod data_table;
pub mod grid;
pub mod spinner;

pub use component::Component;
pub use data_table::DataTable;
pub use grid::GridComponent;
pub use spinner::Spinner;
