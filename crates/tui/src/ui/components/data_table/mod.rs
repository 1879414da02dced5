pub mod data_table_component;
pub mod dispatch;
pub mod filter;
pub mod header;
pub mod search_box;
pub mod state;

pub use data_table_component::DataTable;
pub use dispatch::{ERROR_NOTICE, ViewState};
pub use filter::filter_rows;
pub use header::{HeaderAction, HeaderComposer, HeaderDeps, HeaderModel, build_header};
pub use state::FilterState;
