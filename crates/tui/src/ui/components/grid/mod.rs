pub mod grid_component;
pub mod props;
pub mod sort;
pub mod state;

pub use grid_component::{ExpandedRowRenderer, GridComponent, GridView, default_expanded_renderer};
pub use props::{DEFAULT_PER_PAGE, GridProps, PER_PAGE_OPTIONS, SubHeaderAlign};
pub use state::GridState;
