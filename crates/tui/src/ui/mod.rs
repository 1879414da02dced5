//! Terminal user interface for the data table.

pub mod components;
pub mod runtime;
pub mod theme;
pub mod utils;
