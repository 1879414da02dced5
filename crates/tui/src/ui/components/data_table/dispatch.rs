use gridview_types::LoadError;

pub const ERROR_NOTICE: &str = "Error loading data";

/// The three mutually exclusive views of the data table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Only the loading indicator is drawn.
    Loading,
    /// Only the static error notice is drawn.
    Error,
    /// Header plus grid.
    Ready,
}

impl ViewState {
    /// Picks the view in priority order: fetching, then error, then data.
    pub fn dispatch(is_fetching: bool, error: Option<&LoadError>) -> Self {
        if is_fetching {
            ViewState::Loading
        } else if error.is_some() {
            ViewState::Error
        } else {
            ViewState::Ready
        }
    }
}
