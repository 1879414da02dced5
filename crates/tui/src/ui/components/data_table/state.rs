/// Filter text plus the pagination reset signal.
///
/// The reset toggle has no meaning in its value, only in its transitions:
/// the grid engine returns to its first page whenever it flips.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterState {
    filter_text: String,
    reset_toggle: bool,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    // Selectors
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }
    pub fn reset_toggle(&self) -> bool {
        self.reset_toggle
    }
    pub fn is_filtering(&self) -> bool {
        !self.filter_text.is_empty()
    }

    // Reducers
    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
    }

    /// Empties a non-empty filter and flips the reset toggle.
    ///
    /// Returns `false` (and leaves the toggle alone) when the filter was
    /// already empty.
    pub fn clear(&mut self) -> bool {
        if self.filter_text.is_empty() {
            return false;
        }
        self.filter_text.clear();
        self.reset_toggle = !self.reset_toggle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_on_empty_filter_keeps_toggle() {
        let mut state = FilterState::new();
        assert!(!state.clear());
        assert!(!state.reset_toggle());
        assert_eq!(state.filter_text(), "");
    }

    #[test]
    fn clear_on_text_flips_toggle_once() {
        let mut state = FilterState::new();
        state.set_filter("ban");
        assert!(state.is_filtering());
        assert!(state.clear());
        assert_eq!(state.filter_text(), "");
        assert!(state.reset_toggle());
        assert!(!state.clear());
        assert!(state.reset_toggle());

        state.set_filter("x");
        state.clear();
        assert!(!state.reset_toggle());
    }

    #[test]
    fn set_filter_replaces_text_without_touching_toggle() {
        let mut state = FilterState::new();
        state.set_filter("abc");
        state.set_filter("");
        state.set_filter("Zed");
        assert_eq!(state.filter_text(), "Zed");
        assert!(!state.reset_toggle());
    }
}
