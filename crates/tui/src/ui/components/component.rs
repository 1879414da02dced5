//! Component abstraction for the gridview TUI.
//!
//! Components own their local state, react to input and host messages, and
//! render themselves into a provided `Rect`. Anything that needs I/O is
//! reported back to the runtime as an `Effect`.

use crossterm::event::{KeyEvent, MouseEvent};
use gridview_types::{Effect, Msg};
use ratatui::{Frame, layout::Rect, text::Span};

pub trait Component {
    /// Handle a message pushed by the host (new data, fetch state, ticks).
    fn handle_message(&mut self, _msg: Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events while this component has focus.
    fn handle_key_events(&mut self, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    fn handle_mouse_events(&mut self, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Draw the component into `rect`.
    ///
    /// Rendering must not change observable state beyond layout bookkeeping
    /// (hit-test areas, scroll offsets).
    fn render(&mut self, frame: &mut Frame, rect: Rect);

    /// Key hints for the hint bar.
    fn get_hint_spans(&self) -> Vec<Span<'_>> {
        Vec::new()
    }
}
