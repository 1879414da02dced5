//! Search box on the left of the header bar.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rat_focus::FocusFlag;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::header::SearchBoxModel;
use crate::ui::{
    components::common::TextInputState,
    theme::{Theme, theme_helpers as th},
};

/// Outcome of a key handled by the search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEdit {
    /// The text changed; carries the full new text.
    Changed(String),
    /// The user asked to clear the filter.
    Cleared,
}

#[derive(Debug)]
pub struct SearchBox {
    input: TextInputState,
    pub focus: FocusFlag,
}

impl Default for SearchBox {
    fn default() -> Self {
        Self {
            input: TextInputState::new(),
            focus: FocusFlag::named("gridview.header.search"),
        }
    }
}

impl SearchBox {
    pub fn text(&self) -> &str {
        self.input.input()
    }

    /// Brings the buffer in line with the committed filter text.
    pub fn sync(&mut self, model: &SearchBoxModel) {
        if self.input.input() != model.text {
            self.input.set_input(model.text.clone());
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SearchEdit> {
        match key.code {
            KeyCode::Esc => {
                self.input.clear();
                Some(SearchEdit::Cleared)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.clear();
                Some(SearchEdit::Changed(String::new()))
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.insert_char(c);
                Some(SearchEdit::Changed(self.input.input().to_string()))
            }
            KeyCode::Backspace => self
                .input
                .backspace()
                .then(|| SearchEdit::Changed(self.input.input().to_string())),
            KeyCode::Delete => self
                .input
                .delete()
                .then(|| SearchEdit::Changed(self.input.input().to_string())),
            KeyCode::Left => {
                self.input.move_left();
                None
            }
            KeyCode::Right => {
                self.input.move_right();
                None
            }
            KeyCode::Home => {
                self.input.move_home();
                None
            }
            KeyCode::End => {
                self.input.move_end();
                None
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, model: &SearchBoxModel, theme: &dyn Theme) {
        let focused = self.focus.get();
        let block = th::block(theme, None, focused);
        let inner = block.inner(area);
        let line = if model.text.is_empty() {
            Line::from(Span::styled(model.placeholder, theme.text_muted_style()))
        } else {
            Line::from(Span::styled(model.text.as_str(), theme.text_primary_style()))
        };
        let paragraph = Paragraph::new(line).block(block).style(th::input_style(theme, focused));
        frame.render_widget(paragraph, area);

        if focused && inner.width > 0 {
            let column = u16::try_from(self.input.cursor_column()).unwrap_or(u16::MAX);
            let x = inner.x.saturating_add(column).min(inner.right().saturating_sub(1));
            frame.set_cursor_position(Position { x, y: inner.y });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_reports_full_text() {
        let mut search = SearchBox::default();
        assert_eq!(search.handle_key(key(KeyCode::Char('b'))), Some(SearchEdit::Changed("b".into())));
        assert_eq!(search.handle_key(key(KeyCode::Char('a'))), Some(SearchEdit::Changed("ba".into())));
        assert_eq!(search.handle_key(key(KeyCode::Backspace)), Some(SearchEdit::Changed("b".into())));
        assert_eq!(search.handle_key(key(KeyCode::Left)), None);
        assert_eq!(search.handle_key(key(KeyCode::Delete)), Some(SearchEdit::Changed(String::new())));
        assert_eq!(search.handle_key(key(KeyCode::Backspace)), None);
    }

    #[test]
    fn escape_clears_buffer() {
        let mut search = SearchBox::default();
        search.handle_key(key(KeyCode::Char('x')));
        assert_eq!(search.handle_key(key(KeyCode::Esc)), Some(SearchEdit::Cleared));
        assert_eq!(search.text(), "");
    }

    #[test]
    fn sync_adopts_committed_text() {
        let mut search = SearchBox::default();
        search.sync(&SearchBoxModel {
            text: "apple".into(),
            placeholder: "Filter",
        });
        assert_eq!(search.text(), "apple");
        assert_eq!(search.handle_key(key(KeyCode::Char('s'))), Some(SearchEdit::Changed("apples".into())));
    }
}
