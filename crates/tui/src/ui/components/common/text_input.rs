//! UTF-8 safe single-line text buffer with a cursor.
//!
//! Backs the search box above the grid. Cursor positions are byte indices
//! that always sit on a char boundary.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInputState {
    input: String,
    cursor: usize,
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces the buffer and moves the cursor to the end.
    pub fn set_input<S: Into<String>>(&mut self, s: S) {
        self.input = s.into();
        self.cursor = self.input.len();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    /// Number of chars before the cursor, used to place the terminal caret.
    pub fn cursor_column(&self) -> usize {
        self.input[..self.cursor].chars().count()
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.input[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input.len();
    }

    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Deletes the char before the cursor. Returns `false` at the start of the buffer.
    pub fn backspace(&mut self) -> bool {
        let Some(prev) = self.input[..self.cursor].chars().next_back() else {
            return false;
        };
        let start = self.cursor - prev.len_utf8();
        self.input.drain(start..self.cursor);
        self.cursor = start;
        true
    }

    /// Deletes the char under the cursor. Returns `false` at the end of the buffer.
    pub fn delete(&mut self) -> bool {
        let Some(next) = self.input[self.cursor..].chars().next() else {
            return false;
        };
        self.input.drain(self.cursor..self.cursor + next.len_utf8());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_move_insert_backspace() {
        let mut state = TextInputState::new();
        state.set_input("h\u{1F642}llo");
        state.move_home();
        state.move_right();
        state.insert_char('e');
        assert_eq!(state.input(), "he\u{1F642}llo");
        state.move_right();
        assert!(state.backspace());
        assert_eq!(state.input(), "hello");
        state.move_left();
        assert!(state.backspace());
        assert_eq!(state.input(), "ello");
        assert_eq!(state.cursor_column(), 0);
        assert!(!state.backspace());
    }

    #[test]
    fn delete_and_clear() {
        let mut state = TextInputState::new();
        state.set_input("abc");
        assert_eq!(state.cursor_column(), 3);
        assert!(!state.delete());
        state.move_home();
        assert!(state.delete());
        assert_eq!(state.input(), "bc");
        state.clear();
        assert_eq!(state.input(), "");
        assert_eq!(state.cursor(), 0);
    }
}
