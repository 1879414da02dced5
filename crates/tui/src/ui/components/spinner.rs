use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::{theme::Theme, utils::centered_rect};

static FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Loading indicator shown while the table is fetching.
#[derive(Debug, Default, Clone)]
pub struct Spinner {
    frame: usize,
}

impl Spinner {
    /// Advances the animation by one frame.
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    pub fn current_frame(&self) -> &'static str {
        FRAMES[self.frame]
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &dyn Theme) {
        let line = Line::from(vec![
            Span::styled(self.current_frame(), theme.accent_emphasis_style()),
            Span::styled(" Loading…", theme.text_muted_style()),
        ]);
        let target = centered_rect(60, 20, area);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_wraps_around() {
        let mut spinner = Spinner::default();
        assert_eq!(spinner.current_frame(), "⠋");
        for _ in 0..FRAMES.len() {
            spinner.tick();
        }
        assert_eq!(spinner.current_frame(), "⠋");
        spinner.tick();
        assert_eq!(spinner.current_frame(), "⠙");
    }
}
