use std::fmt::Debug;

use ratatui::style::{Color, Modifier, Style};

/// Semantic color roles used by the data table and its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeRoles {
    pub background: Color,
    /// Background of the grid's column header row.
    pub surface: Color,
    pub border: Color,
    pub divider: Color,

    pub text: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    pub accent: Color,
    pub focus: Color,
    pub error: Color,

    /// Banner shown while rows are selected.
    pub context_bg: Color,
    pub context_fg: Color,

    pub button: Color,
    pub button_hover: Color,
    pub button_focus: Color,
    pub button_disabled: Color,

    /// Header cell of the column the grid is sorted by.
    pub sort_focus: Color,

    pub hover_bg: Color,
    pub hover_fg: Color,

    pub striped_bg: Color,
    pub striped_fg: Color,

    pub selection_bg: Color,
    pub selection_fg: Color,

    pub scrollbar_track: Color,
    pub scrollbar_thumb: Color,
}

/// Theme trait exposes semantic roles and common style builders.
pub trait Theme: Send + Sync + Debug {
    fn roles(&self) -> &ThemeRoles;

    fn text_primary_style(&self) -> Style {
        Style::default().fg(self.roles().text)
    }
    fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.roles().text_secondary)
    }
    fn text_muted_style(&self) -> Style {
        Style::default().fg(self.roles().text_muted)
    }

    fn border_style(&self, focused: bool) -> Style {
        let color = if focused { self.roles().focus } else { self.roles().border };
        Style::default().fg(color)
    }

    fn selection_style(&self) -> Style {
        Style::default().fg(self.roles().selection_fg).bg(self.roles().selection_bg)
    }

    fn hover_style(&self) -> Style {
        Style::default().fg(self.roles().hover_fg).bg(self.roles().hover_bg)
    }

    fn context_style(&self) -> Style {
        Style::default().fg(self.roles().context_fg).bg(self.roles().context_bg)
    }

    fn status_error(&self) -> Style {
        Style::default().fg(self.roles().error)
    }

    fn accent_style(&self) -> Style {
        Style::default().fg(self.roles().accent)
    }
    fn accent_emphasis_style(&self) -> Style {
        Style::default().fg(self.roles().accent).add_modifier(Modifier::BOLD)
    }
}
