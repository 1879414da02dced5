use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers.
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { background, text, .. } = *theme.roles();
    Style::default().bg(background).fg(text)
}

/// Background style for the entire column header row.
pub fn table_header_row_style<T: Theme + ?Sized>(theme: &T) -> Style {
    Style::default()
        .bg(theme.roles().surface)
        .fg(theme.roles().text_secondary)
        .add_modifier(Modifier::BOLD)
}

/// Header cell of the sorted column.
pub fn table_sorted_header_style<T: Theme + ?Sized>(theme: &T) -> Style {
    table_header_row_style(theme).bg(theme.roles().sort_focus).fg(theme.roles().text)
}

/// Row style for a given row index. Odd rows use the striped colors when
/// striping is enabled.
pub fn table_row_style<T: Theme + ?Sized>(theme: &T, row_index: usize, striped: bool) -> Style {
    let ThemeRoles {
        background,
        text,
        striped_bg,
        striped_fg,
        ..
    } = *theme.roles();
    if striped && row_index % 2 == 1 {
        Style::default().bg(striped_bg).fg(striped_fg)
    } else {
        Style::default().bg(background).fg(text)
    }
}

/// Style for the cursor row while the grid has focus.
pub fn table_selected_style<T: Theme + ?Sized>(theme: &T) -> Style {
    theme.selection_style().add_modifier(Modifier::BOLD)
}

/// Style for the text input; the caller sets the block border based on focus.
pub fn input_style<T: Theme + ?Sized>(theme: &T, focused: bool) -> Style {
    let style = panel_style(theme);
    if focused { style.add_modifier(Modifier::BOLD) } else { style }
}

/// Header action button.
pub fn button_style<T: Theme + ?Sized>(theme: &T, enabled: bool, focused: bool) -> Style {
    let ThemeRoles {
        button,
        button_focus,
        button_disabled,
        text,
        text_muted,
        background,
        ..
    } = *theme.roles();
    match (enabled, focused) {
        (false, _) => Style::default().bg(button_disabled).fg(text_muted),
        (true, true) => Style::default().bg(button_focus).fg(background).add_modifier(Modifier::BOLD),
        (true, false) => Style::default().bg(button).fg(text),
    }
}

/// Builds `key label` hint pairs, e.g. `Esc clear  Tab focus`.
pub fn build_hint_spans<'a, T: Theme + ?Sized>(theme: &T, hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, label) in hints {
        spans.push(Span::styled(*key, theme.accent_emphasis_style()));
        spans.push(Span::styled(*label, theme.text_muted_style()));
    }
    spans
}
