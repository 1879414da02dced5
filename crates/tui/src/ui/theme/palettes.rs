use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

// Neutral base palette (slate greys with a teal accent)
pub const SLATE_950: Color = Color::Rgb(0x11, 0x14, 0x1A);
pub const SLATE_900: Color = Color::Rgb(0x1A, 0x1E, 0x26);
pub const SLATE_800: Color = Color::Rgb(0x26, 0x2B, 0x36);
pub const SLATE_700: Color = Color::Rgb(0x37, 0x3E, 0x4C);
pub const SLATE_500: Color = Color::Rgb(0x6B, 0x74, 0x86);
pub const SLATE_300: Color = Color::Rgb(0xB4, 0xBC, 0xC9);
pub const SLATE_100: Color = Color::Rgb(0xE9, 0xEC, 0xF1);
pub const TEAL: Color = Color::Rgb(0x4F, 0xC1, 0xB4);
pub const RED: Color = Color::Rgb(0xE5, 0x5B, 0x5B);

// CyberDrain brand colors
pub const CD_NAVY: Color = Color::Rgb(0x0F, 0x1C, 0x2E);
pub const CD_NAVY_LIGHT: Color = Color::Rgb(0x1B, 0x2C, 0x44);
pub const CD_NAVY_STRIPE: Color = Color::Rgb(0x15, 0x24, 0x39);
pub const CD_ORANGE: Color = Color::Rgb(0xF7, 0x7F, 0x00);
pub const CD_ORANGE_DARK: Color = Color::Rgb(0xC4, 0x65, 0x00);
pub const CD_SKY: Color = Color::Rgb(0x7F, 0xB8, 0xE6);
pub const CD_TEXT: Color = Color::Rgb(0xF2, 0xF4, 0xF7);
pub const CD_TEXT_DIM: Color = Color::Rgb(0x9D, 0xAB, 0xBE);

/// A named theme held by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub name: String,
    roles: ThemeRoles,
}

impl Palette {
    pub fn new(name: impl Into<String>, roles: ThemeRoles) -> Self {
        Self {
            name: name.into(),
            roles,
        }
    }
}

impl Theme for Palette {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}

pub fn default_roles() -> ThemeRoles {
    ThemeRoles {
        background: SLATE_900,
        surface: SLATE_800,
        border: SLATE_700,
        divider: SLATE_700,

        text: SLATE_100,
        text_secondary: SLATE_300,
        text_muted: SLATE_500,

        accent: TEAL,
        focus: TEAL,
        error: RED,

        context_bg: TEAL,
        context_fg: SLATE_950,

        button: SLATE_800,
        button_hover: SLATE_700,
        button_focus: TEAL,
        button_disabled: SLATE_900,

        sort_focus: SLATE_700,

        hover_bg: SLATE_700,
        hover_fg: SLATE_100,

        striped_bg: SLATE_950,
        striped_fg: SLATE_100,

        selection_bg: SLATE_700,
        selection_fg: SLATE_100,

        scrollbar_track: SLATE_800,
        scrollbar_thumb: SLATE_500,
    }
}

/// Darker variant with higher contrast borders.
pub fn dark_roles() -> ThemeRoles {
    ThemeRoles {
        background: SLATE_950,
        surface: SLATE_900,
        border: SLATE_500,
        striped_bg: SLATE_900,
        ..default_roles()
    }
}

/// Partial set of role overrides applied on top of a base theme.
///
/// Fields left as `None` inherit from the base.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePatch {
    pub text_primary: Option<Color>,
    pub text_secondary: Option<Color>,
    pub background: Option<Color>,
    pub context_bg: Option<Color>,
    pub context_text: Option<Color>,
    pub divider: Option<Color>,
    pub button_default: Option<Color>,
    pub button_hover: Option<Color>,
    pub button_focus: Option<Color>,
    pub button_disabled: Option<Color>,
    pub sort_focus: Option<Color>,
    pub highlight_on_hover_bg: Option<Color>,
    pub highlight_on_hover_text: Option<Color>,
    pub striped_bg: Option<Color>,
    pub striped_text: Option<Color>,
}

impl RolePatch {
    pub fn apply(&self, base: &ThemeRoles) -> ThemeRoles {
        let mut roles = base.clone();
        let pick = |patch: Option<Color>, slot: &mut Color| {
            if let Some(color) = patch {
                *slot = color;
            }
        };
        pick(self.text_primary, &mut roles.text);
        pick(self.text_secondary, &mut roles.text_secondary);
        pick(self.background, &mut roles.background);
        pick(self.context_bg, &mut roles.context_bg);
        pick(self.context_text, &mut roles.context_fg);
        pick(self.divider, &mut roles.divider);
        pick(self.button_default, &mut roles.button);
        pick(self.button_hover, &mut roles.button_hover);
        pick(self.button_focus, &mut roles.button_focus);
        pick(self.button_disabled, &mut roles.button_disabled);
        pick(self.sort_focus, &mut roles.sort_focus);
        pick(self.highlight_on_hover_bg, &mut roles.hover_bg);
        pick(self.highlight_on_hover_text, &mut roles.hover_fg);
        pick(self.striped_bg, &mut roles.striped_bg);
        pick(self.striped_text, &mut roles.striped_fg);
        roles
    }
}

/// Overrides that turn the `default` theme into `cyberdrain`.
pub fn cyberdrain_patch() -> RolePatch {
    RolePatch {
        text_primary: Some(CD_TEXT),
        text_secondary: Some(CD_TEXT_DIM),
        background: Some(CD_NAVY),
        context_bg: Some(CD_ORANGE),
        context_text: Some(CD_NAVY),
        divider: Some(CD_NAVY_LIGHT),
        button_default: Some(CD_NAVY_LIGHT),
        button_hover: Some(CD_ORANGE_DARK),
        button_focus: Some(CD_ORANGE),
        button_disabled: Some(CD_NAVY),
        sort_focus: Some(CD_ORANGE_DARK),
        highlight_on_hover_bg: Some(CD_NAVY_LIGHT),
        highlight_on_hover_text: Some(CD_SKY),
        striped_bg: Some(CD_NAVY_STRIPE),
        striped_text: Some(CD_TEXT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_keeps_base() {
        let base = default_roles();
        assert_eq!(RolePatch::default().apply(&base), base);
    }

    #[test]
    fn patch_overrides_only_named_roles() {
        let base = default_roles();
        let patched = cyberdrain_patch().apply(&base);
        assert_eq!(patched.text, CD_TEXT);
        assert_eq!(patched.hover_fg, CD_SKY);
        assert_eq!(patched.striped_bg, CD_NAVY_STRIPE);
        assert_eq!(patched.border, base.border);
        assert_eq!(patched.error, base.error);
    }
}
