//! Process-wide registry of named themes.
//!
//! Themes are registered once per name. Registering a name that already
//! exists is a no-op, so render paths may call [`create_theme`] on every
//! frame with identical arguments.

use std::sync::{Arc, PoisonError, RwLock};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use tracing::{debug, warn};

use super::palettes::{Palette, RolePatch, cyberdrain_patch, dark_roles, default_roles};
use super::roles::Theme;

pub const DEFAULT_THEME: &str = "default";
pub const CYBERDRAIN_THEME: &str = "cyberdrain";

static REGISTRY: Lazy<RwLock<IndexMap<String, Arc<Palette>>>> = Lazy::new(|| {
    let mut themes = IndexMap::new();
    themes.insert(DEFAULT_THEME.to_string(), Arc::new(Palette::new(DEFAULT_THEME, default_roles())));
    themes.insert("dark".to_string(), Arc::new(Palette::new("dark", dark_roles())));
    RwLock::new(themes)
});

/// Registers `name` as `inherit` with `patch` applied.
///
/// Returns `true` when the theme was added and `false` when `name` was
/// already registered (the existing theme is kept). An unknown `inherit`
/// falls back to the default theme.
pub fn create_theme(name: &str, patch: &RolePatch, inherit: &str) -> bool {
    if REGISTRY.read().unwrap_or_else(PoisonError::into_inner).contains_key(name) {
        return false;
    }
    let mut themes = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    if themes.contains_key(name) {
        return false;
    }
    let base = match themes.get(inherit) {
        Some(base) => base.clone(),
        None => {
            warn!(theme = name, inherit, "Base theme is not registered; inheriting from default");
            default_palette(&themes)
        }
    };
    let roles = patch.apply(base.roles());
    themes.insert(name.to_string(), Arc::new(Palette::new(name, roles)));
    debug!(theme = name, inherit, "Registered theme");
    true
}

/// Registers the `cyberdrain` theme if it is not registered yet.
pub fn ensure_cyberdrain_theme() {
    create_theme(CYBERDRAIN_THEME, &cyberdrain_patch(), DEFAULT_THEME);
}

pub fn resolve(name: &str) -> Option<Arc<Palette>> {
    REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(name.trim())
        .cloned()
}

/// Resolves `name`, falling back to the default theme.
pub fn resolve_or_default(name: &str) -> Arc<Palette> {
    if let Some(theme) = resolve(name) {
        return theme;
    }
    let themes = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    warn!(theme = name, available = ?registered_names(&themes), "Unknown theme; using default");
    default_palette(&themes)
}

fn default_palette(themes: &IndexMap<String, Arc<Palette>>) -> Arc<Palette> {
    themes
        .get(DEFAULT_THEME)
        .cloned()
        .unwrap_or_else(|| Arc::new(Palette::new(DEFAULT_THEME, default_roles())))
}

/// Theme names in registration order.
fn registered_names(themes: &IndexMap<String, Arc<Palette>>) -> Vec<String> {
    themes.keys().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn repeated_registration_is_a_noop() {
        let first = RolePatch {
            text_primary: Some(Color::Red),
            ..RolePatch::default()
        };
        let second = RolePatch {
            text_primary: Some(Color::Blue),
            ..RolePatch::default()
        };
        assert!(create_theme("registry-test-repeat", &first, DEFAULT_THEME));
        assert!(!create_theme("registry-test-repeat", &first, DEFAULT_THEME));
        assert!(!create_theme("registry-test-repeat", &second, DEFAULT_THEME));
        let theme = resolve("registry-test-repeat").expect("registered");
        assert_eq!(theme.roles().text, Color::Red);
    }

    #[test]
    fn cyberdrain_inherits_from_default() {
        ensure_cyberdrain_theme();
        ensure_cyberdrain_theme();
        let cyberdrain = resolve(CYBERDRAIN_THEME).expect("registered");
        let default = resolve(DEFAULT_THEME).expect("builtin");
        assert_eq!(cyberdrain.roles().border, default.roles().border);
        assert_ne!(cyberdrain.roles().text, default.roles().text);
        let names = registered_names(&REGISTRY.read().unwrap_or_else(PoisonError::into_inner));
        let count = names.iter().filter(|name| *name == CYBERDRAIN_THEME).count();
        assert_eq!(count, 1);
    }

    #[test]
    fn unknown_base_falls_back_to_default() {
        assert!(create_theme("registry-test-orphan", &RolePatch::default(), "no-such-base"));
        let orphan = resolve("registry-test-orphan").expect("registered");
        let default = resolve(DEFAULT_THEME).expect("builtin");
        assert_eq!(orphan.roles(), default.roles());
    }

    #[test]
    fn unknown_theme_resolves_to_default() {
        assert!(resolve("registry-test-missing").is_none());
        assert_eq!(resolve_or_default("registry-test-missing").name, DEFAULT_THEME);
    }
}
