//! Theme styling module for the data table.
//!
//! Themes are looked up by name in a process-wide registry. The registry
//! ships with `default` and `dark`; `cyberdrain` is derived from `default`
//! the first time a table renders with it. Prefer the helpers in
//! `theme_helpers` over hard-coding colors.

pub mod palettes;
pub mod registry;
pub mod roles;
pub mod theme_helpers;

pub use palettes::{Palette, RolePatch};
pub use registry::{CYBERDRAIN_THEME, DEFAULT_THEME, create_theme, ensure_cyberdrain_theme, resolve, resolve_or_default};
pub use roles::{Theme, ThemeRoles};
