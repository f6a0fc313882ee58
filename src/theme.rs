//! Theme colour lookup for theme-driven layers.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use crate::consts::DEFAULT_PARTICLE_COLOR;

/// Supplies the page's current particle colour.
pub trait ThemeSource {
    /// The raw colour value, if the theme defines one.
    fn particle_color(&self) -> Option<String>;
}

impl<F> ThemeSource for F
where
    F: Fn() -> Option<String>,
{
    fn particle_color(&self) -> Option<String> {
        self()
    }
}

/// A theme that never defines a colour.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTheme;

impl ThemeSource for NoTheme {
    fn particle_color(&self) -> Option<String> {
        None
    }
}

/// The theme colour trimmed, or the default white when missing or blank.
#[must_use]
pub fn resolve_color(theme: &dyn ThemeSource) -> String {
    theme
        .particle_color()
        .map(|raw| raw.trim().to_owned())
        .filter(|color| !color.is_empty())
        .unwrap_or_else(|| DEFAULT_PARTICLE_COLOR.to_owned())
}
