//! Color themes.
//!
//! The theme is chosen once at startup from `settings.theme` and read
//! through [`theme`] by the views.

use std::sync::OnceLock;

use ratatui::style::Color;
use tracing::warn;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Color theme for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Borders and titles of focused panels.
    pub accent: Color,
    /// Secondary text.
    pub dim: Color,
    /// Section headers and the active sort column.
    pub warning: Color,
    /// Checked rows and key names.
    pub success: Color,
    /// Highlighted row background.
    pub highlight: Color,
}

impl Theme {
    /// Theme for dark terminals.
    pub fn dark() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Cyan,
            dim: Color::DarkGray,
            warning: Color::Yellow,
            success: Color::Green,
            highlight: Color::Rgb(40, 44, 52),
        }
    }

    /// Theme for light terminals.
    pub fn light() -> Self {
        Self {
            fg: Color::Black,
            accent: Color::Blue,
            dim: Color::Gray,
            warning: Color::Magenta,
            success: Color::Rgb(0, 110, 0),
            highlight: Color::Rgb(220, 224, 232),
        }
    }

    /// Look up a theme by name, falling back to dark.
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            other => {
                warn!(theme = other, "Unknown theme, using dark");
                Self::dark()
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Install the global theme. Later calls are ignored.
pub fn init_theme(theme: Theme) {
    let _ = THEME.set(theme);
}

/// Get the global theme, dark if none was installed.
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::dark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name() {
        assert_eq!(Theme::by_name("light"), Theme::light());
        assert_eq!(Theme::by_name("DARK"), Theme::dark());
        assert_eq!(Theme::by_name("solarized"), Theme::dark());
    }

    #[test]
    fn test_theme_is_always_available() {
        let _ = theme().accent;
    }
}
