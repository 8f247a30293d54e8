//! Dark/light theme preference with write-through persistence.
//!
//! The preference is stored as a two-valued string under a fixed key;
//! when unset it falls back to a terminal background probe. Every toggle
//! writes through to the store before the next render.

use color_eyre::eyre::Result;
use ratatui::style::Color;

use crate::infra::store::Store;

/// Metadata key holding `"dark"` or `"light"`.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePreference {
    is_dark: bool,
}

impl ThemePreference {
    /// Load the persisted preference, falling back to the system probe.
    pub fn load(store: &Store) -> Self {
        let is_dark = match store.load_metadata(THEME_KEY) {
            Ok(Some(value)) => value == "dark",
            _ => system_prefers_dark(),
        };
        Self { is_dark }
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    /// Flip the preference and write it through immediately.
    pub fn toggle(&mut self, store: &Store) -> Result<()> {
        self.is_dark = !self.is_dark;
        store.save_metadata(THEME_KEY, if self.is_dark { "dark" } else { "light" })?;
        Ok(())
    }

    pub fn palette(&self) -> Palette {
        if self.is_dark {
            Palette::dark()
        } else {
            Palette::light()
        }
    }
}

/// Best-effort system preference: parse the `COLORFGBG` hint some
/// terminals export.
pub fn system_prefers_dark() -> bool {
    std::env::var("COLORFGBG")
        .map(|v| colorfgbg_is_dark(&v))
        .unwrap_or(false)
}

/// `COLORFGBG` is `"<fg>;<bg>"`; low background color numbers (and 8)
/// are the dark palette half.
pub fn colorfgbg_is_dark(value: &str) -> bool {
    match value.rsplit(';').next().and_then(|bg| bg.parse::<u8>().ok()) {
        Some(bg) => bg <= 6 || bg == 8,
        None => false,
    }
}

/// Render colors derived from the theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub dim: Color,
    pub accent: Color,
    pub surface: Color,
    pub positive: Color,
    pub negative: Color,
    pub highlight: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            fg: Color::White,
            dim: Color::DarkGray,
            accent: Color::Cyan,
            surface: Color::Black,
            positive: Color::Green,
            negative: Color::Red,
            highlight: Color::Yellow,
        }
    }

    pub fn light() -> Self {
        Self {
            fg: Color::Black,
            dim: Color::Gray,
            accent: Color::Blue,
            surface: Color::White,
            positive: Color::Green,
            negative: Color::Red,
            highlight: Color::Magenta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorfgbg_parses_background_half() {
        assert!(colorfgbg_is_dark("15;0"));
        assert!(colorfgbg_is_dark("7;8"));
        assert!(!colorfgbg_is_dark("0;15"));
        assert!(!colorfgbg_is_dark("garbage"));
        assert!(!colorfgbg_is_dark(""));
    }

    #[test]
    fn palettes_differ_between_themes() {
        assert_ne!(Palette::dark(), Palette::light());
    }
}
