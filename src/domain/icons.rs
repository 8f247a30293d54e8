//! Symbolic icon names resolved to renderable glyphs.
//!
//! The resolver is a capability seam: the static glyph table can be
//! swapped without touching callers, and unknown names fall back to a
//! documented default instead of failing.

use tracing::warn;

/// Glyph returned for unknown icon names.
pub const FALLBACK_GLYPH: &str = "?";

/// Resolve a symbolic icon name to a renderable glyph.
pub trait IconResolver {
    fn resolve(&self, name: &str) -> &'static str;
}

/// The built-in glyph table.
pub struct GlyphSet;

static GLYPHS: &[(&str, &str)] = &[
    ("ArrowDownToLine", "↧"),
    ("ArrowRight", "→"),
    ("Building", "⌂"),
    ("Bus", "⛟"),
    ("ChevronRight", "›"),
    ("CreditCard", "▥"),
    ("Download", "⬇"),
    ("LogOut", "⏏"),
    ("Moon", "☾"),
    ("Plus", "+"),
    ("QrCode", "▦"),
    ("Receipt", "☰"),
    ("RefreshCw", "⟳"),
    ("ScanLine", "▤"),
    ("SendHorizonal", "➤"),
    ("ShoppingBag", "⛁"),
    ("Sun", "☀"),
    ("User", "◉"),
    ("Wallet", "◈"),
    ("X", "✕"),
];

impl IconResolver for GlyphSet {
    fn resolve(&self, name: &str) -> &'static str {
        match GLYPHS.iter().find(|(n, _)| *n == name) {
            Some((_, glyph)) => glyph,
            None => {
                warn!("Icon \"{}\" not found, using fallback", name);
                FALLBACK_GLYPH
            }
        }
    }
}

/// Convenience lookup against the built-in glyph table.
pub fn icon(name: &str) -> &'static str {
    GlyphSet.resolve(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_resolve_to_their_glyph() {
        assert_eq!(icon("Wallet"), "◈");
        assert_eq!(icon("Sun"), "☀");
        assert_eq!(icon("QrCode"), "▦");
    }

    #[test]
    fn unknown_names_fall_back() {
        assert_eq!(icon("NoSuchIcon"), FALLBACK_GLYPH);
        assert_eq!(icon(""), FALLBACK_GLYPH);
    }
}
