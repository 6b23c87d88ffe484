//! Theme element catalog and color data
//!
//! A theme is a named section in the `highlight` group whose options are
//! `<element>-foreground` / `<element>-background` pairs of hex colors.
//! This module owns the fixed element catalog and produces the ordered
//! element -> color view used by everything that paints.

use serde::{Deserialize, Serialize};

use crate::changes::ChangeSet;
use crate::error::SettingsError;
use crate::resolver::Resolver;
use crate::store::{ConfigGroup, SettingsStore};

/// One themable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeElement {
    /// Stable identifier used to build option names.
    pub id: &'static str,
    /// Human-readable label.
    pub label: &'static str,
}

/// Fixed catalog of themable elements, in presentation order.
pub const THEME_ELEMENTS: &[ThemeElement] = &[
    ThemeElement { id: "normal", label: "Normal Text" },
    ThemeElement { id: "keyword", label: "Keywords" },
    ThemeElement { id: "builtin", label: "Builtins" },
    ThemeElement { id: "comment", label: "Comments" },
    ThemeElement { id: "string", label: "Strings" },
    ThemeElement { id: "definition", label: "Definitions" },
    ThemeElement { id: "cursor", label: "Cursor" },
    ThemeElement { id: "found", label: "Found Text" },
    ThemeElement { id: "selected", label: "Selected Text" },
    ThemeElement { id: "error", label: "Error Text" },
    ThemeElement { id: "console", label: "Console Output" },
];

/// RGB color parsed from `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from a `#RRGGBB` hex string.
    pub fn from_hex(s: &str) -> Result<Self, SettingsError> {
        let hex = s.trim_start_matches('#');
        // Byte length alone is not enough: a multi-byte character would
        // panic the slicing below.
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(SettingsError::Parse(format!("invalid color format: {}", s)));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| SettingsError::Parse(format!("invalid color {}: {}", s, e)))
        };
        Ok(Color {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Foreground/background colors of one theme element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub foreground: Color,
    pub background: Color,
}

/// Resolved element -> colors view of one theme, in catalog order, with the
/// session's pending edits overlaid.
pub fn theme_entries(
    store: &SettingsStore,
    changes: &ChangeSet,
    theme_name: &str,
) -> Result<Vec<(&'static str, ColorPair)>, SettingsError> {
    let resolver = Resolver::new(store, changes);
    let mut entries = Vec::with_capacity(THEME_ELEMENTS.len());
    for element in THEME_ELEMENTS {
        let fg_option = format!("{}-foreground", element.id);
        let bg_option = format!("{}-background", element.id);
        let foreground =
            Color::from_hex(resolver.get(ConfigGroup::Highlight, theme_name, &fg_option)?)?;
        let background =
            Color::from_hex(resolver.get(ConfigGroup::Highlight, theme_name, &bg_option)?)?;
        entries.push((
            element.id,
            ColorPair {
                foreground,
                background,
            },
        ));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_roundtrip() {
        let color = Color::from_hex("#1a8feb").unwrap();
        assert_eq!(color, Color::rgb(0x1a, 0x8f, 0xeb));
        assert_eq!(color.to_hex(), "#1a8feb");
    }

    #[test]
    fn bad_hex_rejected() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("red").is_err());
        assert!(Color::from_hex("#gggggg").is_err());
        // Six bytes but not six ASCII digits; must error, not panic.
        assert!(Color::from_hex("#a\u{e9}aaa").is_err());
    }

    #[test]
    fn entries_follow_catalog_order() {
        let store = SettingsStore::in_memory().unwrap();
        let changes = ChangeSet::new();
        let entries = theme_entries(&store, &changes, "Classic").unwrap();
        let ids: Vec<&str> = entries.iter().map(|(id, _)| *id).collect();
        let expected: Vec<&str> = THEME_ELEMENTS.iter().map(|e| e.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn pending_color_overlays_default() {
        let store = SettingsStore::in_memory().unwrap();
        let mut changes = ChangeSet::new();
        changes.add_option(ConfigGroup::Highlight, "Classic", "keyword-foreground", "#123456");

        let entries = theme_entries(&store, &changes, "Classic").unwrap();
        let keyword = entries.iter().find(|(id, _)| *id == "keyword").unwrap();
        assert_eq!(keyword.1.foreground, Color::rgb(0x12, 0x34, 0x56));
    }

    #[test]
    fn unknown_theme_is_unknown_option() {
        let store = SettingsStore::in_memory().unwrap();
        let changes = ChangeSet::new();
        let err = theme_entries(&store, &changes, "No Such Theme").unwrap_err();
        assert!(matches!(err, SettingsError::UnknownOption { .. }));
    }
}
