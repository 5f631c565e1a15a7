//! Matiere (school subject) model and its RGBA color.
//!
//! # Responsibility
//! - Define the subject record referenced by every item.
//! - Parse stored color text into a usable RGBA value.
//!
//! # Invariants
//! - `nom` is the stable unique key; the core never renames a matiere.
//! - Unparseable stored colors degrade to opaque black, never to an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#?([0-9a-fA-F]{6})([0-9a-fA-F]{2})?$").expect("valid color regex"));

/// RGBA color attached to a matiere for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque black, the fallback for colors the store cannot parse.
    pub const BLACK: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    /// Parses `#rrggbb` or `#rrggbbaa` text (leading `#` optional).
    ///
    /// Returns `None` when the text is not a valid hex color.
    pub fn parse(value: &str) -> Option<Color> {
        let caps = COLOR_RE.captures(value.trim())?;
        let rgb = caps.get(1)?.as_str();
        let r = u8::from_str_radix(&rgb[0..2], 16).ok()?;
        let g = u8::from_str_radix(&rgb[2..4], 16).ok()?;
        let b = u8::from_str_radix(&rgb[4..6], 16).ok()?;
        let a = match caps.get(2) {
            Some(alpha) => u8::from_str_radix(alpha.as_str(), 16).ok()?,
            None => 255,
        };
        Some(Color { r, g, b, a })
    }

    /// Parses stored color text, falling back to opaque black.
    ///
    /// Matiere colors are display metadata; a corrupt value must not make a
    /// day fail to load.
    pub fn from_stored(value: &str) -> Color {
        Color::parse(value).unwrap_or(Color::BLACK)
    }

    /// Serializes as `#rrggbbaa` lowercase hex, the stored wire form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// A school subject: named, colored, seeded at init time.
///
/// Read-only during normal agenda use; items reference it by `nom`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matiere {
    pub nom: String,
    pub color: Color,
}

impl Matiere {
    pub fn new(nom: impl Into<String>, color: Color) -> Self {
        Self {
            nom: nom.into(),
            color,
        }
    }
}
