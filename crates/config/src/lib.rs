// Site settings: theme colors, blog content, persisted payload, accent palette
//
// Everything in this crate is pure and total. Malformed input degrades to
// defaults; nothing here performs I/O.

pub mod blog;
pub mod hex;
pub mod palette;
pub mod payload;
pub mod theme;
mod value;

pub use blog::{normalize_blog_settings, BlogSettings, CategoryStrategy, ContactLink};
pub use hex::{hex_to_rgb, is_valid_hex_candidate, normalize_hex_color};
pub use palette::{build_accent_palette, AccentPalette, ColorMode};
pub use payload::{parse_settings_payload, parse_settings_str, serialize_settings_payload, PayloadShape, SettingsPayload};
pub use theme::{normalize_theme_colors, ThemeColors};

use serde::Serialize;

/// 8-bit RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert from hex u32 (0xRRGGBB)
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Canonical `#rrggbb` form
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgba(r, g, b, a)` string
    pub fn rgba(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }

    /// Comma-separated channels, for `rgb(var(--x))` style consumption
    pub fn channels(&self) -> String {
        format!("{}, {}, {}", self.r, self.g, self.b)
    }

    /// WCAG 2.0 relative luminance in [0, 1].
    /// See: https://www.w3.org/TR/WCAG20/#relativeluminancedef
    pub fn relative_luminance(&self) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = f64::from(c) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }
}
