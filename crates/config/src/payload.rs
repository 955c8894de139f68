//! Persisted settings envelope: `{ "theme": {...}, "blog": {...} }`.
//!
//! The stored value has gone through several shapes over time. Reading
//! classifies the raw value into a [`PayloadShape`] first and only then
//! normalizes, so the shape sniffing lives in one place.
//!
//! Unreadable values never surface as errors: a settings record that cannot
//! be understood renders with defaults instead of breaking the page.

use serde::Serialize;
use serde_json::{json, Value};

use crate::blog::{normalize_blog_settings, BlogSettings};
use crate::theme::{normalize_theme_colors, ThemeColors};

/// Raw payload after classification, before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadShape {
    /// Nothing stored (null, empty or whitespace-only string)
    Empty,
    /// Current envelope; either half may be missing
    Wrapped { theme: Value, blog: Value },
    /// Old records stored the theme object directly, detected by a `base` key
    LegacyRawTheme(Value),
    /// Malformed JSON or a shape we don't recognize
    Unrecognized,
}

impl PayloadShape {
    /// Classify a raw stored value. Strings are parsed as JSON first.
    pub fn classify(raw: &Value) -> Self {
        match raw {
            Value::Null => PayloadShape::Empty,
            Value::String(text) => {
                if text.trim().is_empty() {
                    return PayloadShape::Empty;
                }
                match serde_json::from_str::<Value>(text) {
                    Ok(parsed) => Self::classify_parsed(parsed),
                    Err(e) => {
                        log::debug!("settings payload is not valid JSON, using defaults: {}", e);
                        PayloadShape::Unrecognized
                    }
                }
            }
            other => Self::classify_parsed(other.clone()),
        }
    }

    fn classify_parsed(parsed: Value) -> Self {
        match parsed {
            Value::Null => PayloadShape::Empty,
            Value::Object(mut map) => {
                if map.contains_key("theme") || map.contains_key("blog") {
                    PayloadShape::Wrapped {
                        theme: map.remove("theme").unwrap_or(Value::Null),
                        blog: map.remove("blog").unwrap_or(Value::Null),
                    }
                } else if map.contains_key("base") {
                    PayloadShape::LegacyRawTheme(Value::Object(map))
                } else {
                    PayloadShape::Unrecognized
                }
            }
            other => {
                log::debug!("settings payload is not an object: {}", other);
                PayloadShape::Unrecognized
            }
        }
    }
}

/// Normalized `{theme, blog}` pair
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SettingsPayload {
    pub theme: ThemeColors,
    pub blog: BlogSettings,
}

impl SettingsPayload {
    /// Normalize an already-classified payload
    pub fn from_shape(shape: PayloadShape) -> Self {
        match shape {
            PayloadShape::Wrapped { theme, blog } => SettingsPayload {
                theme: normalize_theme_colors(&theme),
                blog: normalize_blog_settings(&blog),
            },
            PayloadShape::LegacyRawTheme(theme) => SettingsPayload {
                theme: normalize_theme_colors(&theme),
                blog: BlogSettings::default(),
            },
            PayloadShape::Empty | PayloadShape::Unrecognized => SettingsPayload::default(),
        }
    }

    /// Canonical stored form
    pub fn to_json_string(&self) -> String {
        serialize_settings_payload(&self.theme.to_value(), &self.blog.to_value())
    }
}

/// Read a stored value of any supported shape. Never fails.
pub fn parse_settings_payload(raw: &Value) -> SettingsPayload {
    SettingsPayload::from_shape(PayloadShape::classify(raw))
}

/// Convenience for callers holding the stored text
pub fn parse_settings_str(raw: &str) -> SettingsPayload {
    parse_settings_payload(&Value::String(raw.to_string()))
}

/// Normalize both halves and produce the canonical stored JSON string.
pub fn serialize_settings_payload(theme: &Value, blog: &Value) -> String {
    let envelope = json!({
        "theme": normalize_theme_colors(theme),
        "blog": normalize_blog_settings(blog),
    });
    envelope.to_string()
}
