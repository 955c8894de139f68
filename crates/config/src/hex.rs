//! Hex color validation and canonicalization.
//!
//! Canonical form is `#rrggbb`, lowercase, 7 characters. Accepted input is
//! 3 or 6 hex digits with an optional leading `#`. Surrounding whitespace is
//! not accepted.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::Rgb;

static HEX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#?(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex pattern compiles")
});

/// Pattern check only, no canonicalization.
///
/// Used by form validation to flag a candidate without touching state.
pub fn is_valid_hex_candidate(input: &str) -> bool {
    HEX_PATTERN.is_match(input)
}

/// Canonicalize `input`, or return `fallback` unchanged.
///
/// `fallback` is assumed to already be canonical.
///
/// ```
/// use folio_config::normalize_hex_color;
///
/// assert_eq!(normalize_hex_color(Some("#FFF"), "#000000"), "#ffffff");
/// assert_eq!(normalize_hex_color(Some("zzz"), "#000000"), "#000000");
/// assert_eq!(normalize_hex_color(None, "#000000"), "#000000");
/// ```
pub fn normalize_hex_color(input: Option<&str>, fallback: &str) -> String {
    match input {
        Some(candidate) if is_valid_hex_candidate(candidate) => canonicalize(candidate),
        _ => fallback.to_string(),
    }
}

/// Same as [`normalize_hex_color`] over an untrusted JSON value.
/// Anything that is not a string yields the fallback.
pub fn normalize_hex_value(input: &Value, fallback: &str) -> String {
    normalize_hex_color(input.as_str(), fallback)
}

/// Parse `#rgb`, `#rrggbb` (with or without `#`) into an RGB triple.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    if !is_valid_hex_candidate(hex) {
        return None;
    }
    let canonical = canonicalize(hex);
    let digits = &canonical[1..];
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Rgb::new(r, g, b))
}

// Caller has already matched HEX_PATTERN.
fn canonicalize(candidate: &str) -> String {
    let digits = candidate.trim_start_matches('#').to_ascii_lowercase();
    if digits.len() == 3 {
        let mut out = String::with_capacity(7);
        out.push('#');
        for ch in digits.chars() {
            out.push(ch);
            out.push(ch);
        }
        out
    } else {
        format!("#{}", digits)
    }
}
