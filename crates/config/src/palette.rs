// Accent palette
// Presentation colors derived from the theme for one light/dark mode.
// Computed on demand and never persisted.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::hex::hex_to_rgb;
use crate::theme::ThemeColors;
use crate::Rgb;

/// Used when a resolved color still fails to parse
pub const FALLBACK_RGB: Rgb = Rgb::from_hex(0x38bdf8);

/// Text color on dark backgrounds
pub const LIGHT_TEXT: &str = "#f8fafc";
/// Text color on light backgrounds
pub const DARK_TEXT: &str = "#0f172a";

/// Backgrounds brighter than this get dark text
pub const CONTRAST_LUMINANCE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ColorMode::Dark)
    }

    fn tint_alphas(&self) -> TintAlphas {
        match self {
            ColorMode::Light => TintAlphas { soft: 0.18, softer: 0.10, border: 0.35, hero_overlay: 0.72 },
            ColorMode::Dark => TintAlphas { soft: 0.30, softer: 0.18, border: 0.45, hero_overlay: 0.82 },
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ColorMode::Light),
            "dark" => Ok(ColorMode::Dark),
            other => Err(format!("unknown color mode '{}' (expected light or dark)", other)),
        }
    }
}

struct TintAlphas {
    soft: f64,
    softer: f64,
    border: f64,
    hero_overlay: f64,
}

/// Derived palette for one mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccentPalette {
    pub mode: ColorMode,

    pub base: String,
    pub button: String,
    pub logo: String,
    pub base_rgb: Rgb,
    pub button_rgb: Rgb,
    pub logo_rgb: Rgb,

    pub base_contrast: &'static str,
    pub button_contrast: &'static str,

    // Tints over the base color
    pub soft: String,
    pub softer: String,
    pub border: String,

    // Composite CSS values
    pub card_glow: String,
    pub logo_gradient: String,
    pub logo_shadow: String,

    pub shell: String,
    pub light_shell: String,
    pub dark_shell: String,

    pub hero_overlay: String,
    pub hero_overlay_tint: String,
    pub hero_card: String,
    pub hero_chip: String,

    /// CSS custom properties, keyed by property name (`--accent-base`, ...)
    pub variables: BTreeMap<String, String>,
}

/// Contrast text color for a background
pub fn contrast_text(background: Rgb) -> &'static str {
    contrast_for_luminance(background.relative_luminance())
}

/// Light text up to and including the threshold, dark text above it.
pub fn contrast_for_luminance(luminance: f64) -> &'static str {
    if luminance > CONTRAST_LUMINANCE_THRESHOLD {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}

fn rgb_or_fallback(hex: &str) -> Rgb {
    hex_to_rgb(hex).unwrap_or(FALLBACK_RGB)
}

/// Derive the palette for `mode`. Pure; cheap enough to call per render.
pub fn build_accent_palette(theme: &ThemeColors, mode: ColorMode) -> AccentPalette {
    let theme = theme.normalized();

    let base = theme.base.clone();
    let button = theme.effective_button().to_string();
    let logo = theme.effective_logo().to_string();

    let base_rgb = rgb_or_fallback(&base);
    let button_rgb = rgb_or_fallback(&button);
    let logo_rgb = rgb_or_fallback(&logo);

    let base_contrast = contrast_text(base_rgb);
    let button_contrast = contrast_text(button_rgb);

    let alphas = mode.tint_alphas();
    let soft = base_rgb.rgba(alphas.soft);
    let softer = base_rgb.rgba(alphas.softer);
    let border = base_rgb.rgba(alphas.border);

    let (card_glow, logo_gradient, logo_shadow) = match mode {
        ColorMode::Light => (
            format!("0 18px 45px -20px {}, 0 0 0 1px {}", base_rgb.rgba(0.35), base_rgb.rgba(0.12)),
            format!(
                "radial-gradient(circle at 30% 30%, {} 0%, transparent 60%), linear-gradient(135deg, {} 0%, {} 100%)",
                logo_rgb.rgba(0.35),
                logo_rgb.rgba(0.95),
                button_rgb.rgba(0.85)
            ),
            format!("0 10px 30px -12px {}", logo_rgb.rgba(0.45)),
        ),
        ColorMode::Dark => (
            format!("0 22px 60px -24px {}, 0 0 0 1px {}", base_rgb.rgba(0.55), base_rgb.rgba(0.22)),
            format!(
                "radial-gradient(circle at 30% 30%, {} 0%, transparent 65%), linear-gradient(135deg, {} 0%, {} 100%)",
                logo_rgb.rgba(0.45),
                logo_rgb.rgba(1.0),
                button_rgb.rgba(0.9)
            ),
            format!("0 12px 36px -10px {}", logo_rgb.rgba(0.6)),
        ),
    };

    let shell = if mode.is_dark() { theme.dark_shell.clone() } else { theme.light_shell.clone() };
    let hero_overlay_tint = rgb_or_fallback(&theme.hero_overlay).rgba(alphas.hero_overlay);

    let mut palette = AccentPalette {
        mode,
        base,
        button,
        logo,
        base_rgb,
        button_rgb,
        logo_rgb,
        base_contrast,
        button_contrast,
        soft,
        softer,
        border,
        card_glow,
        logo_gradient,
        logo_shadow,
        shell,
        light_shell: theme.light_shell,
        dark_shell: theme.dark_shell,
        hero_overlay: theme.hero_overlay,
        hero_overlay_tint,
        hero_card: theme.hero_card,
        hero_chip: theme.hero_chip,
        variables: BTreeMap::new(),
    };
    palette.variables = css_variables(&palette);
    palette
}

fn css_variables(p: &AccentPalette) -> BTreeMap<String, String> {
    [
        ("--accent-base", p.base.clone()),
        ("--accent-base-rgb", p.base_rgb.channels()),
        ("--accent-base-contrast", p.base_contrast.to_string()),
        ("--accent-button", p.button.clone()),
        ("--accent-button-rgb", p.button_rgb.channels()),
        ("--accent-button-contrast", p.button_contrast.to_string()),
        ("--accent-logo", p.logo.clone()),
        ("--accent-logo-rgb", p.logo_rgb.channels()),
        ("--accent-soft", p.soft.clone()),
        ("--accent-softer", p.softer.clone()),
        ("--accent-border", p.border.clone()),
        ("--accent-card-glow", p.card_glow.clone()),
        ("--accent-logo-gradient", p.logo_gradient.clone()),
        ("--accent-logo-shadow", p.logo_shadow.clone()),
        ("--shell-bg", p.shell.clone()),
        ("--shell-light", p.light_shell.clone()),
        ("--shell-dark", p.dark_shell.clone()),
        ("--hero-overlay", p.hero_overlay_tint.clone()),
        ("--hero-card", p.hero_card.clone()),
        ("--hero-chip", p.hero_chip.clone()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::normalize_theme_colors;
    use serde_json::json;

    fn theme(value: serde_json::Value) -> ThemeColors {
        normalize_theme_colors(&value)
    }

    #[test]
    fn test_default_light_palette() {
        let palette = build_accent_palette(&theme(json!({ "base": "#38bdf8" })), ColorMode::Light);
        assert_eq!(palette.button, "#38bdf8");
        assert_eq!(palette.logo, "#38bdf8");
        assert_eq!(palette.soft, "rgba(56, 189, 248, 0.18)");
        assert_eq!(palette.softer, "rgba(56, 189, 248, 0.1)");
        assert_eq!(palette.border, "rgba(56, 189, 248, 0.35)");
        assert_eq!(palette.button_contrast, contrast_text(Rgb::new(56, 189, 248)));
        // luminance of #38bdf8 is ~0.44
        assert_eq!(palette.button_contrast, LIGHT_TEXT);
        assert_eq!(palette.shell, "#f1f5f9");
    }

    #[test]
    fn test_dark_alphas() {
        let palette = build_accent_palette(&ThemeColors::default(), ColorMode::Dark);
        assert_eq!(palette.soft, "rgba(56, 189, 248, 0.3)");
        assert_eq!(palette.softer, "rgba(56, 189, 248, 0.18)");
        assert_eq!(palette.border, "rgba(56, 189, 248, 0.45)");
        assert_eq!(palette.shell, "#0f172a");
    }

    #[test]
    fn test_contrast_extremes() {
        let black = build_accent_palette(&theme(json!({ "base": "#000000" })), ColorMode::Light);
        assert_eq!(black.base_contrast, LIGHT_TEXT);
        let white = build_accent_palette(&theme(json!({ "base": "#ffffff" })), ColorMode::Light);
        assert_eq!(white.base_contrast, DARK_TEXT);
    }

    #[test]
    fn test_contrast_threshold_boundary() {
        assert_eq!(contrast_for_luminance(0.0), LIGHT_TEXT);
        assert_eq!(contrast_for_luminance(CONTRAST_LUMINANCE_THRESHOLD), LIGHT_TEXT);
        assert_eq!(contrast_for_luminance(0.500_001), DARK_TEXT);
        assert_eq!(contrast_for_luminance(1.0), DARK_TEXT);
    }

    #[test]
    fn test_fallback_rgb_matches_default_accent() {
        assert_eq!(FALLBACK_RGB.to_hex(), crate::theme::DEFAULT_ACCENT);
    }

    #[test]
    fn test_explicit_button_and_logo() {
        let palette = build_accent_palette(
            &theme(json!({ "base": "#ffffff", "button": "#000", "logo": "#ff0000" })),
            ColorMode::Dark,
        );
        assert_eq!(palette.button, "#000000");
        assert_eq!(palette.button_contrast, LIGHT_TEXT);
        assert_eq!(palette.base_contrast, DARK_TEXT);
        assert!(palette.logo_gradient.contains("rgba(255, 0, 0, 1)"));
        assert!(palette.logo_gradient.contains("rgba(0, 0, 0, 0.9)"));
        assert_eq!(palette.logo_shadow, "0 12px 36px -10px rgba(255, 0, 0, 0.6)");
    }

    #[test]
    fn test_unnormalized_input_is_defended() {
        let raw = ThemeColors {
            base: "not a color".into(),
            button: "#GGG".into(),
            ..ThemeColors::default()
        };
        let palette = build_accent_palette(&raw, ColorMode::Light);
        assert_eq!(palette.base, "#38bdf8");
        assert_eq!(palette.button, "#38bdf8");
        assert_eq!(palette.base_rgb, FALLBACK_RGB);
    }

    #[test]
    fn test_css_variables() {
        let palette = build_accent_palette(&ThemeColors::default(), ColorMode::Light);
        assert_eq!(palette.variables["--accent-base"], "#38bdf8");
        assert_eq!(palette.variables["--accent-base-rgb"], "56, 189, 248");
        assert_eq!(palette.variables["--accent-soft"], palette.soft);
        assert_eq!(palette.variables["--shell-bg"], "#f1f5f9");
        assert!(palette.variables.keys().all(|k| k.starts_with("--")));
    }

    #[test]
    fn test_deterministic() {
        let t = theme(json!({ "base": "#123", "logo": "#456" }));
        assert_eq!(build_accent_palette(&t, ColorMode::Dark), build_accent_palette(&t, ColorMode::Dark));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Dark".parse::<ColorMode>(), Ok(ColorMode::Dark));
        assert_eq!(" light ".parse::<ColorMode>(), Ok(ColorMode::Light));
        assert!("dim".parse::<ColorMode>().is_err());
        assert_eq!(ColorMode::Dark.to_string(), "dark");
    }
}
