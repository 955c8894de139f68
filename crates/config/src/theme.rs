// Theme configuration
// Named color roles for the accent, page shells and the hero area

use serde::Serialize;
use serde_json::{json, Value};

use crate::hex::normalize_hex_value;
use crate::value::truthy;

/// Site accent used when no valid base color is configured
pub const DEFAULT_ACCENT: &str = "#38bdf8";
pub const DEFAULT_LIGHT_SHELL: &str = "#f1f5f9";
pub const DEFAULT_DARK_SHELL: &str = "#0f172a";
pub const DEFAULT_HERO_OVERLAY: &str = "#020617";
pub const DEFAULT_HERO_CARD: &str = "#0f172a";
pub const DEFAULT_HERO_CHIP: &str = "#1e293b";

/// Theme color roles (canonical `#rrggbb` strings).
///
/// `button` and `logo` may be empty, which means "inherit `base`".
/// Use [`ThemeColors::effective_button`] / [`ThemeColors::effective_logo`]
/// to resolve that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub base: String,
    pub button: String,
    pub logo: String,
    pub light_shell: String,
    pub dark_shell: String,
    pub hero_overlay: String,
    pub hero_card: String,
    pub hero_chip: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            base: DEFAULT_ACCENT.into(),
            button: String::new(),
            logo: String::new(),
            light_shell: DEFAULT_LIGHT_SHELL.into(),
            dark_shell: DEFAULT_DARK_SHELL.into(),
            hero_overlay: DEFAULT_HERO_OVERLAY.into(),
            hero_card: DEFAULT_HERO_CARD.into(),
            hero_chip: DEFAULT_HERO_CHIP.into(),
        }
    }
}

impl ThemeColors {
    /// Button color with the inherit signal resolved
    pub fn effective_button(&self) -> &str {
        if self.button.is_empty() { &self.base } else { &self.button }
    }

    /// Logo color with the inherit signal resolved
    pub fn effective_logo(&self) -> &str {
        if self.logo.is_empty() { &self.base } else { &self.logo }
    }

    /// Re-run normalization over this value (for values built by hand)
    pub fn normalized(&self) -> Self {
        normalize_theme_colors(&self.to_value())
    }

    pub fn to_value(&self) -> Value {
        json!({
            "base": self.base,
            "button": self.button,
            "logo": self.logo,
            "lightShell": self.light_shell,
            "darkShell": self.dark_shell,
            "heroOverlay": self.hero_overlay,
            "heroCard": self.hero_card,
            "heroChip": self.hero_chip,
        })
    }
}

/// Build a complete [`ThemeColors`] from an untrusted value.
///
/// Total: any input, including non-objects, yields a valid theme.
/// `button`/`logo` are only normalized (against `base`) when the input is
/// truthy; otherwise they stay empty so the inherit signal survives a save.
pub fn normalize_theme_colors(input: &Value) -> ThemeColors {
    let base = normalize_hex_value(&input["base"], DEFAULT_ACCENT);
    let inherit_or = |key: &str| {
        let candidate = &input[key];
        if truthy(candidate) {
            normalize_hex_value(candidate, &base)
        } else {
            String::new()
        }
    };
    let button = inherit_or("button");
    let logo = inherit_or("logo");

    ThemeColors {
        button,
        logo,
        light_shell: normalize_hex_value(&input["lightShell"], DEFAULT_LIGHT_SHELL),
        dark_shell: normalize_hex_value(&input["darkShell"], DEFAULT_DARK_SHELL),
        hero_overlay: normalize_hex_value(&input["heroOverlay"], DEFAULT_HERO_OVERLAY),
        hero_card: normalize_hex_value(&input["heroCard"], DEFAULT_HERO_CARD),
        hero_chip: normalize_hex_value(&input["heroChip"], DEFAULT_HERO_CHIP),
        base,
    }
}
