//! Render configuration
//!
//! Canvas size and colors, plus the built-in theme presets.

use serde::{Deserialize, Serialize};

// =============================================================================
// Colors
// =============================================================================

/// Wave color used when the configured one cannot be parsed (SoundCloud orange)
pub const FALLBACK_WAVE_COLOR: Rgb = Rgb { r: 255, g: 85, b: 0 };

/// Background color used when the configured one cannot be parsed
pub const FALLBACK_BACKGROUND_COLOR: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#rrggbb` (leading `#` optional, any case)
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn parse_or(hex: &str, fallback: Rgb) -> Self {
        Self::parse_hex(hex).unwrap_or_else(|| {
            tracing::debug!("Invalid color '{}', using fallback {}", hex, fallback.to_hex());
            fallback
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// =============================================================================
// Render Config
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Bar color as `#rrggbb`
    pub wave_color: String,
    /// Background color as `#rrggbb`
    pub background_color: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 200,
            wave_color: "#ff5500".to_string(),
            background_color: "#ffffff".to_string(),
        }
    }
}

impl RenderConfig {
    pub fn wave_rgb(&self) -> Rgb {
        Rgb::parse_or(&self.wave_color, FALLBACK_WAVE_COLOR)
    }

    pub fn background_rgb(&self) -> Rgb {
        Rgb::parse_or(&self.background_color, FALLBACK_BACKGROUND_COLOR)
    }

    /// Replace both colors with those of a preset
    pub fn apply_preset(&mut self, preset: &ThemePreset) {
        self.wave_color = preset.wave_color.to_string();
        self.background_color = preset.background_color.to_string();
    }
}

// =============================================================================
// Presets
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePreset {
    pub name: &'static str,
    pub wave_color: &'static str,
    pub background_color: &'static str,
}

pub const PRESETS: [ThemePreset; 5] = [
    ThemePreset {
        name: "soundcloud",
        wave_color: "#ff5500",
        background_color: "#ffffff",
    },
    ThemePreset {
        name: "midnight",
        wave_color: "#4facfe",
        background_color: "#0f0f23",
    },
    ThemePreset {
        name: "forest",
        wave_color: "#2ecc71",
        background_color: "#0b1f14",
    },
    ThemePreset {
        name: "sunset",
        wave_color: "#ff6b6b",
        background_color: "#2d1b2e",
    },
    ThemePreset {
        name: "mono",
        wave_color: "#333333",
        background_color: "#f5f5f5",
    },
];

/// Look up a preset by name, ignoring case
pub fn find_preset(name: &str) -> Option<&'static ThemePreset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
