//! Color schemes and ANSI escape sequence generation.
//!
//! Built-in themes are `dark` (default) and `light`. Custom themes are loaded
//! from TOML files:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! text_normal = "#e6e6e6"
//! text_dim = "#7f7f7f"
//! border = "#444444"
//! critical = "#ff5555"
//! high = "#ff9e3b"
//! medium = "#f1c40f"
//! low = "#5dade2"
//! connected = "#2ecc71"
//! checking = "#f1c40f"
//! disconnected = "#ff5555"
//! ```

use crate::domain::{ConnectionStatus, Result, Severity, ShellError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "dark";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every styled element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub text_normal: String,
    /// Secondary text: details, codes, hints.
    pub text_dim: String,
    pub border: String,

    pub critical: String,
    pub high: String,
    pub medium: String,
    pub low: String,

    pub connected: String,
    pub checking: String,
    pub disconnected: String,
}

impl ThemeColors {
    fn from_palette(palette: [&str; 10]) -> Self {
        let [text_normal, text_dim, border, critical, high, medium, low, connected, checking, disconnected] =
            palette.map(String::from);
        Self {
            text_normal,
            text_dim,
            border,
            critical,
            high,
            medium,
            low,
            connected,
            checking,
            disconnected,
        }
    }
}

impl Theme {
    /// Returns a built-in theme by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let palette = match name {
            "dark" => [
                "#e6e6e6", "#7f8c8d", "#3c3f41", "#ff5555", "#ff9e3b", "#f1c40f", "#5dade2",
                "#2ecc71", "#f1c40f", "#ff5555",
            ],
            "light" => [
                "#2c3e50", "#95a5a6", "#d0d3d4", "#c0392b", "#d35400", "#b7950b", "#2471a3",
                "#1e8449", "#b7950b", "#c0392b",
            ],
            _ => return None,
        };

        Some(Self {
            name: name.to_string(),
            colors: ThemeColors::from_palette(palette),
        })
    }

    /// Parses a theme from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Theme`] for invalid TOML or missing colors.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ShellError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ShellError::Theme(format!("Failed to read theme file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Accent color for alerts of `severity`.
    #[must_use]
    pub fn severity_color(&self, severity: Severity) -> &str {
        match severity {
            Severity::Critical => &self.colors.critical,
            Severity::High => &self.colors.high,
            Severity::Medium => &self.colors.medium,
            Severity::Low => &self.colors.low,
        }
    }

    /// Dot color for the connection status indicator.
    #[must_use]
    pub fn status_color(&self, status: ConnectionStatus) -> &str {
        match status {
            ConnectionStatus::Connected => &self.colors.connected,
            ConnectionStatus::Checking => &self.colors.checking,
            ConnectionStatus::Disconnected => &self.colors.disconnected,
            ConnectionStatus::Unchecked => &self.colors.text_dim,
        }
    }

    /// Parses `#rrggbb`, falling back to white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors::from_palette(["#ffffff"; 10]),
        })
    }
}
