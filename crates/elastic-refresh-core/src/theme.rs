//! Colors and the host-supplied backdrop
//!
//! The effect needs two colors from its surroundings: the background of the
//! container it is mounted in, and the chrome around that container. The host
//! hands both over explicitly as a [`Backdrop`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ThemeConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const CLEAR: Color = Color::rgba(0, 0, 0, 0);
    /// Fallback bow fill when the surrounding chrome has no color
    pub const NEUTRAL_GRAY: Color = Color::rgb(0xaa, 0xaa, 0xaa);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// CSS-style `rgba(...)` string for SVG output
    pub fn to_css(&self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f64 / 255.0
            )
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_hex_color(s).ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

/// Parse a hex color string
/// Accepts formats: "#RGB", "#RRGGBB", "#RRGGBBAA", with or without '#'
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::rgb(r, g, b))
        }
        8 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
            Some(Color::rgba(r, g, b, a))
        }
        _ => None,
    }
}

/// Colors of the view hierarchy the effect sits in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Backdrop {
    /// Background of the container hosting the effect
    pub container_background: Color,
    /// Background of the chrome surrounding the container, if it has one
    pub chrome_background: Option<Color>,
    /// Fill of the disc behind the progress arc
    pub spinner_background: Color,
    /// Stroke of the progress arc
    pub spinner_color: Color,
}

impl Default for Backdrop {
    fn default() -> Self {
        Self {
            container_background: Color::CLEAR,
            chrome_background: None,
            spinner_background: Color::WHITE,
            spinner_color: Color::rgb(0x80, 0x80, 0x80),
        }
    }
}

impl Backdrop {
    /// Build from configuration, falling back to defaults for unparsable colors
    pub fn from_config(config: &ThemeConfig) -> Self {
        let defaults = Self::default();
        Self {
            container_background: color_or(&config.container_background, defaults.container_background),
            chrome_background: config
                .chrome_background
                .as_deref()
                .and_then(resolve_color),
            spinner_background: color_or(&config.spinner_background, defaults.spinner_background),
            spinner_color: color_or(&config.spinner_color, defaults.spinner_color),
        }
    }

    /// Opaque override for the container, needed when it would let the bow
    /// disappear into a transparent background
    pub fn container_override(&self) -> Option<Color> {
        self.container_background
            .is_transparent()
            .then_some(Color::WHITE)
    }

    /// Fill for the elastic bow so it blends into the surrounding chrome
    pub fn bow_fill(&self) -> Color {
        self.chrome_background.unwrap_or(Color::NEUTRAL_GRAY)
    }
}

fn resolve_color(hex: &str) -> Option<Color> {
    let color = parse_hex_color(hex);
    if color.is_none() {
        tracing::warn!("Ignoring invalid theme color {:?}", hex);
    }
    color
}

fn color_or(hex: &str, fallback: Color) -> Color {
    resolve_color(hex).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_forms() {
        assert_eq!(parse_hex_color("#fff"), Some(Color::WHITE));
        assert_eq!(parse_hex_color("aaaaaa"), Some(Color::NEUTRAL_GRAY));
        assert_eq!(parse_hex_color("#00000000"), Some(Color::CLEAR));
        assert_eq!(parse_hex_color(" #102030 "), Some(Color::rgb(0x10, 0x20, 0x30)));
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("zzz"), None);
    }

    #[test]
    fn test_from_str_error() {
        let err = "nope".parse::<Color>().unwrap_err();
        assert!(matches!(err, Error::InvalidColor(_)));
    }

    #[test]
    fn test_transparent_container_forced_white() {
        let backdrop = Backdrop::default();
        assert_eq!(backdrop.container_override(), Some(Color::WHITE));

        let opaque = Backdrop {
            container_background: Color::rgb(1, 2, 3),
            ..Backdrop::default()
        };
        assert_eq!(opaque.container_override(), None);
    }

    #[test]
    fn test_bow_fill_prefers_chrome() {
        let mut backdrop = Backdrop::default();
        assert_eq!(backdrop.bow_fill(), Color::NEUTRAL_GRAY);
        backdrop.chrome_background = Some(Color::rgb(0xf2, 0xf2, 0xf7));
        assert_eq!(backdrop.bow_fill(), Color::rgb(0xf2, 0xf2, 0xf7));
    }

    #[test]
    fn test_from_config_falls_back() {
        let config = ThemeConfig {
            container_background: "not a color".to_string(),
            chrome_background: Some("#f2f2f7".to_string()),
            ..ThemeConfig::default()
        };
        let backdrop = Backdrop::from_config(&config);
        assert_eq!(backdrop.container_background, Color::CLEAR);
        assert_eq!(backdrop.chrome_background, Some(Color::rgb(0xf2, 0xf2, 0xf7)));
    }

    #[test]
    fn test_css_output() {
        assert_eq!(Color::rgb(0xf2, 0xf2, 0xf7).to_css(), "#f2f2f7");
        assert_eq!(Color::CLEAR.to_css(), "rgba(0,0,0,0.000)");
    }
}
