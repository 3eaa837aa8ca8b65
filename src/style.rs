//! Colours and the note palette

use serde::{Deserialize, Serialize};

use crate::errors::NoteError;

/// RGBA color (0.0-1.0 range for D2D compatibility)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Create color from RGB values (0-255)
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create color from RGBA values (0-255)
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Parse hex color string (#RGB, #RGBA, #RRGGBB, #RRGGBBAA)
    pub fn from_hex(hex: &str) -> Result<Self, NoteError> {
        let digits = hex.trim().trim_start_matches('#');
        let bad = || NoteError::Color(hex.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }

        let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);

        let parsed = match digits.len() {
            3 => (nibble(0), nibble(1), nibble(2), Ok(255)),
            4 => (nibble(0), nibble(1), nibble(2), nibble(3)),
            6 => (byte(0), byte(2), byte(4), Ok(255)),
            8 => (byte(0), byte(2), byte(4), byte(6)),
            _ => return Err(bad()),
        };

        match parsed {
            (Ok(r), Ok(g), Ok(b), Ok(a)) => Ok(Self::rgba(r, g, b, a)),
            _ => Err(bad()),
        }
    }

    /// Win32 COLORREF layout (0x00BBGGRR), alpha dropped
    pub fn to_colorref(&self) -> u32 {
        let r = (self.r * 255.0).round() as u32;
        let g = (self.g * 255.0).round() as u32;
        let b = (self.b * 255.0).round() as u32;
        (b << 16) | (g << 8) | r
    }
}

/// Optional `[palette]` overrides from settings.toml
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PaletteOverrides {
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub title_bar: Option<String>,
    #[serde(default)]
    pub border: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Every colour the note chrome uses
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub title_bar: Color,
    pub border: Color,
    pub text: Color,
    pub pin_checked: Color,
    pub button_hover: Color,
    pub close_hover: Color,
    pub close_glyph: Color,
    pub close_glyph_hover: Color,
    pub pin_glyph: Color,
    pub save_text: Color,
    pub save_border: Color,
    pub save_hover: Color,
    pub save_pressed: Color,
    pub grip: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgb(0xFF, 0xFF, 0xF0),
            title_bar: Color::rgb(0xF8, 0xF8, 0xF0),
            border: Color::rgb(0xE0, 0xE0, 0xE0),
            text: Color::BLACK,
            pin_checked: Color::rgb(0x00, 0x78, 0xD7),
            button_hover: Color::rgb(0xE0, 0xE0, 0xE0),
            close_hover: Color::rgb(0xE8, 0x11, 0x23),
            close_glyph: Color::rgb(0x88, 0x88, 0x88),
            close_glyph_hover: Color::WHITE,
            pin_glyph: Color::rgb(0xD0, 0x30, 0x30),
            save_text: Color::rgb(0x55, 0x55, 0x55),
            save_border: Color::rgb(0xE0, 0xE0, 0xE0),
            save_hover: Color::rgb(0xF0, 0xF0, 0xF0),
            save_pressed: Color::rgb(0xE0, 0xE0, 0xE0),
            grip: Color::rgb(0xB0, 0xB0, 0xB0),
        }
    }
}

impl Palette {
    /// Apply overrides; an unparsable colour is logged and ignored
    pub fn with_overrides(overrides: &PaletteOverrides) -> Self {
        let mut palette = Self::default();
        apply(&mut palette.background, overrides.background.as_deref());
        apply(&mut palette.title_bar, overrides.title_bar.as_deref());
        apply(&mut palette.border, overrides.border.as_deref());
        apply(&mut palette.text, overrides.text.as_deref());
        palette
    }
}

fn apply(slot: &mut Color, hex: Option<&str>) {
    let Some(hex) = hex else {
        return;
    };
    match Color::from_hex(hex) {
        Ok(color) => *slot = color,
        Err(e) => log!("Palette override ignored: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_forms() {
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::from_hex("#000F").unwrap(), Color::BLACK);
        assert_eq!(
            Color::from_hex("#FFFFF0").unwrap(),
            Color::rgb(0xFF, 0xFF, 0xF0)
        );
        assert_eq!(
            Color::from_hex("E8112380").unwrap(),
            Color::rgba(0xE8, 0x11, 0x23, 0x80)
        );
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert!(Color::from_hex("").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_colorref_byte_order() {
        let c = Color::rgb(0x11, 0x22, 0x33);
        assert_eq!(c.to_colorref(), 0x0033_2211);
    }

    #[test]
    fn test_palette_overrides() {
        let overrides = PaletteOverrides {
            background: Some("#202020".to_string()),
            border: Some("not a colour".to_string()),
            ..Default::default()
        };
        let palette = Palette::with_overrides(&overrides);

        assert_eq!(palette.background, Color::rgb(0x20, 0x20, 0x20));
        assert_eq!(palette.border, Palette::default().border);
        assert_eq!(palette.title_bar, Palette::default().title_bar);
    }
}
