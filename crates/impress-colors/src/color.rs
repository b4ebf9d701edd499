//! RGBA color value and its persistent text encoding.
//!
//! The persistent form is decimal components separated by commas:
//! `R,G,B` for opaque colors and `R,G,B,A` otherwise. It never contains
//! `;` or `=`, so it can sit inside a color map blob unescaped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ColorError, ColorResult};

/// A color with 8-bit RGBA channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[cfg_attr(feature = "native", derive(uniffi::Record))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a color from all four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create an opaque color from a packed `0xRRGGBB` value.
    pub const fn from_u32(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Whether the alpha channel is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Encode for persistence (`R,G,B` or `R,G,B,A`).
    pub fn to_persistent_string(&self) -> String {
        if self.is_opaque() {
            format!("{},{},{}", self.r, self.g, self.b)
        } else {
            format!("{},{},{},{}", self.r, self.g, self.b, self.a)
        }
    }

    /// Convert to hex string (`#RRGGBB`, or `#RRGGBBAA` when translucent).
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Parse any accepted color encoding.
    ///
    /// Accepts `R,G,B`, `R,G,B,A`, `#RRGGBB`, `#RRGGBBAA` and `RRGGBB`.
    ///
    /// # Examples
    /// ```
    /// use impress_colors::Color;
    /// assert_eq!(Color::parse("255,0,0").unwrap(), Color::rgb(255, 0, 0));
    /// assert_eq!(Color::parse("#00FF00").unwrap(), Color::rgb(0, 255, 0));
    /// assert!(Color::parse("teal-ish").is_err());
    /// ```
    pub fn parse(input: &str) -> ColorResult<Self> {
        let s = input.trim();
        let color = if s.contains(',') {
            Self::parse_components(s)
        } else {
            Self::parse_hex(s)
        };
        color.ok_or_else(|| ColorError::InvalidColor(input.to_string()))
    }

    fn parse_components(s: &str) -> Option<Self> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<u8>().ok())
            .collect::<Option<Vec<u8>>>()?;

        match parts.as_slice() {
            [r, g, b] => Some(Self::rgb(*r, *g, *b)),
            [r, g, b, a] => Some(Self::new(*r, *g, *b, *a)),
            _ => None,
        }
    }

    fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_persistent_string())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_persistent_string()
    }
}
