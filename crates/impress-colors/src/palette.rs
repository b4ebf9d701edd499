//! Named color palettes.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ColorResult;

/// An ordered, fixed sequence of colors handed out in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "native", derive(uniffi::Record))]
pub struct ColorPalette {
    pub name: String,
    pub colors: Vec<Color>,
}

impl ColorPalette {
    /// Create a palette from a list of colors.
    pub fn new(name: impl Into<String>, colors: Vec<Color>) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    /// Create a palette from color strings (hex or `R,G,B`).
    pub fn from_strings(name: impl Into<String>, colors: &[&str]) -> ColorResult<Self> {
        let colors = colors
            .iter()
            .map(|c| Color::parse(c))
            .collect::<ColorResult<Vec<_>>>()?;
        Ok(Self::new(name, colors))
    }

    /// Look up a built-in palette by name (case insensitive).
    pub fn builtin(name: &str) -> Option<Self> {
        BUILTIN_PALETTES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(n, rgb)| Self::new(*n, rgb.iter().map(|v| Color::from_u32(*v)).collect()))
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Built-in qualitative palettes (ColorBrewer).
pub const BUILTIN_PALETTES: &[(&str, &[u32])] = &[
    (
        "set1",
        &[
            0xE41A1C, 0x377EB8, 0x4DAF4A, 0x984EA3, 0xFF7F00, 0xFFFF33, 0xA65628, 0xF781BF,
            0x999999,
        ],
    ),
    (
        "set2",
        &[
            0x66C2A5, 0xFC8D62, 0x8DA0CB, 0xE78AC3, 0xA6D854, 0xFFD92F, 0xE5C494, 0xB3B3B3,
        ],
    ),
    (
        "set3",
        &[
            0x8DD3C7, 0xFFFFB3, 0xBEBADA, 0xFB8072, 0x80B1D3, 0xFDB462, 0xB3DE69, 0xFCCDE5,
            0xD9D9D9, 0xBC80BD, 0xCCEBC5, 0xFFED6F,
        ],
    ),
    (
        "dark2",
        &[
            0x1B9E77, 0xD95F02, 0x7570B3, 0xE7298A, 0x66A61E, 0xE6AB02, 0xA6761D, 0x666666,
        ],
    ),
    (
        "pastel1",
        &[
            0xFBB4AE, 0xB3CDE3, 0xCCEBC5, 0xDECBE4, 0xFED9A6, 0xFFFFCC, 0xE5D8BD, 0xFDDAEC,
            0xF2F2F2,
        ],
    ),
    (
        "paired",
        &[
            0xA6CEE3, 0x1F78B4, 0xB2DF8A, 0x33A02C, 0xFB9A99, 0xE31A1C, 0xFDBF6F, 0xFF7F00,
            0xCAB2D6, 0x6A3D9A, 0xFFFF99, 0xB15928,
        ],
    ),
];

/// Look up a built-in palette by name.
#[cfg_attr(feature = "native", uniffi::export)]
pub fn builtin_palette(name: &str) -> Option<ColorPalette> {
    ColorPalette::builtin(name)
}

/// Names of all built-in palettes.
#[cfg_attr(feature = "native", uniffi::export)]
pub fn builtin_palette_names() -> Vec<String> {
    BUILTIN_PALETTES.iter().map(|(n, _)| n.to_string()).collect()
}
