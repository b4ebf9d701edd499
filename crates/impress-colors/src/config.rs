//! Color table configuration.
//!
//! ```toml
//! palette = "set1"          # a built-in palette, or:
//! colors = ["#E41A1C", "55,126,184"]
//! default_color = "200,200,200"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{ColorError, ColorResult};
use crate::palette::ColorPalette;
use crate::table::ColorTable;

/// Name given to palettes declared inline with `colors`.
pub const CUSTOM_PALETTE_NAME: &str = "custom";

/// Settings for building a [`ColorTable`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorTableConfig {
    /// Name of a built-in palette
    pub palette: Option<String>,
    /// Inline palette colors
    pub colors: Vec<Color>,
    /// Color returned for every key, overriding the palette
    pub default_color: Option<Color>,
}

impl ColorTableConfig {
    /// Create an empty configuration (fallback colors only)
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> ColorResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> ColorResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> ColorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from a file; `.json` files are read as JSON,
    /// anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> ColorResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json(&content)?,
            _ => Self::from_toml(&content)?,
        };
        tracing::debug!("Loaded color table config from {:?}", path);
        Ok(config)
    }

    /// Resolve the configured palette, if any.
    pub fn resolve_palette(&self) -> ColorResult<Option<ColorPalette>> {
        match (&self.palette, self.colors.is_empty()) {
            (Some(_), false) => Err(ColorError::InvalidConfig(
                "set either 'palette' or 'colors', not both".to_string(),
            )),
            (Some(name), true) => ColorPalette::builtin(name)
                .map(Some)
                .ok_or_else(|| ColorError::UnknownPalette(name.clone())),
            (None, false) => Ok(Some(ColorPalette::new(
                CUSTOM_PALETTE_NAME,
                self.colors.clone(),
            ))),
            (None, true) => Ok(None),
        }
    }

    /// Build an empty table from this configuration.
    pub fn build(&self) -> ColorResult<ColorTable> {
        let palette = self.resolve_palette()?;
        Ok(match (palette, self.default_color) {
            (Some(p), Some(c)) => ColorTable::with_palette_and_default(p, c),
            (Some(p), None) => ColorTable::with_palette(p),
            (None, Some(c)) => ColorTable::with_default_color(c),
            (None, None) => ColorTable::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_builds_plain_table() {
        let table = ColorTableConfig::from_toml("").unwrap().build().unwrap();
        assert!(table.palette().is_none());
        assert!(table.default_color().is_none());
        assert_eq!(ColorTableConfig::new(), ColorTableConfig::default());
    }

    #[test]
    fn builtin_palette_by_name() {
        let config = ColorTableConfig::from_toml(r#"palette = "Dark2""#).unwrap();
        let table = config.build().unwrap();
        assert_eq!(table.palette().unwrap().name, "dark2");
    }

    #[test]
    fn inline_colors() {
        let config = ColorTableConfig::from_toml(
            r##"
colors = ["#FF0000", "0,255,0"]
default_color = "1,2,3,4"
"##,
        )
        .unwrap();
        let table = config.build().unwrap();
        let palette = table.palette().unwrap();
        assert_eq!(palette.name, CUSTOM_PALETTE_NAME);
        assert_eq!(palette.colors(), &[Color::rgb(255, 0, 0), Color::rgb(0, 255, 0)]);
        assert_eq!(table.default_color(), Some(Color::new(1, 2, 3, 4)));
    }

    #[test]
    fn palette_and_colors_conflict() {
        let config = ColorTableConfig {
            palette: Some("set1".to_string()),
            colors: vec![Color::rgb(0, 0, 0)],
            default_color: None,
        };
        assert!(matches!(config.build(), Err(ColorError::InvalidConfig(_))));
    }

    #[test]
    fn unknown_palette() {
        let config = ColorTableConfig::from_toml(r#"palette = "rainbow""#).unwrap();
        assert!(matches!(
            config.build(),
            Err(ColorError::UnknownPalette(name)) if name == "rainbow"
        ));
    }

    #[test]
    fn invalid_color_is_toml_error() {
        assert!(matches!(
            ColorTableConfig::from_toml(r#"default_color = "bogus""#),
            Err(ColorError::Toml(_))
        ));
    }

    #[test]
    fn json_roundtrip() {
        let config = ColorTableConfig {
            palette: None,
            colors: vec![Color::rgb(9, 8, 7)],
            default_color: Some(Color::rgb(1, 1, 1)),
        };
        let json = config.to_json().unwrap();
        assert_eq!(ColorTableConfig::from_json(&json).unwrap(), config);
    }
}
