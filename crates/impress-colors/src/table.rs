//! Symbol-to-color assignment table.
//!
//! Keys are case insensitive: every key is lowercased before it is stored
//! or looked up. A key that misses the cache gets the color for the next
//! assignment index, which is the number of entries already cached:
//!
//! 1. the default color, if one is configured;
//! 2. otherwise `palette[index]` while the palette lasts;
//! 3. otherwise [`fallback_color(index)`](crate::fallback_color).
//!
//! Once cached, a key keeps its color until it is overwritten with
//! [`ColorTable::put`] or the whole table is replaced by a restore.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::color::Color;
use crate::error::{ColorError, ColorResult};
use crate::fallback::fallback_color;
use crate::palette::ColorPalette;

/// Session property holding the serialized color map.
pub const PERSISTENT_STATE_KEY: &str = "colorMap";

const ENTRY_SEPARATOR: &str = ";";
const KEY_VALUE_SEPARATOR: &str = "=";

/// A lookup table mapping symbols to colors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorTable {
    colors: IndexMap<String, Color>,
    palette: Option<ColorPalette>,
    default_color: Option<Color>,
}

impl ColorTable {
    /// Create an empty table with neither palette nor default color.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table that gives every new key the same color.
    pub fn with_default_color(color: Color) -> Self {
        Self {
            default_color: Some(color),
            ..Self::default()
        }
    }

    /// Create a table that draws new colors from a palette.
    pub fn with_palette(palette: ColorPalette) -> Self {
        Self {
            palette: Some(palette),
            ..Self::default()
        }
    }

    /// Create a table with both a palette and a default color.
    ///
    /// The default color wins; the palette is kept only for inspection.
    pub fn with_palette_and_default(palette: ColorPalette, color: Color) -> Self {
        Self {
            colors: IndexMap::new(),
            palette: Some(palette),
            default_color: Some(color),
        }
    }

    /// Get the color for a key, assigning one on first use.
    pub fn get(&mut self, key: &str) -> Color {
        let key = normalize_key(key);
        if let Some(color) = self.colors.get(&key) {
            return *color;
        }

        let color = self.compute_color();
        tracing::debug!(
            "Assigned color {} to '{}' at index {}",
            color,
            key,
            self.colors.len()
        );
        self.colors.insert(key, color);
        color
    }

    /// The color the next unseen key would receive.
    pub fn compute_color(&self) -> Color {
        if let Some(color) = self.default_color {
            return color;
        }

        let index = self.colors.len();
        self.palette
            .as_ref()
            .and_then(|p| p.get(index))
            .unwrap_or_else(|| fallback_color(index))
    }

    /// Explicitly assign a color to a key.
    ///
    /// A new key takes the next slot in the assignment order; an existing
    /// key keeps its slot and only its color changes.
    pub fn put(&mut self, key: &str, color: Color) {
        self.colors.insert(normalize_key(key), color);
    }

    /// Look up a key without assigning a color on a miss.
    pub fn peek(&self, key: &str) -> Option<Color> {
        self.colors.get(&normalize_key(key)).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.colors.contains_key(&normalize_key(key))
    }

    /// All cached keys in assignment order.
    pub fn keys(&self) -> Vec<String> {
        self.colors.keys().cloned().collect()
    }

    /// All cached entries in assignment order.
    pub fn entries(&self) -> Vec<(String, Color)> {
        self.colors.iter().map(|(k, c)| (k.clone(), *c)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> + '_ {
        self.colors.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// The underlying ordered map.
    pub fn color_map(&self) -> &IndexMap<String, Color> {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn palette(&self) -> Option<&ColorPalette> {
        self.palette.as_ref()
    }

    pub fn default_color(&self) -> Option<Color> {
        self.default_color
    }

    /// Encode every entry as `key=R,G,B` joined by `;`, in assignment order.
    ///
    /// `%`, `;` and `=` inside keys are percent-escaped.
    pub fn serialize(&self) -> String {
        self.colors
            .iter()
            .map(|(key, color)| {
                format!(
                    "{}{}{}",
                    escape_key(key),
                    KEY_VALUE_SEPARATOR,
                    color.to_persistent_string()
                )
            })
            .collect::<Vec<_>>()
            .join(ENTRY_SEPARATOR)
    }

    /// Replace the table contents with a serialized color map.
    ///
    /// An empty blob is a no-op. The whole blob is parsed before anything
    /// changes: on error the table keeps its previous contents.
    pub fn deserialize(&mut self, blob: &str) -> ColorResult<()> {
        if blob.is_empty() {
            return Ok(());
        }

        match parse_color_map(blob) {
            Ok(colors) => {
                tracing::debug!("Restored {} color assignments", colors.len());
                self.colors = colors;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Rejected color map restore: {}", e);
                Err(e)
            }
        }
    }

    /// Object state as a map of key-value string pairs.
    pub fn persistent_state(&self) -> HashMap<String, String> {
        let mut state = HashMap::new();
        if !self.colors.is_empty() {
            state.insert(PERSISTENT_STATE_KEY.to_string(), self.serialize());
        }
        state
    }

    /// Restore object state from a map of key-value string pairs.
    pub fn restore_persistent_state(
        &mut self,
        values: &HashMap<String, String>,
    ) -> ColorResult<()> {
        match values.get(PERSISTENT_STATE_KEY) {
            Some(blob) => self.deserialize(blob),
            None => Ok(()),
        }
    }
}

fn normalize_key(key: &str) -> String {
    key.to_lowercase()
}

// Only the separators and `%` are escaped so persisted keys stay readable;
// `urlencoding::encode` would also escape spaces and punctuation.
fn escape_key(key: &str) -> String {
    let mut escaped = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            ';' => escaped.push_str("%3B"),
            '=' => escaped.push_str("%3D"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn parse_color_map(blob: &str) -> ColorResult<IndexMap<String, Color>> {
    let mut colors = IndexMap::new();

    for entry in blob.trim_end_matches(ENTRY_SEPARATOR).split(ENTRY_SEPARATOR) {
        let (raw_key, raw_color) = entry
            .split_once(KEY_VALUE_SEPARATOR)
            .ok_or_else(|| ColorError::parse(entry, "missing '='"))?;

        let key = urlencoding::decode(raw_key)
            .map_err(|e| ColorError::parse(entry, format!("bad key encoding: {}", e)))?;

        let color = Color::parse(raw_color).map_err(|e| ColorError::parse(entry, e.to_string()))?;
        colors.insert(normalize_key(&key), color);
    }

    Ok(colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_palette() -> ColorPalette {
        ColorPalette::new(
            "rgb",
            vec![Color::rgb(255, 0, 0), Color::rgb(0, 255, 0), Color::rgb(0, 0, 255)],
        )
    }

    #[test]
    fn get_is_idempotent() {
        let mut table = ColorTable::new();
        let first = table.get("chr1");
        let second = table.get("chr1");
        assert_eq!(first, second);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn keys_are_case_insensitive() {
        let mut table = ColorTable::new();
        table.put("Foo", Color::rgb(1, 2, 3));
        assert_eq!(table.get("foo"), Color::rgb(1, 2, 3));
        assert_eq!(table.get("FOO"), Color::rgb(1, 2, 3));
        assert_eq!(table.keys(), vec!["foo"]);
    }

    #[test]
    fn palette_then_fallback() {
        let mut table = ColorTable::with_palette(rgb_palette());
        assert_eq!(table.get("a"), Color::rgb(255, 0, 0));
        assert_eq!(table.get("b"), Color::rgb(0, 255, 0));
        assert_eq!(table.get("c"), Color::rgb(0, 0, 255));
        assert_eq!(table.get("d"), fallback_color(3));
    }

    #[test]
    fn no_palette_uses_fallback_by_index() {
        let mut table = ColorTable::new();
        assert_eq!(table.get("x"), fallback_color(0));
        assert_eq!(table.get("y"), fallback_color(1));
    }

    #[test]
    fn default_color_wins() {
        let yellow = Color::rgb(255, 255, 0);
        let mut table = ColorTable::with_palette_and_default(rgb_palette(), yellow);
        for key in ["a", "b", "c", "d"] {
            assert_eq!(table.get(key), yellow);
        }
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn put_consumes_a_slot() {
        let mut table = ColorTable::with_palette(rgb_palette());
        table.put("k", Color::rgb(9, 9, 9));
        assert_eq!(table.get("other"), Color::rgb(0, 255, 0));
    }

    #[test]
    fn put_overwrite_keeps_position() {
        let mut table = ColorTable::with_palette(rgb_palette());
        table.get("a");
        table.get("b");
        table.put("A", Color::rgb(7, 7, 7));
        assert_eq!(table.keys(), vec!["a", "b"]);
        assert_eq!(table.peek("b"), Some(Color::rgb(0, 255, 0)));
        assert_eq!(table.get("c"), Color::rgb(0, 0, 255));
    }

    #[test]
    fn peek_does_not_assign() {
        let table = ColorTable::new();
        assert_eq!(table.peek("ghost"), None);
        assert!(!table.contains("ghost"));
        assert!(table.is_empty());
    }

    #[test]
    fn serialize_format() {
        let mut table = ColorTable::new();
        table.put("x", Color::rgb(1, 2, 3));
        table.put("y", Color::new(4, 5, 6, 7));
        assert_eq!(table.serialize(), "x=1,2,3;y=4,5,6,7");
        assert_eq!(ColorTable::new().serialize(), "");
    }

    #[test]
    fn serialize_escapes_separators() {
        let mut table = ColorTable::new();
        table.put("a;b=c%d", Color::rgb(1, 1, 1));
        assert_eq!(table.serialize(), "a%3Bb%3Dc%25d=1,1,1");
    }

    #[test]
    fn deserialize_replaces_contents() {
        let mut table = ColorTable::new();
        table.get("old");
        table.deserialize("p=1,2,3;q=#0A0B0C").unwrap();
        assert_eq!(
            table.entries(),
            vec![
                ("p".to_string(), Color::rgb(1, 2, 3)),
                ("q".to_string(), Color::rgb(10, 11, 12)),
            ]
        );
    }

    #[test]
    fn deserialize_failure_keeps_previous_state() {
        let mut table = ColorTable::new();
        table.put("keep", Color::rgb(1, 1, 1));
        let before = table.clone();

        assert!(table.deserialize("a=1,2,3;broken").is_err());
        assert!(table.deserialize("a=1,2,3;b=not-a-color").is_err());
        assert!(table.deserialize("   ").is_err());
        assert_eq!(table, before);
    }

    #[test]
    fn deserialize_accepts_empty_key() {
        let mut table = ColorTable::new();
        table.deserialize("=1,2,3").unwrap();
        assert_eq!(table.peek(""), Some(Color::rgb(1, 2, 3)));
    }

    #[test]
    fn empty_key_survives_roundtrip() {
        let mut table = ColorTable::new();
        table.get("a");
        table.get("");
        let blob = table.serialize();

        let mut restored = ColorTable::new();
        restored.deserialize(&blob).unwrap();
        assert_eq!(restored.entries(), table.entries());
    }

    #[test]
    fn deserialize_tolerates_trailing_separator() {
        let mut table = ColorTable::new();
        table.deserialize("a=1,2,3;").unwrap();
        assert_eq!(table.keys(), vec!["a"]);
    }

    #[test]
    fn deserialize_lowercases_keys() {
        let mut table = ColorTable::new();
        table.deserialize("Sample1=1,2,3").unwrap();
        assert_eq!(table.peek("SAMPLE1"), Some(Color::rgb(1, 2, 3)));
        assert_eq!(table.keys(), vec!["sample1"]);
    }

    #[test]
    fn persistent_state_roundtrip() {
        let mut table = ColorTable::new();
        assert!(table.persistent_state().is_empty());

        table.get("x");
        let state = table.persistent_state();
        assert_eq!(state.get(PERSISTENT_STATE_KEY), Some(&table.serialize()));

        let mut restored = ColorTable::new();
        restored.restore_persistent_state(&state).unwrap();
        assert_eq!(restored.entries(), table.entries());
    }

    #[test]
    fn restore_without_property_is_noop() {
        let mut table = ColorTable::new();
        table.get("x");
        table.restore_persistent_state(&HashMap::new()).unwrap();
        assert_eq!(table.len(), 1);
    }
}
