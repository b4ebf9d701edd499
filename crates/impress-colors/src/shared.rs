//! Lock-wrapped color table for callers that share one table.
//!
//! `get` reads and inserts in one step, so two unsynchronized callers
//! could both claim the same assignment index. Every method here holds a
//! single mutex for its whole duration, which also makes restores atomic
//! with respect to lookups.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::ColorTableConfig;
use crate::error::ColorResult;
use crate::palette::ColorPalette;
use crate::table::ColorTable;

/// A key and its assigned color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "native", derive(uniffi::Record))]
pub struct ColorEntry {
    pub key: String,
    pub color: Color,
}

/// Thread-safe handle around a [`ColorTable`].
#[derive(Debug, Default)]
#[cfg_attr(feature = "native", derive(uniffi::Object))]
pub struct SharedColorTable {
    table: Mutex<ColorTable>,
}

/// Rust-only helpers (not exported via UniFFI).
impl SharedColorTable {
    pub fn from_table(table: ColorTable) -> Self {
        Self {
            table: Mutex::new(table),
        }
    }

    /// Run a closure with exclusive access to the table.
    pub fn with_table<R>(&self, f: impl FnOnce(&mut ColorTable) -> R) -> R {
        f(&mut self.lock())
    }

    /// Copy out the current table.
    pub fn snapshot(&self) -> ColorTable {
        self.lock().clone()
    }

    // Table mutations never stop halfway, so a poisoned lock still guards
    // a consistent table.
    fn lock(&self) -> MutexGuard<'_, ColorTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg_attr(feature = "native", uniffi::export)]
impl SharedColorTable {
    /// Create an empty table with neither palette nor default color.
    #[cfg_attr(feature = "native", uniffi::constructor)]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[cfg_attr(feature = "native", uniffi::constructor)]
    pub fn with_palette(palette: ColorPalette) -> Arc<Self> {
        Arc::new(Self::from_table(ColorTable::with_palette(palette)))
    }

    #[cfg_attr(feature = "native", uniffi::constructor)]
    pub fn with_default_color(color: Color) -> Arc<Self> {
        Arc::new(Self::from_table(ColorTable::with_default_color(color)))
    }

    /// Palette and default color together; the default color wins.
    #[cfg_attr(feature = "native", uniffi::constructor)]
    pub fn with_palette_and_default(palette: ColorPalette, color: Color) -> Arc<Self> {
        Arc::new(Self::from_table(ColorTable::with_palette_and_default(
            palette, color,
        )))
    }

    /// Build a table from a TOML configuration document.
    #[cfg_attr(feature = "native", uniffi::constructor)]
    pub fn from_config_toml(document: &str) -> ColorResult<Arc<Self>> {
        let table = ColorTableConfig::from_toml(document)?.build()?;
        Ok(Arc::new(Self::from_table(table)))
    }

    pub fn get(&self, key: &str) -> Color {
        self.lock().get(key)
    }

    pub fn put(&self, key: &str, color: Color) {
        self.lock().put(key, color);
    }

    pub fn peek(&self, key: &str) -> Option<Color> {
        self.lock().peek(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.lock().keys()
    }

    pub fn entries(&self) -> Vec<ColorEntry> {
        self.lock()
            .iter()
            .map(|(key, color)| ColorEntry {
                key: key.to_string(),
                color,
            })
            .collect()
    }

    pub fn size(&self) -> u64 {
        self.lock().len() as u64
    }

    pub fn serialize(&self) -> String {
        self.lock().serialize()
    }

    pub fn deserialize(&self, blob: &str) -> ColorResult<()> {
        self.lock().deserialize(blob)
    }

    pub fn persistent_state(&self) -> HashMap<String, String> {
        self.lock().persistent_state()
    }

    pub fn restore_persistent_state(&self, values: HashMap<String, String>) -> ColorResult<()> {
        self.lock().restore_persistent_state(&values)
    }
}
