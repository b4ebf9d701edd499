//! impress-colors: Symbol-to-color assignment tables.
//!
//! A [`ColorTable`] hands out a stable color for every string key it sees
//! (sample names, feature names, track labels). Colors come from a palette
//! in first-seen order, then from a deterministic fallback generator once
//! the palette runs out. A fixed default color overrides both.
//!
//! Tables persist as a compact blob (`key=R,G,B;key=R,G,B`) stored under
//! the `colorMap` session property, and restore to the exact same
//! assignments without re-running the policy.

#[cfg(feature = "native")]
uniffi::setup_scaffolding!();

pub mod color;
pub mod config;
pub mod error;
pub mod fallback;
pub mod palette;
pub mod shared;
pub mod table;

pub use color::*;
pub use config::*;
pub use error::*;
pub use fallback::*;
pub use palette::*;
pub use shared::*;
pub use table::*;
