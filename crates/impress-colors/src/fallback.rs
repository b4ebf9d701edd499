//! Deterministic fallback colors for keys beyond the palette.
//!
//! Hue advances by the golden-ratio conjugate per index, which spreads
//! consecutive indices around the color wheel. Saturation and lightness
//! cycle through short tables so colors with similar hues still differ.
//! The generator is a pure function of the index.

use crate::color::Color;

const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;
const HUE_OFFSET: f64 = 0.13;
const SATURATIONS: [f64; 3] = [0.75, 0.55, 0.9];
const LIGHTNESSES: [f64; 3] = [0.5, 0.38, 0.62];

/// The fallback color for an assignment index.
///
/// # Examples
/// ```
/// use impress_colors::fallback_color;
/// assert_eq!(fallback_color(7), fallback_color(7));
/// assert_ne!(fallback_color(0), fallback_color(1));
/// ```
pub fn fallback_color(index: usize) -> Color {
    let hue = (HUE_OFFSET + index as f64 * GOLDEN_RATIO_CONJUGATE).fract();
    let saturation = SATURATIONS[index % SATURATIONS.len()];
    let lightness = LIGHTNESSES[(index / SATURATIONS.len()) % LIGHTNESSES.len()];
    hsl_to_rgb(hue, saturation, lightness)
}

/// Convert HSL (all components 0.0 to 1.0) to an opaque color.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Color {
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let sector = h * 6.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());

    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let m = l - chroma / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::rgb(channel(r), channel(g), channel(b))
}
