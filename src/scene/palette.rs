//! Fixed scene palette with weighted random selection.

use glam::Vec3;
use rand::Rng;

/// Darker, richer emerald.
pub const EMERALD_HEX: u32 = 0x003319;
/// Wine/velvet red.
pub const DEEP_RED_HEX: u32 = 0x720e1e;
/// Bronze gold.
pub const TEXTURED_GOLD_HEX: u32 = 0xC5A059;
/// Classic gold.
pub const BRIGHT_GOLD_HEX: u32 = 0xFFD700;

/// Cumulative selection weights for the luxury palette. Bright gold takes
/// the remainder (0.10).
const W_EMERALD: f32 = 0.45;
const W_DEEP_RED: f32 = 0.20;
const W_TEXTURED_GOLD: f32 = 0.25;

/// Convert one sRGB-encoded channel in [0,1] to linear.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Decode a 24-bit sRGB hex color into linear RGB.
pub fn hex_to_linear(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec3::new(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
}

/// One color per point, selected by cumulative weight from the four-color
/// luxury palette.
pub fn generate_luxury_colors(
    rng: &mut impl Rng,
    count: usize,
) -> Vec<Vec3> {
    let emerald = hex_to_linear(EMERALD_HEX);
    let deep_red = hex_to_linear(DEEP_RED_HEX);
    let textured_gold = hex_to_linear(TEXTURED_GOLD_HEX);
    let bright_gold = hex_to_linear(BRIGHT_GOLD_HEX);

    let mut colors = Vec::with_capacity(count);
    for _ in 0..count {
        let u = rng.random::<f32>();
        let color = if u < W_EMERALD {
            emerald
        } else if u < W_EMERALD + W_DEEP_RED {
            deep_red
        } else if u < W_EMERALD + W_DEEP_RED + W_TEXTURED_GOLD {
            textured_gold
        } else {
            bright_gold
        };
        colors.push(color);
    }
    colors
}

/// One color per instance, a 50/50 draw between deep red and bright gold.
pub fn generate_ribbon_colors(
    rng: &mut impl Rng,
    count: usize,
) -> Vec<Vec3> {
    let deep_red = hex_to_linear(DEEP_RED_HEX);
    let bright_gold = hex_to_linear(BRIGHT_GOLD_HEX);

    let mut colors = Vec::with_capacity(count);
    for _ in 0..count {
        let color = if rng.random::<f32>() > 0.5 {
            deep_red
        } else {
            bright_gold
        };
        colors.push(color);
    }
    colors
}
