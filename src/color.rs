//! Named colors and small color helpers.
//!
//! Colors are stored as 8-bit sRGB. Translucent fills pair a color with an
//! explicit alpha via [`WithAlpha`].

use palette::{Srgb, Srgba, WithAlpha};
use resvg::tiny_skia;

/// Primary teal, `#0D9488`.
pub const TEAL: Srgb<u8> = Srgb::new(13, 148, 136);
/// Darker teal used for shadows and the progress track.
pub const TEAL_DARK: Srgb<u8> = Srgb::new(15, 118, 110);
/// Lighter teal used for the specular highlight.
pub const TEAL_LIGHT: Srgb<u8> = Srgb::new(20, 184, 166);
/// Stem green.
pub const STEM_GREEN: Srgb<u8> = Srgb::new(34, 197, 94);
pub const WHITE: Srgb<u8> = Srgb::new(255, 255, 255);

/// Top of the clean installer background gradient.
pub const CLEAN_TOP: Srgb<u8> = Srgb::new(22, 22, 26);
/// Bottom of the clean installer background gradient.
pub const CLEAN_BOTTOM: Srgb<u8> = Srgb::new(32, 32, 38);

/// Top of the textured installer background gradient.
pub const TEXTURED_TOP: Srgb<u8> = Srgb::new(24, 24, 27);
/// Bottom of the textured installer background gradient.
pub const TEXTURED_BOTTOM: Srgb<u8> = Srgb::new(18, 18, 22);

/// Returns `color` fully opaque.
pub fn opaque(color: Srgb<u8>) -> Srgba<u8> {
    color.with_alpha(255)
}

/// Returns `color` with the given alpha.
pub fn translucent(color: Srgb<u8>, alpha: u8) -> Srgba<u8> {
    color.with_alpha(alpha)
}

/// Linearly interpolates each channel from `from` to `to`.
///
/// The result is truncated toward zero, so `t` slightly below 1.0 may land
/// one step short of `to`.
pub fn lerp(from: Srgb<u8>, to: Srgb<u8>, t: f32) -> Srgb<u8> {
    let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
    Srgb::new(
        channel(from.red, to.red),
        channel(from.green, to.green),
        channel(from.blue, to.blue),
    )
}

/// Converts to the rasterizer's color type.
pub(crate) fn to_skia(color: Srgba<u8>) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.red, color.green, color.blue, color.alpha)
}
