//! Logical colors and the pixel-format transform.
//!
//! Colors are written in code as `0xRRGGBBAA`. The pixel buffer stores them in the
//! destination's channel order, which is the same value with its bytes reversed
//! (`0xAABBGGRR`). [`to_native`] and [`from_native`] are the only places that
//! translation happens.

pub const BACKGROUND: u32 = 0x000000FF;
pub const WIREFRAME: u32 = 0xFFFFFFFF;
pub const FILL: u32 = 0xFF0000FF;

pub const WHITE: u32 = 0xFFFFFFFF;
pub const BLACK: u32 = 0x000000FF;
pub const RED: u32 = 0xFF0000FF;
pub const GREEN: u32 = 0x00FF00FF;
pub const BLUE: u32 = 0x0000FFFF;

/// Packs 8-bit channels into a logical `0xRRGGBBAA` color.
#[inline]
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32)
}

/// Splits a logical color into `(r, g, b, a)`.
#[inline]
pub const fn channels(color: u32) -> (u8, u8, u8, u8) {
    (
        (color >> 24) as u8,
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
    )
}

/// Converts a logical color to the value stored in the pixel buffer.
///
/// Each byte moves to the mirrored position: R lands in the low byte, A in the high.
#[inline]
pub const fn to_native(color: u32) -> u32 {
    ((color & 0xff) << 24)
        | (((color >> 8) & 0xff) << 16)
        | (((color >> 16) & 0xff) << 8)
        | ((color >> 24) & 0xff)
}

/// Inverse of [`to_native`].
#[inline]
pub const fn from_native(native: u32) -> u32 {
    // A byte reversal is its own inverse.
    to_native(native)
}
