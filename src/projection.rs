//! Mapping from normalized vertex coordinates to screen pixels.
//!
//! The [`Viewport`] is the only coordinate transform in the pipeline: it stretches the
//! `[-1, 1]` square over the surface. There is no camera, perspective divide or
//! clipping; `z` and `w` are carried through the mesh but ignored here.

use crate::math::Vec4;
use crate::render::Point;

/// Normalized coordinates are clamped to `[-GUARD, GUARD]` before mapping, which
/// keeps every screen point within a few surface sizes of the visible area.
pub const GUARD: f32 = 16.0;

/// Surface dimensions used to place normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Map `x, y` in `[-1, 1]` to `((x + 1) * width / 2, (y + 1) * height / 2)`,
    /// truncated toward zero. Values outside the range land off the surface, but no
    /// further than [`GUARD`] allows. NaN maps to 0.
    pub fn to_screen(&self, v: Vec4) -> Point {
        Point::new(
            Self::axis(v.x, self.width),
            Self::axis(v.y, self.height),
        )
    }

    fn axis(ndc: f32, extent: u32) -> i32 {
        let ndc = ndc.clamp(-GUARD, GUARD);
        ((ndc + 1.0) * extent as f32 / 2.0) as i32
    }
}
