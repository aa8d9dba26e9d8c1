//! Scan conversion: the pixel surface, line drawing and triangle filling.

pub mod framebuffer;
pub mod line;
pub mod rasterizer;

pub use framebuffer::{Frame, PixelSurface};
pub use line::{LinePath, Ties};
pub use rasterizer::{
    EdgeTableRasterizer, Rasterizer, RasterizerDispatcher, RasterizerType, ScanlineRasterizer,
};

/// An integer screen-space point, origin at the bottom-left of the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A triangle ready for rasterization in screen space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub points: [Point; 3],
}

impl Triangle {
    pub const fn new(v0: Point, v1: Point, v2: Point) -> Self {
        Self {
            points: [v0, v1, v2],
        }
    }
}
