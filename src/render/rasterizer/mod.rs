//! Triangle rasterization algorithms.
//!
//! Two rasterizers fill the same pixels and can be swapped at runtime for testing and
//! benchmarking:
//! - [`ScanlineRasterizer`]: flat-top/flat-bottom decomposition filled by synchronized
//!   Bresenham edge walkers
//! - [`EdgeTableRasterizer`]: records every edge pixel in a per-row table, then fills
//!   each row

mod edgetable;
mod scanline;
mod walker;

pub use edgetable::EdgeTableRasterizer;
pub use scanline::ScanlineRasterizer;

use super::framebuffer::PixelSurface;
use super::{Point, Triangle};

/// Trait for triangle rasterization algorithms.
///
/// Implementors fill a triangle into the surface using the surface's current pen
/// color. Every pixel covered by the triangle's outline (as drawn by
/// [`PixelSurface::draw_triangle`] in any vertex order) is covered by the fill.
pub trait Rasterizer {
    fn fill_triangle(&self, triangle: &Triangle, surface: &mut PixelSurface);
}

/// Available rasterization algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterizerType {
    /// Scanline rasterizer using flat-top/flat-bottom triangle decomposition.
    #[default]
    Scanline,
    /// Per-row edge table built from the three outline edges.
    /// Allocates a table per triangle; kept as the reference fill.
    EdgeTable,
}

impl std::fmt::Display for RasterizerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RasterizerType::Scanline => write!(f, "Scanline"),
            RasterizerType::EdgeTable => write!(f, "EdgeTable"),
        }
    }
}

impl std::str::FromStr for RasterizerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scanline" => Ok(RasterizerType::Scanline),
            "edge-table" | "edgetable" => Ok(RasterizerType::EdgeTable),
            other => Err(format!("unknown rasterizer '{other}'")),
        }
    }
}

/// Dispatcher that holds both rasterizer implementations.
pub struct RasterizerDispatcher {
    scanline: ScanlineRasterizer,
    edge_table: EdgeTableRasterizer,
    active: RasterizerType,
}

impl RasterizerDispatcher {
    pub fn new(rasterizer_type: RasterizerType) -> Self {
        Self {
            scanline: ScanlineRasterizer::new(),
            edge_table: EdgeTableRasterizer::new(),
            active: rasterizer_type,
        }
    }

    pub fn set_type(&mut self, rasterizer_type: RasterizerType) {
        self.active = rasterizer_type;
    }

    pub fn active_type(&self) -> RasterizerType {
        self.active
    }
}

impl Default for RasterizerDispatcher {
    fn default() -> Self {
        Self::new(RasterizerType::default())
    }
}

impl Rasterizer for RasterizerDispatcher {
    #[inline]
    fn fill_triangle(&self, triangle: &Triangle, surface: &mut PixelSurface) {
        match self.active {
            RasterizerType::Scanline => self.scanline.fill_triangle(triangle, surface),
            RasterizerType::EdgeTable => self.edge_table.fill_triangle(triangle, surface),
        }
    }
}

impl PixelSurface {
    /// Fill the triangle (v0, v1, v2) with the pen color using the scanline rasterizer.
    pub fn draw_filled_triangle(&mut self, v0: Point, v1: Point, v2: Point) {
        ScanlineRasterizer::new().fill_triangle(&Triangle::new(v0, v1, v2), self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(rasterizer: &impl Rasterizer, triangle: Triangle) -> Vec<u32> {
        let mut surface = PixelSurface::new(32, 32);
        rasterizer.fill_triangle(&triangle, &mut surface);
        surface.pixels().to_vec()
    }

    fn grid_triangles() -> Vec<Triangle> {
        let coords = [0, 3, 7, 12, 20, 31];
        let points: Vec<Point> = coords
            .iter()
            .flat_map(|&x| coords.iter().map(move |&y| Point::new(x, y)))
            .collect();
        let mut triangles = Vec::new();
        for (i, &a) in points.iter().enumerate().step_by(5) {
            for (j, &b) in points.iter().enumerate().skip(i % 3).step_by(4) {
                for &c in points.iter().skip(j % 4).step_by(3) {
                    triangles.push(Triangle::new(a, b, c));
                }
            }
        }
        triangles
    }

    #[test]
    fn both_rasterizers_fill_the_same_pixels() {
        let scanline = ScanlineRasterizer::new();
        let edge_table = EdgeTableRasterizer::new();
        for triangle in grid_triangles() {
            assert_eq!(
                filled(&scanline, triangle),
                filled(&edge_table, triangle),
                "{triangle:?}"
            );
        }
    }

    #[test]
    fn dispatcher_switches_algorithms() {
        let mut dispatcher = RasterizerDispatcher::default();
        assert_eq!(dispatcher.active_type(), RasterizerType::Scanline);
        dispatcher.set_type(RasterizerType::EdgeTable);
        assert_eq!(dispatcher.active_type(), RasterizerType::EdgeTable);

        let triangle = Triangle::new(Point::new(2, 2), Point::new(20, 5), Point::new(9, 25));
        assert_eq!(
            filled(&dispatcher, triangle),
            filled(&EdgeTableRasterizer::new(), triangle)
        );
    }

    #[test]
    fn rasterizer_type_parses() {
        assert_eq!("scanline".parse::<RasterizerType>(), Ok(RasterizerType::Scanline));
        assert_eq!(
            "edge-table".parse::<RasterizerType>(),
            Ok(RasterizerType::EdgeTable)
        );
        assert!("bogus".parse::<RasterizerType>().is_err());
        assert_eq!(RasterizerType::EdgeTable.to_string(), "EdgeTable");
    }
}
