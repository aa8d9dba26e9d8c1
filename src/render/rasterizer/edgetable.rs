//! Edge-table triangle rasterization.
//!
//! The reference fill: trace the triangle's three outline edges (each in both
//! directions), keep the leftmost and rightmost x seen on every row in a table, then
//! fill each row between them. No sorting or decomposition, at the cost of a table
//! allocation per triangle.

use super::{Rasterizer, Triangle};
use crate::render::framebuffer::PixelSurface;
use crate::render::{LinePath, Ties};

/// Rasterizer that fills rows from a per-triangle edge table.
pub struct EdgeTableRasterizer;

impl EdgeTableRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EdgeTableRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for EdgeTableRasterizer {
    fn fill_triangle(&self, triangle: &Triangle, surface: &mut PixelSurface) {
        let [v0, v1, v2] = triangle.points;
        // Only rows on the surface get a table entry; the rest can never be drawn.
        let y_min = v0.y.min(v1.y).min(v2.y).max(0);
        let y_max = v0.y.max(v1.y).max(v2.y).min(surface.height() as i32 - 1);
        if y_min > y_max {
            return;
        }

        // (x_min, x_max) per row, indexed from y_min
        let mut table: Vec<Option<(i32, i32)>> = vec![None; (y_max - y_min) as usize + 1];

        for (from, to) in [(v0, v1), (v1, v2), (v2, v0)] {
            for ties in [Ties::Forward, Ties::Reverse] {
                for p in LinePath::with_ties(from, to, ties) {
                    if p.y < y_min || p.y > y_max {
                        continue;
                    }
                    let entry = &mut table[(p.y - y_min) as usize];
                    *entry = Some(match *entry {
                        Some((lo, hi)) => (lo.min(p.x), hi.max(p.x)),
                        None => (p.x, p.x),
                    });
                }
            }
        }

        for (row, entry) in table.into_iter().enumerate().rev() {
            if let Some((x_start, x_end)) = entry {
                surface.fill_span(y_min + row as i32, x_start, x_end);
            }
        }
    }
}
