//! Scanline triangle filling with integer edge walkers.
//!
//! # Algorithm Overview
//!
//! 1. **Sort vertices** by descending y, so `v0` is the top and `v2` the bottom
//!    (the surface origin is bottom-left). Equal y values keep their input order.
//! 2. **Classify** the triangle: flat bottom (`y1 == y2`), flat top (`y0 == y1`), or
//!    general.
//! 3. **Decompose** a general triangle at the row of `v1` into a flat-bottom half on
//!    top and a flat-top half below:
//!
//! ```text
//!        v0                   v0
//!        /\                   /\
//!       /  \                 /  \        Top half:    short edge v0 -> v1
//!      /    \       =>     v1----v3      (v3 is where the long edge v0 -> v2
//!     /      \               \   |        crosses row y1)
//!    /________\               \  |
//!  v1          \               \ |       Bottom half: short edge v1 -> v2
//!                v2             v2
//! ```
//!
//! 4. **Walk** the long edge `v0 -> v2` once for the whole triangle and the short edge
//!    of each half alongside it, one row per step. Both walkers are plain Bresenham
//!    walks; each pauses when it steps to a new row and reports the x extent it
//!    covered on the row it left. The row is filled between the outermost of the two
//!    extents.
//!
//! The split point `v3` is never computed. The long-edge walker is simply on it when
//! the top half finishes, so no interpolation or division is needed and the two
//! halves always agree on the split row.
//!
//! The split row belongs to both halves. The top half holds it back and the bottom
//! half folds it into its first row, so every row (and every pixel) is written once.

use super::walker::{EdgeWalker, Span};
use super::{Rasterizer, Triangle};
use crate::render::framebuffer::PixelSurface;
use crate::render::Point;

/// Which flat sub-triangle of a decomposed triangle is being filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Half {
    /// The flat-bottom triangle above the split row.
    Top,
    /// The flat-top triangle below the split row.
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    FlatBottom,
    FlatTop,
    General,
}

/// One flat sub-triangle, described by its short edge. Its other side is the long
/// edge `v0 -> v2`, shared by both halves.
#[derive(Debug, Clone, Copy)]
struct FlatHalf {
    half: Half,
    from: Point,
    to: Point,
}

impl Shape {
    /// Classify vertices already sorted by descending y.
    fn classify(v0: Point, v1: Point, v2: Point) -> Self {
        if v1.y == v2.y {
            Shape::FlatBottom
        } else if v0.y == v1.y {
            Shape::FlatTop
        } else {
            Shape::General
        }
    }

    /// The flat halves to fill, top first. Never more than two.
    fn halves(self, v0: Point, v1: Point, v2: Point) -> impl Iterator<Item = FlatHalf> {
        let top = FlatHalf {
            half: Half::Top,
            from: v0,
            to: v1,
        };
        let bottom = FlatHalf {
            half: Half::Bottom,
            from: v1,
            to: v2,
        };
        let halves = match self {
            Shape::FlatBottom => [Some(top), None],
            Shape::FlatTop => [None, Some(bottom)],
            Shape::General => [Some(top), Some(bottom)],
        };
        halves.into_iter().flatten()
    }
}

/// Scanline-based triangle rasterizer.
///
/// Integer-only: vertices are sorted, split into at most two flat halves and filled
/// row by row from the top vertex down. The result does not depend on the input
/// vertex order or winding, and contains every pixel of the triangle's outline.
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Sort three points by descending y with a stable 3-element bubble sort.
    fn sort_vertices(v0: &mut Point, v1: &mut Point, v2: &mut Point) {
        if v0.y < v1.y {
            std::mem::swap(v0, v1);
        }
        if v1.y < v2.y {
            std::mem::swap(v1, v2);
        }
        if v0.y < v1.y {
            std::mem::swap(v0, v1);
        }
    }

    /// Fill one flat half against the shared long edge.
    ///
    /// `split` is the short-edge extent of the split row held back by the previous
    /// half, if any. Returns the extent to hold back for the next half.
    fn fill_half(
        half: FlatHalf,
        long: &mut EdgeWalker,
        mut split: Option<Span>,
        hold_last_row: bool,
        emit: &mut impl FnMut(Span),
    ) -> Option<Span> {
        for short in EdgeWalker::new(half.from, half.to) {
            let row = match split.take() {
                Some(held) => short.union(held),
                None => short,
            };

            if hold_last_row && row.y == half.to.y {
                return Some(row);
            }

            let edge = long.next().unwrap_or_else(|| {
                panic!("long edge ended before row {} of the {:?} half", row.y, half.half)
            });
            assert_eq!(
                edge.y, row.y,
                "edge walkers desynchronized in the {:?} half",
                half.half
            );

            emit(row.union(edge));
        }
        None
    }

    /// Produce the filled spans of a triangle, top row first, one per row.
    fn spans(triangle: &Triangle, mut emit: impl FnMut(Span)) {
        let [mut v0, mut v1, mut v2] = triangle.points;
        Self::sort_vertices(&mut v0, &mut v1, &mut v2);

        let shape = Shape::classify(v0, v1, v2);
        let mut long = EdgeWalker::new(v0, v2);
        let mut split = None;

        for half in shape.halves(v0, v1, v2) {
            let hold_last_row = shape == Shape::General && half.half == Half::Top;
            split = Self::fill_half(half, &mut long, split, hold_last_row, &mut emit);
        }

        debug_assert!(split.is_none(), "split row was never filled");
        debug_assert!(long.next().is_none(), "long edge has rows left over");
    }
}

impl Default for ScanlineRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ScanlineRasterizer {
    fn fill_triangle(&self, triangle: &Triangle, surface: &mut PixelSurface) {
        Self::spans(triangle, |span| surface.fill_span(span.y, span.x_min, span.x_max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::rasterizer::EdgeTableRasterizer;
    use std::collections::BTreeSet;

    const SIZE: u32 = 24;

    fn set_pixels(surface: &PixelSurface) -> BTreeSet<(i32, i32)> {
        let mut set = BTreeSet::new();
        for y in 0..surface.height() as i32 {
            for x in 0..surface.width() as i32 {
                if surface.pixel(x, y) != Some(0) {
                    set.insert((x, y));
                }
            }
        }
        set
    }

    fn fill(v0: (i32, i32), v1: (i32, i32), v2: (i32, i32)) -> BTreeSet<(i32, i32)> {
        let mut surface = PixelSurface::new(SIZE, SIZE);
        surface.draw_filled_triangle(v0.into(), v1.into(), v2.into());
        set_pixels(&surface)
    }

    fn outline(v0: (i32, i32), v1: (i32, i32), v2: (i32, i32)) -> BTreeSet<(i32, i32)> {
        let mut surface = PixelSurface::new(SIZE, SIZE);
        surface.draw_triangle(v0.into(), v1.into(), v2.into());
        set_pixels(&surface)
    }

    /// Deterministic spread of triangles inside the surface, covering flat, general,
    /// thin and degenerate shapes.
    fn sample_triangles() -> Vec<[(i32, i32); 3]> {
        let mut state: u32 = 0x2545_F491;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state % SIZE) as i32
        };
        let mut triangles: Vec<[(i32, i32); 3]> = (0..400)
            .map(|_| [(next(), next()), (next(), next()), (next(), next())])
            .collect();
        triangles.extend([
            [(0, 2), (4, 2), (2, 0)],
            [(2, 0), (0, 4), (4, 4)],
            [(1, 1), (20, 2), (3, 22)],
            [(5, 5), (5, 5), (5, 5)],
            [(0, 0), (10, 10), (20, 20)],
            [(0, 7), (23, 7), (11, 7)],
            [(3, 0), (3, 23), (3, 10)],
        ]);
        triangles
    }

    #[test]
    fn flat_top_with_apex_below() {
        let pixels = fill((0, 2), (4, 2), (2, 0));
        let row = |y: i32| -> Vec<i32> {
            pixels.iter().filter(|p| p.1 == y).map(|p| p.0).collect()
        };
        assert_eq!(row(2), vec![0, 1, 2, 3, 4]);
        assert_eq!(row(1), vec![1, 2, 3]);
        assert_eq!(row(0), vec![2]);
        assert_eq!(pixels.len(), 9);
    }

    #[test]
    fn flat_bottom_with_apex_above() {
        let pixels = fill((2, 4), (0, 0), (4, 0));
        let extent = |y: i32| {
            let xs: Vec<i32> = pixels.iter().filter(|p| p.1 == y).map(|p| p.0).collect();
            (xs[0], xs[xs.len() - 1])
        };
        assert_eq!(extent(4), (2, 2));
        assert_eq!(extent(3), (1, 3));
        assert_eq!(extent(2), (1, 3));
        assert_eq!(extent(1), (0, 4));
        assert_eq!(extent(0), (0, 4));
    }

    #[test]
    fn single_point_fills_one_pixel() {
        let pixels = fill((6, 9), (6, 9), (6, 9));
        assert_eq!(pixels.into_iter().collect::<Vec<_>>(), vec![(6, 9)]);
    }

    #[test]
    fn collinear_triangle_fills_its_line() {
        let pixels = fill((0, 0), (4, 4), (8, 8));
        let expected: BTreeSet<(i32, i32)> = (0..=8).map(|i| (i, i)).collect();
        assert_eq!(pixels, expected);
    }

    #[test]
    fn horizontal_sliver_fills_one_row() {
        let pixels = fill((9, 3), (1, 3), (5, 3));
        let expected: BTreeSet<(i32, i32)> = (1..=9).map(|x| (x, 3)).collect();
        assert_eq!(pixels, expected);
    }

    #[test]
    fn rows_are_contiguous() {
        for [a, b, c] in sample_triangles() {
            let pixels = fill(a, b, c);
            for y in 0..SIZE as i32 {
                let xs: Vec<i32> = pixels.iter().filter(|p| p.1 == y).map(|p| p.0).collect();
                if let (Some(first), Some(last)) = (xs.first(), xs.last()) {
                    assert_eq!(xs.len() as i32, last - first + 1, "{a:?} {b:?} {c:?} row {y}");
                }
            }
        }
    }

    #[test]
    fn fill_covers_outline() {
        for [a, b, c] in sample_triangles() {
            let filled = fill(a, b, c);
            let edges = outline(a, b, c);
            assert!(edges.is_subset(&filled), "{a:?} {b:?} {c:?}");
        }
    }

    #[test]
    fn vertex_order_does_not_matter() {
        for [a, b, c] in sample_triangles() {
            let expected = fill(a, b, c);
            for [p, q, r] in [[a, c, b], [b, a, c], [b, c, a], [c, a, b], [c, b, a]] {
                assert_eq!(fill(p, q, r), expected, "{a:?} {b:?} {c:?}");
            }
        }
    }

    #[test]
    fn split_halves_match_reference_fill() {
        let reference = EdgeTableRasterizer::new();
        for [a, b, c] in sample_triangles() {
            if a.1 == b.1 || b.1 == c.1 || a.1 == c.1 {
                continue;
            }
            let mut expected = PixelSurface::new(SIZE, SIZE);
            reference.fill_triangle(&Triangle::new(a.into(), b.into(), c.into()), &mut expected);
            assert_eq!(fill(a, b, c), set_pixels(&expected), "{a:?} {b:?} {c:?}");
        }
    }

    #[test]
    fn each_row_is_filled_once() {
        for [a, b, c] in sample_triangles() {
            let mut rows = Vec::new();
            ScanlineRasterizer::spans(&Triangle::new(a.into(), b.into(), c.into()), |span| {
                rows.push(span.y)
            });
            let top = a.1.max(b.1).max(c.1);
            let bottom = a.1.min(b.1).min(c.1);
            let expected: Vec<i32> = (bottom..=top).rev().collect();
            assert_eq!(rows, expected, "{a:?} {b:?} {c:?}");
        }
    }

    #[test]
    fn general_triangle_spans() {
        let mut spans = Vec::new();
        let triangle = Triangle::new(Point::new(2, 20), Point::new(21, 11), Point::new(7, 1));
        ScanlineRasterizer::spans(&triangle, |span| spans.push(span));
        let first: Vec<(i32, i32, i32)> =
            spans.iter().take(3).map(|s| (s.y, s.x_min, s.x_max)).collect();
        assert_eq!(first, vec![(20, 2, 3), (19, 2, 5), (18, 3, 7)]);
    }

    #[test]
    fn offscreen_vertices_terminate() {
        let mut surface = PixelSurface::new(8, 8);
        surface.draw_filled_triangle(Point::new(-50, -40), Point::new(60, 3), Point::new(4, 90));
        assert!(surface.pixels().iter().all(|&p| p != 0));
    }
}
