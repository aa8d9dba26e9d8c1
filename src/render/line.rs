//! Integer line drawing.
//!
//! [`LinePath`] walks the 8-connected Bresenham path between two points using the
//! symmetric error formulation (see Alois Zingl, "A Rasterizing Algorithm for Drawing
//! Curves"). The walk keeps a single error term `err` for the point it is on and
//! decides each step independently per axis:
//!
//! ```text
//! dx  =  |x1 - x0|        sx = sign(x1 - x0)
//! dy  = -|y1 - y0|        sy = sign(y1 - y0)
//! err =  dx + dy
//!
//! loop:
//!   emit (x, y); stop at (x1, y1)
//!   e2 = 2 * err
//!   if e2 >= dy { err += dy; x += sx }   // step in x
//!   if e2 <= dx { err += dx; y += sy }   // step in y (both => diagonal)
//! ```
//!
//! Lines are not clipped here: every point of the path is produced and
//! [`PixelSurface::draw_pixel`] drops the ones that fall outside the surface.

use super::framebuffer::PixelSurface;
use super::Point;

/// Which way a Bresenham walk breaks ties when the error sits exactly on a threshold.
///
/// A walk from `a` to `b` with [`Ties::Reverse`] visits exactly the pixels that a
/// [`Ties::Forward`] walk from `b` to `a` visits. Edge walkers rely on this to walk
/// every edge top-down and still reproduce the outline drawn in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ties {
    /// Non-strict comparisons; the path [`PixelSurface::draw_line`] draws.
    #[default]
    Forward,
    /// Strict comparisons; the forward path of the reversed segment.
    Reverse,
}

/// Iterator over the points of a Bresenham line, endpoints inclusive.
///
/// Yields exactly `max(|dx|, |dy|) + 1` points, each 8-adjacent to the previous one.
/// The error term is kept in `i64`, so any pair of `i32` endpoints is walked exactly.
#[derive(Debug, Clone)]
pub struct LinePath {
    x: i32,
    y: i32,
    end: Point,
    dx: i64,
    dy: i64,
    sx: i32,
    sy: i32,
    err: i64,
    ties: Ties,
    done: bool,
}

impl LinePath {
    pub fn new(start: Point, end: Point) -> Self {
        Self::with_ties(start, end, Ties::Forward)
    }

    pub fn with_ties(start: Point, end: Point, ties: Ties) -> Self {
        let dx = (i64::from(end.x) - i64::from(start.x)).abs();
        let dy = -(i64::from(end.y) - i64::from(start.y)).abs();
        Self {
            x: start.x,
            y: start.y,
            end,
            dx,
            dy,
            sx: if start.x < end.x { 1 } else { -1 },
            sy: if start.y < end.y { 1 } else { -1 },
            err: dx + dy,
            ties,
            done: false,
        }
    }

    /// The point the walk is currently on (the next one to be yielded).
    pub fn current(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn step(&mut self) {
        let e2 = 2 * self.err;
        let (step_x, step_y) = match self.ties {
            Ties::Forward => (e2 >= self.dy, e2 <= self.dx),
            Ties::Reverse => (e2 > self.dy, e2 < self.dx),
        };
        if step_x {
            self.err += self.dy;
            self.x += self.sx;
        }
        if step_y {
            self.err += self.dx;
            self.y += self.sy;
        }
    }
}

impl Iterator for LinePath {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        let current = self.current();
        if current == self.end {
            self.done = true;
        } else {
            self.step();
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = (i64::from(self.end.x) - i64::from(self.x))
            .unsigned_abs()
            .max((i64::from(self.end.y) - i64::from(self.y)).unsigned_abs()) as usize
            + 1;
        (remaining, Some(remaining))
    }
}

impl PixelSurface {
    /// Draw the segment (x0, y0)-(x1, y1), both endpoints included, in the pen color.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        for p in LinePath::new(Point::new(x0, y0), Point::new(x1, y1)) {
            self.draw_pixel(p.x, p.y);
        }
    }

    /// Draw a triangle outline as v0->v1, v1->v2, v2->v0.
    pub fn draw_triangle(&mut self, v0: Point, v1: Point, v2: Point) {
        self.draw_line(v0.x, v0.y, v1.x, v1.y);
        self.draw_line(v1.x, v1.y, v2.x, v2.y);
        self.draw_line(v2.x, v2.y, v0.x, v0.y);
    }
}
