//! Row-at-a-time Bresenham edge walking.

use std::iter::Peekable;

use crate::render::{LinePath, Point, Ties};

/// The x extent an edge covers on one row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Span {
    pub y: i32,
    pub x_min: i32,
    pub x_max: i32,
}

impl Span {
    pub fn at(p: Point) -> Self {
        Self {
            y: p.y,
            x_min: p.x,
            x_max: p.x,
        }
    }

    pub fn include(&mut self, x: i32) {
        self.x_min = self.x_min.min(x);
        self.x_max = self.x_max.max(x);
    }

    pub fn union(self, other: Span) -> Span {
        debug_assert_eq!(self.y, other.y, "spans on different rows");
        Span {
            y: self.y,
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
        }
    }
}

/// Pull the points of `path` that share the current row and return their extent.
fn next_row(path: &mut Peekable<LinePath>) -> Option<Span> {
    let mut span = Span::at(path.next()?);
    while let Some(p) = path.next_if(|p| p.y == span.y) {
        span.include(p.x);
    }
    Some(span)
}

/// Walks one triangle edge a row at a time.
///
/// Each call to `next` advances until the walk steps to a new row and yields the
/// extent covered on the row it left. The edge is traced with both tie-breaks in
/// lockstep, so the extent covers the line drawn from either end.
pub(crate) struct EdgeWalker {
    forward: Peekable<LinePath>,
    reverse: Peekable<LinePath>,
}

impl EdgeWalker {
    pub fn new(from: Point, to: Point) -> Self {
        Self {
            forward: LinePath::with_ties(from, to, Ties::Forward).peekable(),
            reverse: LinePath::with_ties(from, to, Ties::Reverse).peekable(),
        }
    }
}

impl Iterator for EdgeWalker {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        match (next_row(&mut self.forward), next_row(&mut self.reverse)) {
            (Some(a), Some(b)) => {
                assert_eq!(a.y, b.y, "edge walkers left different rows");
                Some(a.union(b))
            }
            (None, None) => None,
            (a, b) => panic!("edge walkers finished on different rows: {a:?} vs {b:?}"),
        }
    }
}
