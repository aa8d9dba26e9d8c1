//! Pixel surface the rasterizers draw into.
//!
//! The surface owns a row-major `width * height` buffer of native pixel values with
//! its origin at the bottom-left. Presentation flips it vertically (see
//! [`Frame::rows_top_down`]).

use crate::colors;

/// An owned, fixed-size pixel buffer with a pen color.
///
/// All drawing goes through [`PixelSurface::draw_pixel`] (or its span variant
/// [`PixelSurface::fill_span`]), which silently drops anything outside the surface.
/// Nothing else clips.
pub struct PixelSurface {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
    current_color: u32,
}

impl PixelSurface {
    /// Create a surface cleared to zero with a white pen.
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            pixels: vec![0; size],
            width,
            height,
            current_color: colors::WHITE,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Set the logical `0xRRGGBBAA` color used by every subsequent draw call.
    pub fn set_color(&mut self, color: u32) {
        self.current_color = color;
    }

    pub fn color(&self) -> u32 {
        self.current_color
    }

    /// Fill the whole surface with a logical color. The pen is left untouched.
    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(colors::to_native(color));
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Write the pen color at (x, y). Out-of-bounds coordinates are a no-op.
    #[inline]
    pub fn draw_pixel(&mut self, x: i32, y: i32) {
        match self.index(x, y) {
            Some(idx) => self.pixels[idx] = colors::to_native(self.current_color),
            None => log::trace!("dropped pixel outside surface at ({x}, {y})"),
        }
    }

    /// Write the pen color on row `y` from `x_start` to `x_end` inclusive.
    ///
    /// Equivalent to calling [`draw_pixel`](Self::draw_pixel) for every x in the
    /// range, without the per-pixel bounds check.
    #[inline]
    pub fn fill_span(&mut self, y: i32, x_start: i32, x_end: i32) {
        if y < 0 || y >= self.height as i32 || x_end < 0 || x_start >= self.width as i32 {
            return;
        }
        let x_start = x_start.max(0) as u32;
        let x_end = x_end.min(self.width as i32 - 1) as u32;
        if x_start > x_end {
            return;
        }
        let row = y as usize * self.width as usize;
        let native = colors::to_native(self.current_color);
        self.pixels[row + x_start as usize..=row + x_end as usize].fill(native);
    }

    /// The stored (native) value at (x, y), or None if out of bounds.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// The logical color at (x, y), or None if out of bounds.
    pub fn color_at(&self, x: i32, y: i32) -> Option<u32> {
        self.pixel(x, y).map(colors::from_native)
    }

    /// The raw native buffer, bottom row first.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Read-only view handed to a display each frame.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            pixels: &self.pixels,
            width: self.width,
            height: self.height,
        }
    }
}

/// A read-only view of a finished frame.
#[derive(Clone, Copy)]
pub struct Frame<'a> {
    pixels: &'a [u32],
    width: u32,
    height: u32,
}

impl<'a> Frame<'a> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    pub fn pixels(&self) -> &'a [u32] {
        self.pixels
    }

    /// Rows in top-left-origin order, i.e. the surface flipped vertically.
    pub fn rows_top_down(&self) -> impl Iterator<Item = &'a [u32]> {
        self.pixels.chunks_exact(self.width as usize).rev()
    }

    /// The buffer as native-endian bytes, bottom row first.
    pub fn as_bytes(&self) -> &'a [u8] {
        // u32 has no padding and u8 has alignment 1, so any u32 slice is a valid byte slice.
        unsafe {
            std::slice::from_raw_parts(self.pixels.as_ptr() as *const u8, self.pixels.len() * 4)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_zeroed() {
        let surface = PixelSurface::new(4, 3);
        assert_eq!(surface.pixels().len(), 12);
        assert!(surface.pixels().iter().all(|&p| p == 0));
        assert_eq!(surface.color(), colors::WHITE);
    }

    #[test]
    fn draw_pixel_stores_native_color() {
        let mut surface = PixelSurface::new(4, 4);
        surface.set_color(0x11223344);
        surface.draw_pixel(1, 2);
        assert_eq!(surface.pixel(1, 2), Some(0x44332211));
        assert_eq!(surface.color_at(1, 2), Some(0x11223344));
        assert_eq!(surface.pixels()[2 * 4 + 1], 0x44332211);
    }

    #[test]
    fn set_color_has_no_other_effect() {
        let mut surface = PixelSurface::new(2, 2);
        surface.set_color(colors::RED);
        assert!(surface.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut surface = PixelSurface::new(3, 3);
        for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 3), (i32::MIN, i32::MAX)] {
            surface.draw_pixel(x, y);
        }
        assert!(surface.pixels().iter().all(|&p| p == 0));
        assert_eq!(surface.pixel(3, 0), None);
    }

    #[test]
    fn color_round_trips_through_draw_pixel() {
        let mut surface = PixelSurface::new(1, 1);
        let mut color: u32 = 7;
        for _ in 0..10_000 {
            surface.set_color(color);
            surface.draw_pixel(0, 0);
            assert_eq!(surface.color_at(0, 0), Some(color));
            color = color.wrapping_mul(0x0101_0101).wrapping_add(0x6F4A_7C15);
        }
    }

    #[test]
    fn fill_span_clips_like_draw_pixel() {
        let mut spans = PixelSurface::new(5, 2);
        let mut pixels = PixelSurface::new(5, 2);
        for (y, x0, x1) in [(0, -3, 2), (1, 3, 9), (1, -10, -1), (2, 0, 4), (0, 4, 4)] {
            spans.fill_span(y, x0, x1);
            for x in x0..=x1 {
                pixels.draw_pixel(x, y);
            }
        }
        assert_eq!(spans.pixels(), pixels.pixels());
    }

    #[test]
    fn frame_rows_are_flipped() {
        let mut surface = PixelSurface::new(2, 2);
        surface.set_color(colors::GREEN);
        surface.draw_pixel(0, 0);
        let frame = surface.frame();
        let rows: Vec<&[u32]> = frame.rows_top_down().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], colors::to_native(colors::GREEN));
        assert_eq!(rows[0], &[0, 0]);
        assert_eq!(frame.stride(), 8);
        assert_eq!(frame.as_bytes().len(), 16);
    }

    #[test]
    fn clear_fills_native_value() {
        let mut surface = PixelSurface::new(2, 1);
        surface.clear(0xAABBCCDD);
        assert_eq!(surface.pixels(), &[0xDDCCBBAA, 0xDDCCBBAA]);
    }
}
