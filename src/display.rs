//! Presenting frames and the main loop.
//!
//! A [`Display`] receives every finished frame and reports when the user wants to
//! stop. [`run`] drives the single-threaded poll, render and present cycle against
//! any display: the SDL window in [`crate::window`] or the headless [`PngDisplay`].

use std::path::PathBuf;

use crate::colors;
use crate::engine::Engine;
use crate::render::Frame;
use crate::store::MeshStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
}

/// Destination for rendered frames.
pub trait Display {
    /// Drain pending input. Called once per frame, before drawing.
    fn poll_events(&mut self) -> WindowEvent;

    /// Show a finished frame. The frame's origin is bottom-left.
    fn present(&mut self, frame: Frame<'_>) -> Result<(), String>;
}

/// Paces the loop after each presented frame.
pub trait FrameBudget {
    fn end_frame(&mut self);
}

/// No pacing: frames are produced as fast as the display accepts them.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unlimited;

impl FrameBudget for Unlimited {
    fn end_frame(&mut self) {}
}

/// Run the render loop until the display reports [`WindowEvent::Quit`].
///
/// Returns the number of frames presented. A failed present ends the loop with the
/// display's error.
pub fn run<D, B>(
    display: &mut D,
    engine: &mut Engine,
    store: &MeshStore,
    budget: &mut B,
) -> Result<u64, String>
where
    D: Display + ?Sized,
    B: FrameBudget + ?Sized,
{
    let mut frames = 0;
    loop {
        if display.poll_events() == WindowEvent::Quit {
            log::info!("quit after {frames} frames");
            return Ok(frames);
        }
        engine.render(store);
        display.present(engine.frame())?;
        frames += 1;
        budget.end_frame();
    }
}

/// Headless display that writes frames to a PNG file.
///
/// Each presented frame overwrites the file, so it holds the last frame once the
/// display quits after `frames` presents.
pub struct PngDisplay {
    path: PathBuf,
    frames: u64,
    presented: u64,
}

impl PngDisplay {
    pub fn new(path: impl Into<PathBuf>, frames: u64) -> Self {
        Self {
            path: path.into(),
            frames: frames.max(1),
            presented: 0,
        }
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }
}

/// Unpack a frame into top-left-origin RGBA bytes.
fn rgba_bytes(frame: Frame<'_>) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(frame.stride() * frame.height() as usize);
    for row in frame.rows_top_down() {
        for &native in row {
            let (r, g, b, a) = colors::channels(colors::from_native(native));
            bytes.extend_from_slice(&[r, g, b, a]);
        }
    }
    bytes
}

impl Display for PngDisplay {
    fn poll_events(&mut self) -> WindowEvent {
        if self.presented >= self.frames {
            WindowEvent::Quit
        } else {
            WindowEvent::None
        }
    }

    fn present(&mut self, frame: Frame<'_>) -> Result<(), String> {
        let image = image::RgbaImage::from_raw(frame.width(), frame.height(), rgba_bytes(frame))
            .ok_or_else(|| "frame does not match its dimensions".to_string())?;
        image
            .save_with_format(&self.path, image::ImageFormat::Png)
            .map_err(|e| e.to_string())?;
        self.presented += 1;
        log::debug!("wrote frame {} to '{}'", self.presented, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RenderMode;
    use crate::math::Vec4;
    use crate::mesh::{Face, Mesh};

    /// Quits after a fixed number of polls and remembers what it was shown.
    struct MockDisplay {
        polls_left: u32,
        frames: Vec<Vec<u32>>,
        fail_on: Option<usize>,
    }

    impl MockDisplay {
        fn new(polls: u32) -> Self {
            Self {
                polls_left: polls,
                frames: Vec::new(),
                fail_on: None,
            }
        }
    }

    impl Display for MockDisplay {
        fn poll_events(&mut self) -> WindowEvent {
            if self.polls_left == 0 {
                return WindowEvent::Quit;
            }
            self.polls_left -= 1;
            WindowEvent::None
        }

        fn present(&mut self, frame: Frame<'_>) -> Result<(), String> {
            if self.fail_on == Some(self.frames.len()) {
                return Err("display lost".into());
            }
            self.frames.push(frame.pixels().to_vec());
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingBudget(u32);

    impl FrameBudget for CountingBudget {
        fn end_frame(&mut self) {
            self.0 += 1;
        }
    }

    fn point_store() -> MeshStore {
        let mut store = MeshStore::new();
        store.push(Mesh::new(vec![Vec4::point(0.0, 0.0, 0.0)], vec![Face::new(1, 1, 1)]).unwrap());
        store
    }

    #[test]
    fn presents_one_frame_per_poll() {
        let mut display = MockDisplay::new(3);
        let mut engine = Engine::new(4, 4);
        let mut budget = CountingBudget::default();
        let frames = run(&mut display, &mut engine, &point_store(), &mut budget).unwrap();
        assert_eq!(frames, 3);
        assert_eq!(display.frames.len(), 3);
        assert_eq!(budget.0, 3);
        assert!(display.frames.iter().all(|f| f == &display.frames[0]));
    }

    #[test]
    fn quit_is_checked_before_drawing() {
        let mut display = MockDisplay::new(0);
        let mut engine = Engine::new(4, 4);
        let frames = run(&mut display, &mut engine, &point_store(), &mut Unlimited).unwrap();
        assert_eq!(frames, 0);
        assert!(display.frames.is_empty());
        // nothing was rendered
        assert!(engine.surface().pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn present_error_ends_the_loop() {
        let mut display = MockDisplay::new(10);
        display.fail_on = Some(2);
        let mut engine = Engine::new(4, 4);
        let err = run(&mut display, &mut engine, &point_store(), &mut Unlimited).unwrap_err();
        assert_eq!(err, "display lost");
        assert_eq!(display.frames.len(), 2);
    }

    #[test]
    fn png_display_writes_flipped_rgba() {
        let path = std::env::temp_dir().join(format!("tiny-renderer-{}.png", std::process::id()));
        let mut display = PngDisplay::new(&path, 2);
        let mut engine = Engine::new(4, 4);
        engine.set_render_mode(RenderMode::Filled);

        let frames = run(&mut display, &mut engine, &point_store(), &mut Unlimited).unwrap();
        assert_eq!(frames, 2);
        assert_eq!(display.presented(), 2);

        let image = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(image.dimensions(), (4, 4));
        // Surface (2, 2) lands on image row 4 - 1 - 2 = 1.
        let (r, g, b, a) = colors::channels(colors::FILL);
        assert_eq!(image.get_pixel(2, 1).0, [r, g, b, a]);
        let (r, g, b, a) = colors::channels(colors::BACKGROUND);
        assert_eq!(image.get_pixel(2, 2).0, [r, g, b, a]);
    }
}
