use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;

use crate::display::{Display, FrameBudget, WindowEvent};
use crate::render::Frame;

/// Caps the render loop to a target frame rate using the SDL timer.
pub struct FrameLimiter {
    timer: sdl2::TimerSubsystem,
    frame_target_time: u64,
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window, fps: u32) -> Self {
        let timer = window.timer().clone();
        Self {
            previous_frame_time: timer.ticks64(),
            frame_target_time: 1000 / u64::from(fps.max(1)),
            timer,
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    /// Delta time represents the time elapsed since the last call to this method.
    pub fn wait_and_get_delta(&mut self) -> u64 {
        let mut current_time = self.timer.ticks64();
        let mut delta_time = current_time - self.previous_frame_time;

        if delta_time < self.frame_target_time {
            let time_to_wait = self.frame_target_time - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = self.timer.ticks64();
            delta_time = current_time - self.previous_frame_time;
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

impl FrameBudget for FrameLimiter {
    fn end_frame(&mut self) {
        let delta = self.wait_and_get_delta();
        log::trace!("frame took {delta} ms");
    }
}

/// An SDL2 window showing each frame through a streaming texture.
///
/// The texture format is `ABGR8888`: a packed `0xAABBGGRR` value, which is exactly the
/// byte-reversed logical color the surface stores. The surface's origin is the
/// bottom-left, so the texture is copied with a vertical flip.
pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    texture: sdl2::render::Texture<'static>,
    _texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // The texture is declared before texture_creator, so it is dropped first.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ABGR8888, width, height)
            .map_err(|e| e.to_string())?;

        log::info!("opened {width}x{height} window '{title}'");

        Ok(Self {
            canvas,
            texture,
            _texture_creator: texture_creator,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}

impl Display for Window {
    fn poll_events(&mut self) -> WindowEvent {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                _ => {}
            }
        }
        WindowEvent::None
    }

    fn present(&mut self, frame: Frame<'_>) -> Result<(), String> {
        if (frame.width(), frame.height()) != (self.width, self.height) {
            return Err(format!(
                "frame is {}x{}, window is {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            ));
        }
        self.texture
            .update(None, frame.as_bytes(), frame.stride())
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy_ex(&self.texture, None, None, 0.0, None, false, true)?;
        self.canvas.present();
        Ok(())
    }
}
