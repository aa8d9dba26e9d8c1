//! A small CPU scan-conversion renderer.
//!
//! Meshes are loaded from a plain-text vertex/face description into a [`MeshStore`],
//! mapped onto a pixel surface with a fixed viewport, and drawn with integer
//! Bresenham lines and a scanline triangle fill. SDL2 is used only to show the
//! finished frame; the [`display::PngDisplay`] renders without a window.
//!
//! # Quick Start
//!
//! ```ignore
//! use tiny_renderer::prelude::*;
//!
//! let mut store = MeshStore::new();
//! store.load("teapot.obj");
//! let mut engine = Engine::new(720, 720);
//! let mut window = Window::new("Tiny Renderer", 720, 720)?;
//! let mut limiter = FrameLimiter::new(&window, 60);
//! run(&mut window, &mut engine, &store, &mut limiter)?;
//! ```

// Public API - exposed to library consumers
pub mod colors;
pub mod config;
pub mod display;
pub mod engine;
pub mod logging;
pub mod math;
pub mod mesh;
pub mod obj;
pub mod projection;
pub mod store;
pub mod window;

// Internal modules - used within the crate only
pub(crate) mod render;

// Re-export commonly needed types at crate root for convenience
pub use config::Config;
pub use engine::{Engine, RasterizerType, RenderMode};
pub use mesh::{Face, LoadError, Mesh};
pub use projection::Viewport;
pub use render::{Frame, Point};
pub use store::MeshStore;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use tiny_renderer::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::engine::{Engine, RasterizerType, RenderMode};

    // Meshes
    pub use crate::math::Vec4;
    pub use crate::mesh::{Face, LoadError, Mesh};
    pub use crate::store::MeshStore;

    // Rendering
    pub use crate::projection::Viewport;
    pub use crate::render::{Frame, PixelSurface, Point};

    // Display
    pub use crate::display::{run, Display, FrameBudget, PngDisplay, Unlimited, WindowEvent};
    pub use crate::window::{FrameLimiter, Window};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{
        EdgeTableRasterizer, LinePath, PixelSurface, Point, Rasterizer, ScanlineRasterizer,
        Triangle,
    };
}
