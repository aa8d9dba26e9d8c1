//! Core rendering engine.
//!
//! The [`Engine`] owns the pixel surface and turns the contents of a [`MeshStore`]
//! into a frame: every face is mapped through the [`Viewport`] and then filled,
//! outlined, or both, depending on the [`RenderMode`].

use crate::colors;
use crate::projection::Viewport;
use crate::render::{Frame, PixelSurface, Rasterizer, RasterizerDispatcher, Triangle};
use crate::store::MeshStore;

pub use crate::render::RasterizerType;

/// What to draw for each face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Outlines only.
    #[default]
    Wireframe,
    /// Filled triangles only.
    Filled,
    /// Filled triangles with their outlines drawn on top.
    FilledWireframe,
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Wireframe => write!(f, "wireframe"),
            RenderMode::Filled => write!(f, "filled"),
            RenderMode::FilledWireframe => write!(f, "both"),
        }
    }
}

impl std::str::FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wireframe" => Ok(RenderMode::Wireframe),
            "filled" => Ok(RenderMode::Filled),
            "both" | "filled-wireframe" => Ok(RenderMode::FilledWireframe),
            other => Err(format!("unknown render mode '{other}'")),
        }
    }
}

pub struct Engine {
    surface: PixelSurface,
    rasterizer: RasterizerDispatcher,
    viewport: Viewport,
    triangles_to_render: Vec<Triangle>,
    render_mode: RenderMode,
}

impl Engine {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            surface: PixelSurface::new(width, height),
            rasterizer: RasterizerDispatcher::new(RasterizerType::default()),
            viewport: Viewport::new(width, height),
            triangles_to_render: Vec::new(),
            render_mode: RenderMode::default(),
        }
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        log::debug!("render mode {} -> {mode}", self.render_mode);
        self.render_mode = mode;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn set_rasterizer(&mut self, rasterizer_type: RasterizerType) {
        log::debug!("rasterizer set to {rasterizer_type}");
        self.rasterizer.set_type(rasterizer_type);
    }

    pub fn rasterizer(&self) -> RasterizerType {
        self.rasterizer.active_type()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    /// The most recently rendered frame.
    pub fn frame(&self) -> Frame<'_> {
        self.surface.frame()
    }

    /// Map every face in the store to screen space, in store order.
    fn update(&mut self, store: &MeshStore) {
        let viewport = self.viewport;
        self.triangles_to_render.clear();
        self.triangles_to_render.extend(store.faces().map(|[a, b, c]| {
            Triangle::new(
                viewport.to_screen(a),
                viewport.to_screen(b),
                viewport.to_screen(c),
            )
        }));
    }

    /// Draw a full frame from the store's contents.
    pub fn render(&mut self, store: &MeshStore) {
        self.update(store);
        self.surface.clear(colors::BACKGROUND);

        let (draw_filled, draw_wireframe) = match self.render_mode {
            RenderMode::Wireframe => (false, true),
            RenderMode::Filled => (true, false),
            RenderMode::FilledWireframe => (true, true),
        };

        if draw_filled {
            self.surface.set_color(colors::FILL);
            for triangle in &self.triangles_to_render {
                self.rasterizer.fill_triangle(triangle, &mut self.surface);
            }
        }

        if draw_wireframe {
            self.surface.set_color(colors::WIREFRAME);
            for triangle in &self.triangles_to_render {
                let [v0, v1, v2] = triangle.points;
                self.surface.draw_triangle(v0, v1, v2);
            }
        }
    }
}
