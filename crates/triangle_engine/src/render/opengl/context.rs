//! Graphics context state
//!
//! Holds the loaded function table and the draw state the render loop
//! mutates (viewport, clear color). One instance per window; nothing here is
//! global, so a second window would simply get a second context.

use std::rc::Rc;

use crate::render::opengl::api::{ClearTargets, GraphicsApi};
use crate::render::viewport::Viewport;

/// Loaded OpenGL functions plus the state tracked alongside them
pub struct GraphicsContext<G: GraphicsApi> {
    api: Rc<G>,
    viewport: Viewport,
    clear_color: [f32; 4],
}

impl<G: GraphicsApi> GraphicsContext<G> {
    /// Wrap a loaded API and set the initial viewport to the framebuffer
    pub fn new(api: G, framebuffer_size: (i32, i32)) -> Self {
        let viewport = Viewport::from_framebuffer(framebuffer_size.0, framebuffer_size.1);
        api.set_viewport(viewport);
        log::debug!("Initial viewport {:?}", viewport);

        Self {
            api: Rc::new(api),
            viewport,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Shared handle to the API for resource owners
    pub fn api(&self) -> &Rc<G> {
        &self.api
    }

    /// Current viewport
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Framebuffer changed size; the viewport follows with origin (0, 0)
    pub fn on_framebuffer_resize(&mut self, width: i32, height: i32) {
        self.viewport = Viewport::from_framebuffer(width, height);
        self.api.set_viewport(self.viewport);
        log::trace!("Viewport resized to {}x{}", width, height);
    }

    /// Set the color used by [`Self::clear_frame`]
    pub fn set_clear_color(&mut self, color: [f32; 4]) {
        self.clear_color = color;
        self.api.set_clear_color(color);
    }

    /// Color used by [`Self::clear_frame`]
    pub const fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    /// Toggle line rasterization
    pub fn set_wireframe(&self, enabled: bool) {
        self.api.set_wireframe(enabled);
    }

    /// Clear color and depth targets
    pub fn clear_frame(&self) {
        self.api.clear(ClearTargets::COLOR | ClearTargets::DEPTH);
    }
}

impl<G: GraphicsApi> Drop for GraphicsContext<G> {
    fn drop(&mut self) {
        // Resource owners hold their own clone of the API; dropping them
        // first keeps deletes ahead of context destruction.
        if Rc::strong_count(&self.api) > 1 {
            log::warn!(
                "Graphics context dropped while {} resource handle(s) still reference it",
                Rc::strong_count(&self.api) - 1
            );
        }
    }
}
