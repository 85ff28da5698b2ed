//! Viewport rectangle
//!
//! Maps normalized device coordinates (-1..1 on both axes) onto the pixel
//! rectangle of the window's framebuffer.

/// Viewport in framebuffer pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Left edge
    pub x: i32,
    /// Bottom edge
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Viewport {
    /// Viewport covering a whole framebuffer, origin at (0, 0)
    pub const fn from_framebuffer(width: i32, height: i32) -> Self {
        Self { x: 0, y: 0, width, height }
    }

    /// Whether the viewport covers no pixels (minimized window)
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}
