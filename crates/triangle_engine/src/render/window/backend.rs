//! Backend-agnostic window trait
//!
//! The render loop only talks to a window through [`WindowBackend`]. The
//! GLFW window implements it for real runs; tests implement it with a
//! scripted window.

use glfw::Key;

/// Events collected during one `poll_events` step
///
/// Resize notifications are coalesced: only the last framebuffer size seen
/// during a poll is kept, so at most one resize is pending per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameEvents {
    /// Latest framebuffer size reported during the poll
    pub framebuffer_resize: Option<(i32, i32)>,
    /// The OS asked the window to close
    pub close_requested: bool,
}

impl FrameEvents {
    /// Record a framebuffer resize, replacing any earlier one
    pub fn record_resize(&mut self, width: i32, height: i32) {
        self.framebuffer_resize = Some((width, height));
    }
}

/// Window operations used by the render loop
///
/// Note: no `Send` bound. A GL context is current on exactly one thread and
/// the window must stay on it.
pub trait WindowBackend {
    /// Whether the close flag is set
    fn should_close(&self) -> bool;

    /// Set or clear the close flag
    fn set_should_close(&mut self, should_close: bool);

    /// Whether `key` is currently held down
    fn is_key_pressed(&self, key: Key) -> bool;

    /// Process pending OS events and return what happened
    fn poll_events(&mut self) -> FrameEvents;

    /// Current framebuffer size in pixels
    fn framebuffer_size(&self) -> (i32, i32);

    /// Present the back buffer
    fn swap_buffers(&mut self);
}
