//! Window management subsystem
//!
//! - **`backend`**: the trait the render loop drives, plus per-frame events
//! - **`glfw_window`**: the GLFW session and window/context implementation

pub mod backend;
pub mod glfw_window;

pub use backend::{FrameEvents, WindowBackend};
pub use glfw_window::{window_hints, GlfwWindow, Session};
