//! Rendering: window, OpenGL backend, mesh data and the render loop

pub mod mesh;
pub mod opengl;
pub mod render_loop;
pub mod viewport;
pub mod window;

pub use mesh::{GeometryError, Mesh, VertexAttribute, VertexLayout};
pub use render_loop::{LoopState, LoopSummary};
pub use viewport::Viewport;
