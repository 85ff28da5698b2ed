//! OpenGL backend
//!
//! - **`api`**: the consumed GL subset as a trait, implemented for `glow`
//! - **`loader`**: function table loading through the window's resolver
//! - **`context`**: viewport and clear state for one window
//! - **`shader`**: program build with non-fatal diagnostics
//! - **`buffer`**: static geometry upload and draw

pub mod api;
pub mod buffer;
pub mod context;
pub mod loader;
pub mod shader;

pub use api::{BufferTarget, ClearTargets, GraphicsApi, ShaderStage};
pub use buffer::{Drawable, GeometryBuffers};
pub use context::GraphicsContext;
pub use loader::load_functions;
pub use shader::{BuildStep, ShaderDiagnostic, ShaderProgram, ShaderSources};

use thiserror::Error;

/// OpenGL object errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// The driver refused to create an object
    #[error("failed to create {kind}: {reason}")]
    ObjectCreation {
        /// Object kind
        kind: &'static str,
        /// Driver message
        reason: String,
    },
}
