//! # Triangle Engine
//!
//! Opens one window with an OpenGL context through GLFW and draws a single
//! hardcoded mesh: library initialization, window/context creation,
//! function-pointer loading, shader compilation, vertex buffer setup and a
//! render loop, torn down in reverse order on every exit path.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use triangle_engine::prelude::*;
//!
//! fn main() -> Result<(), BootstrapError> {
//!     triangle_engine::foundation::logging::init();
//!     let mut app = App::initialize(BootstrapConfig::default())?;
//!     app.load_scene(&ShaderSources::default(), &Mesh::triangle())?;
//!     app.run();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod foundation;
pub mod render;

mod engine;

#[cfg(test)]
mod test_support;

pub use engine::{App, BootstrapError, Runtime};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        App, BootstrapError, Runtime,
        config::{BootstrapConfig, Config, ContextProfile},
        render::{
            LoopSummary, Mesh, VertexAttribute, VertexLayout, Viewport,
            opengl::{
                ShaderSources,
                shader::{
                    DEFAULT_FRAGMENT_SHADER, DEFAULT_VERTEX_SHADER, VERTEX_COLOR_FRAGMENT_SHADER,
                },
            },
        },
    };
}
