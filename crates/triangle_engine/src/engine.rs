//! Bootstrap and lifecycle
//!
//! [`App`] performs the bootstrap in lifecycle order (subsystem, window and
//! context, function table, viewport), optionally builds a shader program
//! and uploads static geometry, runs the render loop and tears everything
//! down in reverse order of acquisition.
//!
//! [`Runtime`] is the backend-generic part (window + graphics + drawable)
//! so the loop and teardown can run against test backends.

use crate::config::{BootstrapConfig, ConfigError, ContextProfile};
use crate::render::mesh::{GeometryError, Mesh};
use crate::render::opengl::{
    load_functions, Drawable, GeometryBuffers, GraphicsApi, GraphicsContext, GraphicsError,
    ShaderProgram, ShaderSources,
};
use crate::render::render_loop::{self, LoopSummary};
use crate::render::window::{GlfwWindow, Session, WindowBackend};
use thiserror::Error;

/// Fatal bootstrap errors
///
/// Shader compile and link failures are not here; they are diagnostics on
/// the built program.
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// The windowing subsystem failed to initialize
    #[error("windowing subsystem initialization failed: {0}")]
    Initialization(String),

    /// The platform could not provide the requested window and context
    #[error(
        "failed to create {width}x{height} window with OpenGL {major}.{minor} {profile:?} context"
    )]
    WindowCreation {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Requested major version
        major: u32,
        /// Requested minor version
        minor: u32,
        /// Requested profile
        profile: ContextProfile,
    },

    /// A required OpenGL entry point could not be resolved
    #[error("failed to load OpenGL function {0}")]
    FunctionLoad(String),

    /// An OpenGL object could not be created
    #[error("graphics error: {0}")]
    Graphics(#[from] GraphicsError),

    /// Static geometry is inconsistent with its layout
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Configuration could not be loaded or is invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Window, graphics context and optional drawable
///
/// Field order is drop order: drawable (buffers, then program), graphics
/// context, then window.
pub struct Runtime<W: WindowBackend, G: GraphicsApi> {
    drawable: Option<Drawable<G>>,
    graphics: GraphicsContext<G>,
    window: W,
}

impl<W: WindowBackend, G: GraphicsApi> Runtime<W, G> {
    /// Assemble a runtime from a window and its loaded context
    pub fn new(window: W, graphics: GraphicsContext<G>) -> Self {
        Self {
            drawable: None,
            graphics,
            window,
        }
    }

    /// Acquire window, then function table, then viewport, in that order
    ///
    /// `session` is the windowing subsystem handle `create_window` builds
    /// the window from. On failure everything acquired so far is dropped
    /// in reverse order (window, then session) before the error returns.
    pub fn bootstrap<S, C, L>(
        mut session: S,
        create_window: C,
        load: L,
    ) -> Result<(S, Self), BootstrapError>
    where
        C: FnOnce(&mut S) -> Result<W, BootstrapError>,
        L: FnOnce(&mut W) -> Result<G, BootstrapError>,
    {
        let mut window = match create_window(&mut session) {
            Ok(window) => window,
            Err(e) => {
                drop(session);
                return Err(e);
            }
        };

        let api = match load(&mut window) {
            Ok(api) => api,
            Err(e) => {
                drop(window);
                drop(session);
                return Err(e);
            }
        };

        let graphics = GraphicsContext::new(api, window.framebuffer_size());
        Ok((session, Self::new(window, graphics)))
    }

    /// Build a program, upload `mesh` and draw it every frame
    ///
    /// A program that failed to compile or link is still installed; the
    /// failure has already been logged.
    pub fn load_scene(
        &mut self,
        sources: &ShaderSources,
        mesh: &Mesh,
    ) -> Result<(), BootstrapError> {
        let program = ShaderProgram::build(self.graphics.api(), sources)?;
        if !program.is_linked() {
            log::warn!(
                "Continuing with a shader program that has {} diagnostic(s)",
                program.diagnostics().len()
            );
        }
        let geometry = GeometryBuffers::upload(self.graphics.api(), mesh)?;
        self.drawable = Some(Drawable::new(program, geometry));
        Ok(())
    }

    /// Apply render settings that stay fixed for the whole run
    pub fn apply_render_config(&mut self, config: &BootstrapConfig) {
        self.graphics.set_clear_color(config.render.clear_color);
        if config.render.wireframe {
            log::info!("Wireframe rasterization enabled");
            self.graphics.set_wireframe(true);
        }
    }

    /// Run the render loop until the window closes
    pub fn run_loop(&mut self) -> LoopSummary {
        render_loop::run(&mut self.window, &mut self.graphics, self.drawable.as_ref())
    }

    /// Graphics context
    pub const fn graphics(&self) -> &GraphicsContext<G> {
        &self.graphics
    }

    /// Installed drawable, if any
    pub const fn drawable(&self) -> Option<&Drawable<G>> {
        self.drawable.as_ref()
    }

    /// Window backend
    pub const fn window(&self) -> &W {
        &self.window
    }

    /// Release buffers, program, then window and context
    ///
    /// Consumes the runtime, so it runs at most once.
    pub fn shutdown(self) {
        let Self { drawable, graphics, window } = self;
        log::info!("Shutting down");
        drop(drawable);
        drop(graphics);
        drop(window);
    }
}

/// GLFW + OpenGL application
///
/// The session is the last field so the windowing subsystem is torn down
/// after everything created from it.
pub struct App {
    runtime: Runtime<GlfwWindow, glow::Context>,
    config: BootstrapConfig,
    session: Session,
}

impl App {
    /// Bootstrap window, context and function table
    ///
    /// On any failure everything acquired so far is released before the
    /// error is returned.
    pub fn initialize(config: BootstrapConfig) -> Result<Self, BootstrapError> {
        config.validate()?;

        let (session, mut runtime) = Runtime::bootstrap(
            Session::init()?,
            |session: &mut Session| GlfwWindow::create(session, &config),
            |window: &mut GlfwWindow| load_functions(|symbol| window.proc_address(symbol)),
        )?;
        runtime.apply_render_config(&config);

        Ok(Self {
            runtime,
            config,
            session,
        })
    }

    /// Build the program and upload the mesh drawn every frame
    pub fn load_scene(
        &mut self,
        sources: &ShaderSources,
        mesh: &Mesh,
    ) -> Result<(), BootstrapError> {
        self.runtime.load_scene(sources, mesh)
    }

    /// Shader sources from the configuration, or `fallback`
    pub fn shader_sources_or(
        &self,
        fallback: ShaderSources,
    ) -> Result<ShaderSources, BootstrapError> {
        Ok(ShaderSources::from_config_or(self.config.shaders.as_ref(), fallback)?)
    }

    /// Configuration the app was bootstrapped with
    pub const fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Run until the window closes, then tear down
    pub fn run(self) -> LoopSummary {
        let Self { mut runtime, config: _, session } = self;
        let summary = runtime.run_loop();
        runtime.shutdown();
        drop(session);
        log::info!("Shutdown complete");
        summary
    }
}
