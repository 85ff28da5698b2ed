//! Window management using GLFW
//!
//! [`Session`] owns process-wide GLFW state. [`GlfwWindow`] owns one window
//! with its OpenGL context and is the production [`WindowBackend`].
//!
//! GLFW is terminated once the session and every window created from it
//! have been dropped, so every early return out of the bootstrap releases
//! what it acquired.

use std::ffi::c_void;

use glfw::{Context, OpenGlProfileHint, WindowHint};

use crate::config::{BootstrapConfig, ContextProfile};
use crate::engine::BootstrapError;
use crate::render::window::backend::{FrameEvents, WindowBackend};

/// Process-wide windowing subsystem
///
/// Must be created before any window and outlive all of them. Dropping the
/// last handle to GLFW terminates the library.
pub struct Session {
    glfw: glfw::Glfw,
}

impl Session {
    /// Initialize GLFW
    ///
    /// GLFW errors are routed into the `log` facade instead of panicking, so
    /// a failed window creation surfaces as [`BootstrapError::WindowCreation`].
    pub fn init() -> Result<Self, BootstrapError> {
        let glfw = glfw::init(glfw::log_errors)
            .map_err(|e| BootstrapError::Initialization(format!("{e:?}")))?;

        log::info!("GLFW initialized ({})", glfw::get_version_string());
        Ok(Self { glfw })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        log::debug!("Releasing GLFW session");
    }
}

/// Pre-creation hints for the requested context
pub fn window_hints(config: &BootstrapConfig) -> Vec<WindowHint> {
    let profile = match config.context.profile {
        ContextProfile::Core => OpenGlProfileHint::Core,
        ContextProfile::Compatibility => OpenGlProfileHint::Compat,
        ContextProfile::Any => OpenGlProfileHint::Any,
    };

    let mut hints = vec![
        WindowHint::ContextVersion(config.context.major, config.context.minor),
        WindowHint::OpenGlProfile(profile),
        WindowHint::Resizable(config.window.resizable),
    ];

    // macOS only hands out core contexts when forward compatibility is requested
    if cfg!(target_os = "macos") && config.context.profile == ContextProfile::Core {
        hints.push(WindowHint::OpenGlForwardCompat(true));
    }

    hints
}

/// GLFW window with a current OpenGL context
pub struct GlfwWindow {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl GlfwWindow {
    /// Create the window and make its context current on this thread
    pub fn create(
        session: &mut Session,
        config: &BootstrapConfig,
    ) -> Result<Self, BootstrapError> {
        let glfw = &mut session.glfw;
        glfw.default_window_hints();
        for hint in window_hints(config) {
            glfw.window_hint(hint);
        }

        let (mut window, events) = glfw
            .create_window(
                config.window.width,
                config.window.height,
                &config.window.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or_else(|| BootstrapError::WindowCreation {
                width: config.window.width,
                height: config.window.height,
                major: config.context.major,
                minor: config.context.minor,
                profile: config.context.profile,
            })?;

        window.make_current();
        window.set_framebuffer_size_polling(true);
        window.set_close_polling(true);

        let interval = if config.render.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        };
        glfw.set_swap_interval(interval);

        log::info!(
            "Created {}x{} window \"{}\" with OpenGL {}.{} {:?} context",
            config.window.width,
            config.window.height,
            config.window.title,
            config.context.major,
            config.context.minor,
            config.context.profile,
        );

        Ok(Self { window, events })
    }

    /// Resolve an OpenGL entry point through the current context
    pub fn proc_address(&mut self, symbol: &str) -> *const c_void {
        self.window.get_proc_address(symbol) as *const c_void
    }
}

impl WindowBackend for GlfwWindow {
    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn is_key_pressed(&self, key: glfw::Key) -> bool {
        self.window.get_key(key) == glfw::Action::Press
    }

    fn poll_events(&mut self) -> FrameEvents {
        self.window.glfw.poll_events();

        let mut frame_events = FrameEvents::default();
        for (_, event) in glfw::flush_messages(&self.events) {
            match event {
                glfw::WindowEvent::FramebufferSize(width, height) => {
                    frame_events.record_resize(width, height);
                }
                glfw::WindowEvent::Close => frame_events.close_requested = true,
                _ => {}
            }
        }
        frame_events
    }

    fn framebuffer_size(&self) -> (i32, i32) {
        self.window.get_framebuffer_size()
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }
}

impl Drop for GlfwWindow {
    fn drop(&mut self) {
        log::debug!("Destroying window and its OpenGL context");
    }
}
