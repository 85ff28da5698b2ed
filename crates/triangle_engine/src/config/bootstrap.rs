//! Bootstrap configuration
//!
//! Everything the window/context bootstrap and the render loop read before
//! the first frame: requested GL version and profile, window geometry,
//! clear color and optional shader source files.

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};

/// OpenGL profile requested from the windowing subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextProfile {
    /// Core profile, deprecated functionality removed
    Core,
    /// Compatibility profile
    Compatibility,
    /// Let the platform decide
    Any,
}

/// Requested context version and profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Major GL version
    pub major: u32,
    /// Minor GL version
    pub minor: u32,
    /// Profile selection
    pub profile: ContextProfile,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            major: 4,
            minor: 6,
            profile: ContextProfile::Core,
        }
    }
}

/// Window geometry and title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in screen coordinates
    pub width: u32,
    /// Window height in screen coordinates
    pub height: u32,
    /// Whether the user may resize the window
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "WindownTitle".to_string(),
            width: 800,
            height: 600,
            resizable: true,
        }
    }
}

/// Per-frame render settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// RGBA color the color target is cleared to every frame
    pub clear_color: [f32; 4],
    /// Wait for vertical blank on swap
    pub vsync: bool,
    /// Rasterize polygons as lines
    pub wireframe: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.2, 0.3, 0.3, 1.0],
            vsync: true,
            wireframe: false,
        }
    }
}

/// GLSL source files replacing the built-in shaders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderPaths {
    /// Vertex stage source file
    pub vertex: String,
    /// Fragment stage source file
    pub fragment: String,
}

/// Complete bootstrap configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Context version and profile
    pub context: ContextConfig,
    /// Window settings
    pub window: WindowConfig,
    /// Render settings
    pub render: RenderConfig,
    /// Optional shader source override
    pub shaders: Option<ShaderPaths>,
}

impl BootstrapConfig {
    /// Default file name the binaries look for in the working directory
    pub const DEFAULT_PATH: &'static str = "triangle.toml";

    /// Set the requested context version and profile
    #[must_use]
    pub fn with_context(mut self, major: u32, minor: u32, profile: ContextProfile) -> Self {
        self.context = ContextConfig { major, minor, profile };
        self
    }

    /// Set window size and title
    #[must_use]
    pub fn with_window(mut self, width: u32, height: u32, title: impl Into<String>) -> Self {
        self.window.width = width;
        self.window.height = height;
        self.window.title = title.into();
        self
    }

    /// Enable or disable wireframe rasterization
    #[must_use]
    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.render.wireframe = wireframe;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }

        if self.window.title.is_empty() {
            return Err(ConfigError::Invalid("window title cannot be empty".to_string()));
        }

        // Core profiles only exist from 3.2 onwards
        if self.context.profile == ContextProfile::Core
            && (self.context.major, self.context.minor) < (3, 2)
        {
            return Err(ConfigError::Invalid(format!(
                "core profile requires OpenGL 3.2 or newer, got {}.{}",
                self.context.major, self.context.minor
            )));
        }

        if self
            .render
            .clear_color
            .iter()
            .any(|c| !(0.0..=1.0).contains(c))
        {
            return Err(ConfigError::Invalid(format!(
                "clear color components must be within [0, 1], got {:?}",
                self.render.clear_color
            )));
        }

        Ok(())
    }
}

impl Config for BootstrapConfig {}
