//! Shader program compilation
//!
//! Compile and link failures are not fatal: they are logged and recorded on
//! the returned [`ShaderProgram`], which may then draw nothing. Only failure
//! to create the GL objects themselves is reported as an error.

use std::rc::Rc;

use crate::config::{ConfigError, ShaderPaths};
use crate::render::opengl::api::{GraphicsApi, ShaderStage};
use crate::render::opengl::GraphicsError;

/// Maximum diagnostic length kept per stage, in bytes
pub const INFO_LOG_CAPACITY: usize = 512;

/// Built-in vertex stage: passes position through, forwards color
pub const DEFAULT_VERTEX_SHADER: &str = r"#version 330 core
layout (location = 0) in vec3 aPos;
layout (location = 1) in vec3 aColor;

out vec3 vertexColor;

void main()
{
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
    vertexColor = aColor;
}
";

/// Built-in fragment stage: constant orange
pub const DEFAULT_FRAGMENT_SHADER: &str = r"#version 330 core
out vec4 FragColor;

void main()
{
    FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
";

/// Fragment stage using the interpolated vertex color
pub const VERTEX_COLOR_FRAGMENT_SHADER: &str = r"#version 330 core
in vec3 vertexColor;
out vec4 FragColor;

void main()
{
    FragColor = vec4(vertexColor, 1.0);
}
";

/// Which build step produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    /// Vertex stage compile
    CompileVertex,
    /// Fragment stage compile
    CompileFragment,
    /// Program link
    Link,
}

/// Failure report for one build step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDiagnostic {
    /// Failed step
    pub step: BuildStep,
    /// Driver log, truncated to [`INFO_LOG_CAPACITY`] bytes
    pub log: String,
}

/// Vertex and fragment source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    /// Vertex stage GLSL
    pub vertex: String,
    /// Fragment stage GLSL
    pub fragment: String,
}

impl ShaderSources {
    /// Pair of sources
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Read both stages from disk
    pub fn from_paths(paths: &ShaderPaths) -> Result<Self, ConfigError> {
        let vertex = std::fs::read_to_string(&paths.vertex)?;
        let fragment = std::fs::read_to_string(&paths.fragment)?;
        log::info!("Loaded shader sources {} and {}", paths.vertex, paths.fragment);
        Ok(Self { vertex, fragment })
    }

    /// Configured sources if present, otherwise `fallback`
    pub fn from_config_or(
        paths: Option<&ShaderPaths>,
        fallback: Self,
    ) -> Result<Self, ConfigError> {
        paths.map_or(Ok(fallback), Self::from_paths)
    }
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self::new(DEFAULT_VERTEX_SHADER, DEFAULT_FRAGMENT_SHADER)
    }
}

/// Linked program, deleted on drop
pub struct ShaderProgram<G: GraphicsApi> {
    api: Rc<G>,
    program: G::Program,
    diagnostics: Vec<ShaderDiagnostic>,
}

impl<G: GraphicsApi> ShaderProgram<G> {
    /// Compile both stages and link them
    ///
    /// Each step is checked and logged on its own. The intermediate stage
    /// objects are deleted after linking whether or not the link succeeded.
    pub fn build(api: &Rc<G>, sources: &ShaderSources) -> Result<Self, GraphicsError> {
        let mut diagnostics = Vec::new();

        let vertex = compile_stage(
            api.as_ref(),
            ShaderStage::Vertex,
            &sources.vertex,
            &mut diagnostics,
        )?;
        let fragment = match compile_stage(
            api.as_ref(),
            ShaderStage::Fragment,
            &sources.fragment,
            &mut diagnostics,
        ) {
            Ok(fragment) => fragment,
            Err(e) => {
                api.delete_shader(vertex);
                return Err(e);
            }
        };

        let program = match api.create_program() {
            Ok(program) => program,
            Err(e) => {
                api.delete_shader(vertex);
                api.delete_shader(fragment);
                return Err(GraphicsError::ObjectCreation { kind: "program", reason: e });
            }
        };

        api.attach_shader(program, vertex);
        api.attach_shader(program, fragment);
        api.link_program(program);

        if api.program_link_status(program) {
            log::debug!("Linked shader program {:?}", program);
        } else {
            let log = truncate_log(api.program_info_log(program));
            log::error!("Shader program link failed: {}", log);
            diagnostics.push(ShaderDiagnostic { step: BuildStep::Link, log });
        }

        api.delete_shader(vertex);
        api.delete_shader(fragment);

        Ok(Self {
            api: Rc::clone(api),
            program,
            diagnostics,
        })
    }

    /// Whether every compile and the link succeeded
    pub fn is_linked(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Failure reports, empty on success
    pub fn diagnostics(&self) -> &[ShaderDiagnostic] {
        &self.diagnostics
    }

    /// Raw program handle
    pub const fn handle(&self) -> G::Program {
        self.program
    }

    /// Make this program current
    pub fn bind(&self) {
        self.api.use_program(Some(self.program));
    }

    /// Unbind whatever program is current
    pub fn unbind(&self) {
        self.api.use_program(None);
    }
}

impl<G: GraphicsApi> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        log::debug!("Deleting shader program {:?}", self.program);
        self.api.delete_program(self.program);
    }
}

fn compile_stage<G: GraphicsApi>(
    api: &G,
    stage: ShaderStage,
    source: &str,
    diagnostics: &mut Vec<ShaderDiagnostic>,
) -> Result<G::Shader, GraphicsError> {
    let shader = api
        .create_shader(stage)
        .map_err(|reason| GraphicsError::ObjectCreation { kind: "shader", reason })?;
    api.compile_shader(shader, source);

    if !api.shader_compile_status(shader) {
        let log = truncate_log(api.shader_info_log(shader));
        log::error!("{:?} shader compilation failed: {}", stage, log);
        let step = match stage {
            ShaderStage::Vertex => BuildStep::CompileVertex,
            ShaderStage::Fragment => BuildStep::CompileFragment,
        };
        diagnostics.push(ShaderDiagnostic { step, log });
    }

    Ok(shader)
}

/// Cut a driver log down to [`INFO_LOG_CAPACITY`] bytes on a char boundary
fn truncate_log(mut log: String) -> String {
    if log.len() > INFO_LOG_CAPACITY {
        let mut end = INFO_LOG_CAPACITY;
        while !log.is_char_boundary(end) {
            end -= 1;
        }
        log.truncate(end);
    }
    log.trim_end().to_string()
}
