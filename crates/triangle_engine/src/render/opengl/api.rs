//! The subset of OpenGL the engine consumes
//!
//! [`GraphicsApi`] is the seam between the engine and the GL binding. The
//! production implementation forwards to [`glow::Context`]; tests substitute
//! a recording implementation. Every method assumes the owning context is
//! current on the calling thread.

#![allow(unsafe_code)]

use std::fmt::Debug;

use bitflags::bitflags;
use glow::HasContext;

use crate::render::mesh::VertexAttribute;
use crate::render::viewport::Viewport;

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex stage
    Vertex,
    /// Fragment stage
    Fragment,
}

impl ShaderStage {
    const fn gl_enum(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

/// Buffer binding point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    /// Per-vertex attribute data
    Vertex,
    /// Element indices
    Index,
}

impl BufferTarget {
    const fn gl_enum(self) -> u32 {
        match self {
            Self::Vertex => glow::ARRAY_BUFFER,
            Self::Index => glow::ELEMENT_ARRAY_BUFFER,
        }
    }
}

bitflags! {
    /// Render targets cleared at the start of a frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearTargets: u32 {
        /// Color target
        const COLOR = glow::COLOR_BUFFER_BIT;
        /// Depth target
        const DEPTH = glow::DEPTH_BUFFER_BIT;
    }
}

/// OpenGL operations used by the bootstrap, shader build, geometry upload
/// and render loop
pub trait GraphicsApi {
    /// Shader stage object
    type Shader: Copy + Debug;
    /// Linked program object
    type Program: Copy + Debug;
    /// Buffer object
    type Buffer: Copy + Debug;
    /// Vertex array object
    type VertexArray: Copy + Debug;

    /// Create an empty shader object for `stage`
    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    /// Set the source of `shader` and compile it
    fn compile_shader(&self, shader: Self::Shader, source: &str);
    /// Compile status of the last compile
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    /// Compiler diagnostics
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    /// Delete a shader object
    fn delete_shader(&self, shader: Self::Shader);

    /// Create an empty program object
    fn create_program(&self) -> Result<Self::Program, String>;
    /// Attach a compiled stage to a program
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    /// Link attached stages
    fn link_program(&self, program: Self::Program);
    /// Link status of the last link
    fn program_link_status(&self, program: Self::Program) -> bool;
    /// Linker diagnostics
    fn program_info_log(&self, program: Self::Program) -> String;
    /// Make `program` current, or unbind with `None`
    fn use_program(&self, program: Option<Self::Program>);
    /// Delete a program object
    fn delete_program(&self, program: Self::Program);

    /// Create a vertex array object
    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    /// Bind a vertex array, or unbind with `None`
    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);
    /// Delete a vertex array object
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);

    /// Create a buffer object
    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    /// Bind a buffer to `target`, or unbind with `None`
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>);
    /// Copy `data` into the buffer bound to `target` with static usage
    fn buffer_static_data(&self, target: BufferTarget, data: &[u8]);
    /// Delete a buffer object
    fn delete_buffer(&self, buffer: Self::Buffer);

    /// Declare and enable a float attribute against the bound vertex buffer
    fn vertex_attribute(&self, attribute: &VertexAttribute, byte_stride: i32);

    /// Set the viewport rectangle
    fn set_viewport(&self, viewport: Viewport);
    /// Set the clear color
    fn set_clear_color(&self, color: [f32; 4]);
    /// Clear the given targets
    fn clear(&self, targets: ClearTargets);
    /// Toggle line rasterization for front and back faces
    fn set_wireframe(&self, enabled: bool);
    /// Draw `index_count` indices from the bound index buffer as triangles
    fn draw_indexed_triangles(&self, index_count: i32);
}

impl GraphicsApi for glow::Context {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type Buffer = glow::Buffer;
    type VertexArray = glow::VertexArray;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { HasContext::create_shader(self, stage.gl_enum()) }
    }

    fn compile_shader(&self, shader: Self::Shader, source: &str) {
        unsafe {
            self.shader_source(shader, source);
            HasContext::compile_shader(self, shader);
        }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { HasContext::link_program(self, program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.get_program_info_log(program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String> {
        unsafe { HasContext::create_vertex_array(self) }
    }

    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>) {
        unsafe { HasContext::bind_vertex_array(self, vertex_array) }
    }

    fn delete_vertex_array(&self, vertex_array: Self::VertexArray) {
        unsafe { HasContext::delete_vertex_array(self, vertex_array) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { HasContext::create_buffer(self) }
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>) {
        unsafe { HasContext::bind_buffer(self, target.gl_enum(), buffer) }
    }

    fn buffer_static_data(&self, target: BufferTarget, data: &[u8]) {
        unsafe { self.buffer_data_u8_slice(target.gl_enum(), data, glow::STATIC_DRAW) }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { HasContext::delete_buffer(self, buffer) }
    }

    fn vertex_attribute(&self, attribute: &VertexAttribute, byte_stride: i32) {
        unsafe {
            self.vertex_attrib_pointer_f32(
                attribute.location,
                attribute.components as i32,
                glow::FLOAT,
                false,
                byte_stride,
                attribute.byte_offset(),
            );
            self.enable_vertex_attrib_array(attribute.location);
        }
    }

    fn set_viewport(&self, viewport: Viewport) {
        unsafe { self.viewport(viewport.x, viewport.y, viewport.width, viewport.height) }
    }

    fn set_clear_color(&self, color: [f32; 4]) {
        unsafe { self.clear_color(color[0], color[1], color[2], color[3]) }
    }

    fn clear(&self, targets: ClearTargets) {
        unsafe { HasContext::clear(self, targets.bits()) }
    }

    fn set_wireframe(&self, enabled: bool) {
        let mode = if enabled { glow::LINE } else { glow::FILL };
        unsafe { self.polygon_mode(glow::FRONT_AND_BACK, mode) }
    }

    fn draw_indexed_triangles(&self, index_count: i32) {
        unsafe { self.draw_elements(glow::TRIANGLES, index_count, glow::UNSIGNED_INT, 0) }
    }
}
