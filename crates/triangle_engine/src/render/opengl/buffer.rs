//! Static geometry upload
//!
//! One vertex array object, one vertex buffer and one index buffer per mesh,
//! filled once with static usage and deleted together on drop.

use std::rc::Rc;

use crate::render::mesh::Mesh;
use crate::render::opengl::api::{BufferTarget, GraphicsApi};
use crate::render::opengl::shader::ShaderProgram;
use crate::render::opengl::GraphicsError;

/// Vertex array, vertex buffer and index buffer for one mesh
pub struct GeometryBuffers<G: GraphicsApi> {
    api: Rc<G>,
    vertex_array: G::VertexArray,
    vertex_buffer: G::Buffer,
    index_buffer: G::Buffer,
    index_count: i32,
}

impl<G: GraphicsApi> GeometryBuffers<G> {
    /// Upload `mesh` to the GPU
    ///
    /// Bind order is fixed: vertex array, vertex buffer (data copied in),
    /// index buffer (data copied in), then attribute pointers against the
    /// bound vertex buffer. The index buffer binding is recorded in the
    /// vertex array, so the array is unbound before the index buffer.
    pub fn upload(api: &Rc<G>, mesh: &Mesh) -> Result<Self, GraphicsError> {
        let vertex_array = api
            .create_vertex_array()
            .map_err(|reason| GraphicsError::ObjectCreation { kind: "vertex array", reason })?;
        let vertex_buffer = match api.create_buffer() {
            Ok(buffer) => buffer,
            Err(reason) => {
                api.delete_vertex_array(vertex_array);
                return Err(GraphicsError::ObjectCreation { kind: "vertex buffer", reason });
            }
        };
        let index_buffer = match api.create_buffer() {
            Ok(buffer) => buffer,
            Err(reason) => {
                api.delete_buffer(vertex_buffer);
                api.delete_vertex_array(vertex_array);
                return Err(GraphicsError::ObjectCreation { kind: "index buffer", reason });
            }
        };

        api.bind_vertex_array(Some(vertex_array));

        api.bind_buffer(BufferTarget::Vertex, Some(vertex_buffer));
        api.buffer_static_data(BufferTarget::Vertex, bytemuck::cast_slice(mesh.vertices()));

        api.bind_buffer(BufferTarget::Index, Some(index_buffer));
        api.buffer_static_data(BufferTarget::Index, bytemuck::cast_slice(mesh.indices()));

        let layout = mesh.layout();
        for attribute in layout.attributes() {
            api.vertex_attribute(attribute, layout.byte_stride());
        }

        api.bind_buffer(BufferTarget::Vertex, None);
        api.bind_vertex_array(None);

        log::debug!(
            "Uploaded {} vertices / {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        Ok(Self {
            api: Rc::clone(api),
            vertex_array,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices().len() as i32,
        })
    }

    /// Number of indices drawn per frame
    pub const fn index_count(&self) -> i32 {
        self.index_count
    }

    /// Issue the indexed draw; the caller binds the program
    pub fn draw(&self) {
        self.api.bind_vertex_array(Some(self.vertex_array));
        self.api.draw_indexed_triangles(self.index_count);
        self.api.bind_vertex_array(None);
    }
}

impl<G: GraphicsApi> Drop for GeometryBuffers<G> {
    fn drop(&mut self) {
        log::debug!("Deleting geometry buffers");
        self.api.delete_vertex_array(self.vertex_array);
        self.api.delete_buffer(self.vertex_buffer);
        self.api.delete_buffer(self.index_buffer);
    }
}

/// A program and the geometry it draws
///
/// Field order is drop order: the buffers are released before the program.
pub struct Drawable<G: GraphicsApi> {
    geometry: GeometryBuffers<G>,
    program: ShaderProgram<G>,
}

impl<G: GraphicsApi> Drawable<G> {
    /// Pair a program with geometry
    pub fn new(program: ShaderProgram<G>, geometry: GeometryBuffers<G>) -> Self {
        Self { geometry, program }
    }

    /// Bind program, draw, unbind
    pub fn draw(&self) {
        self.program.bind();
        self.geometry.draw();
        self.program.unbind();
    }

    /// Program half
    pub const fn program(&self) -> &ShaderProgram<G> {
        &self.program
    }

    /// Geometry half
    pub const fn geometry(&self) -> &GeometryBuffers<G> {
        &self.geometry
    }
}
