//! Static mesh data
//!
//! Interleaved `f32` vertex data, a `u32` index list and the attribute
//! layout describing the interleaving. These are plain data structures with
//! no GL dependency; the upload lives in `opengl::buffer`.
//!
//! The layout must describe the data exactly. The GPU has no way to check
//! it, so [`Mesh::new`] does the checks that can be done on the CPU side.

use thiserror::Error;

/// One vertex attribute inside an interleaved vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader attribute location
    pub location: u32,
    /// Number of `f32` components (1..=4)
    pub components: u32,
    /// Offset from the start of the vertex, in floats
    pub offset: u32,
}

impl VertexAttribute {
    /// Offset in bytes
    pub const fn byte_offset(&self) -> i32 {
        (self.offset as usize * std::mem::size_of::<f32>()) as i32
    }
}

/// Attribute layout of an interleaved vertex buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
    stride: u32,
}

impl VertexLayout {
    /// Build a layout from attributes and a stride in floats
    pub const fn new(attributes: Vec<VertexAttribute>, stride: u32) -> Self {
        Self { attributes, stride }
    }

    /// `vec3` position at location 0
    pub fn position_only() -> Self {
        Self::new(
            vec![VertexAttribute { location: 0, components: 3, offset: 0 }],
            3,
        )
    }

    /// `vec3` position at location 0 followed by `vec3` color at location 1
    pub fn position_color() -> Self {
        Self::new(
            vec![
                VertexAttribute { location: 0, components: 3, offset: 0 },
                VertexAttribute { location: 1, components: 3, offset: 3 },
            ],
            6,
        )
    }

    /// Attributes in declaration order
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Floats per vertex
    pub const fn stride(&self) -> u32 {
        self.stride
    }

    /// Bytes per vertex
    pub const fn byte_stride(&self) -> i32 {
        (self.stride as usize * std::mem::size_of::<f32>()) as i32
    }
}

/// Mesh validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// Layout stride is zero
    #[error("vertex layout has a zero stride")]
    ZeroStride,

    /// An attribute reads past the end of the vertex
    #[error(
        "attribute at location {location} spans floats {start}..{end} but the stride is {stride}"
    )]
    AttributeOutOfStride {
        /// Attribute location
        location: u32,
        /// First float read
        start: u32,
        /// One past the last float read
        end: u32,
        /// Floats per vertex
        stride: u32,
    },

    /// An attribute has an unsupported component count
    #[error("attribute at location {location} has {components} components, expected 1..=4")]
    InvalidComponentCount {
        /// Attribute location
        location: u32,
        /// Declared component count
        components: u32,
    },

    /// Vertex data does not split evenly into vertices
    #[error("{floats} floats do not split into vertices of stride {stride}")]
    RaggedVertexData {
        /// Total floats
        floats: usize,
        /// Floats per vertex
        stride: u32,
    },

    /// Index count is not a whole number of triangles
    #[error("{0} indices do not form whole triangles")]
    IncompleteTriangle(usize),

    /// Index refers past the last vertex
    #[error("index {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index
        index: u32,
        /// Number of vertices
        vertex_count: usize,
    },
}

/// Static indexed triangle mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<f32>,
    indices: Vec<u32>,
    layout: VertexLayout,
}

impl Mesh {
    /// Create a mesh, checking the layout against the data
    pub fn new(
        vertices: Vec<f32>,
        indices: Vec<u32>,
        layout: VertexLayout,
    ) -> Result<Self, GeometryError> {
        let stride = layout.stride();
        if stride == 0 {
            return Err(GeometryError::ZeroStride);
        }

        for attribute in layout.attributes() {
            if !(1..=4).contains(&attribute.components) {
                return Err(GeometryError::InvalidComponentCount {
                    location: attribute.location,
                    components: attribute.components,
                });
            }
            let end = attribute.offset + attribute.components;
            if end > stride {
                return Err(GeometryError::AttributeOutOfStride {
                    location: attribute.location,
                    start: attribute.offset,
                    end,
                    stride,
                });
            }
        }

        if vertices.len() % stride as usize != 0 {
            return Err(GeometryError::RaggedVertexData { floats: vertices.len(), stride });
        }

        if indices.len() % 3 != 0 {
            return Err(GeometryError::IncompleteTriangle(indices.len()));
        }

        let vertex_count = vertices.len() / stride as usize;
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(GeometryError::IndexOutOfRange { index, vertex_count });
        }

        Ok(Self { vertices, indices, layout })
    }

    /// The documented single triangle: three positions, one triangle
    #[rustfmt::skip]
    pub fn triangle() -> Self {
        Self {
            vertices: vec![
                -0.5, -0.5, 0.0,
                 0.5, -0.5, 0.0,
                 0.0,  0.5, 0.0,
            ],
            indices: vec![0, 1, 2],
            layout: VertexLayout::position_only(),
        }
    }

    /// Two triangles sharing an edge, with per-vertex colors
    #[rustfmt::skip]
    pub fn rectangle() -> Self {
        Self {
            vertices: vec![
                // position         // color
                 0.5,  0.5, 0.0,    1.0, 0.0, 0.0,
                 0.5, -0.5, 0.0,    0.0, 1.0, 0.0,
                -0.5, -0.5, 0.0,    0.0, 0.0, 1.0,
                -0.5,  0.5, 0.0,    1.0, 1.0, 0.0,
            ],
            indices: vec![
                0, 1, 3,
                1, 2, 3,
            ],
            layout: VertexLayout::position_color(),
        }
    }

    /// Interleaved vertex data
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Triangle indices
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Attribute layout
    pub const fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.layout.stride() as usize
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
