//! Cube geometry and its upload to the GPU.
//!
//! The cube is described entirely by static data:
//!
//! - [`Vertex`]: position and RGBA color, laid out for direct GPU upload
//! - [`CUBE_VERTICES`] / [`CUBE_INDICES`]: 24 vertices and 36 indices, six faces
//! - [`Mesh`]: the uploaded vertex and index buffers, ready for indexed drawing
//!
//! # Vertex Layout
//!
//! | Attribute | Format    | Offset |
//! |-----------|-----------|--------|
//! | position  | Float32x3 | 0      |
//! | color     | Float32x4 | 12     |
//!
//! Shader locations are not fixed here; they come from the resolved
//! [`ProgramInterface`](crate::ProgramInterface) so the buffer layout always
//! matches the compiled program.

use crate::gpu::GpuContext;

/// A cube vertex: model-space position plus a flat face color.
///
/// `#[repr(C)]` with [`bytemuck::Pod`] so a slice of vertices can be cast
/// straight to bytes for buffer upload. Each vertex is 28 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in model space.
    pub position: [f32; 3],
    /// Linear RGBA color.
    pub color: [f32; 4],
}

impl Vertex {
    /// Byte offset of [`Vertex::position`].
    pub const POSITION_OFFSET: u64 = 0;
    /// Byte offset of [`Vertex::color`].
    pub const COLOR_OFFSET: u64 = 12;
    /// Distance in bytes between consecutive vertices.
    pub const STRIDE: u64 = std::mem::size_of::<Vertex>() as u64;

    pub const fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }

    /// Vertex attributes for the given shader locations.
    pub fn attributes(position_location: u32, color_location: u32) -> [wgpu::VertexAttribute; 2] {
        [
            wgpu::VertexAttribute {
                offset: Self::POSITION_OFFSET,
                shader_location: position_location,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: Self::COLOR_OFFSET,
                shader_location: color_location,
                format: wgpu::VertexFormat::Float32x4,
            },
        ]
    }

    /// Per-vertex buffer layout over a set of [`Vertex::attributes`].
    pub fn layout(attributes: &[wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }
}

pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
pub const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
pub const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
pub const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
pub const MAGENTA: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
pub const CYAN: [f32; 4] = [0.0, 1.0, 1.0, 1.0];

/// Face colors in vertex order: -Z, +Z, -X, +X, -Y, +Y.
pub const FACE_COLORS: [[f32; 4]; 6] = [RED, GREEN, YELLOW, BLUE, MAGENTA, CYAN];

/// Cube spanning `[-1, 1]` on each axis, four vertices per face.
///
/// Every face is listed counter-clockwise as seen from outside the cube.
#[rustfmt::skip]
pub const CUBE_VERTICES: [Vertex; 24] = [
    // Back (Z-)
    Vertex::new([ 1.0, -1.0, -1.0], RED),
    Vertex::new([-1.0, -1.0, -1.0], RED),
    Vertex::new([-1.0,  1.0, -1.0], RED),
    Vertex::new([ 1.0,  1.0, -1.0], RED),
    // Front (Z+)
    Vertex::new([-1.0, -1.0,  1.0], GREEN),
    Vertex::new([ 1.0, -1.0,  1.0], GREEN),
    Vertex::new([ 1.0,  1.0,  1.0], GREEN),
    Vertex::new([-1.0,  1.0,  1.0], GREEN),
    // Left (X-)
    Vertex::new([-1.0, -1.0, -1.0], YELLOW),
    Vertex::new([-1.0, -1.0,  1.0], YELLOW),
    Vertex::new([-1.0,  1.0,  1.0], YELLOW),
    Vertex::new([-1.0,  1.0, -1.0], YELLOW),
    // Right (X+)
    Vertex::new([ 1.0, -1.0,  1.0], BLUE),
    Vertex::new([ 1.0, -1.0, -1.0], BLUE),
    Vertex::new([ 1.0,  1.0, -1.0], BLUE),
    Vertex::new([ 1.0,  1.0,  1.0], BLUE),
    // Bottom (Y-)
    Vertex::new([-1.0, -1.0, -1.0], MAGENTA),
    Vertex::new([ 1.0, -1.0, -1.0], MAGENTA),
    Vertex::new([ 1.0, -1.0,  1.0], MAGENTA),
    Vertex::new([-1.0, -1.0,  1.0], MAGENTA),
    // Top (Y+)
    Vertex::new([-1.0,  1.0,  1.0], CYAN),
    Vertex::new([ 1.0,  1.0,  1.0], CYAN),
    Vertex::new([ 1.0,  1.0, -1.0], CYAN),
    Vertex::new([-1.0,  1.0, -1.0], CYAN),
];

/// Two triangles per face, `0 1 2` and `2 3 0` within each group of four.
#[rustfmt::skip]
pub const CUBE_INDICES: [u16; 36] = [
    0,  1,  2,  2,  3,  0,  // back
    4,  5,  6,  6,  7,  4,  // front
    8,  9,  10, 10, 11, 8,  // left
    12, 13, 14, 14, 15, 12, // right
    16, 17, 18, 18, 19, 16, // bottom
    20, 21, 22, 22, 23, 20, // top
];

/// GPU-resident indexed geometry.
///
/// Immutable once uploaded. Draw with [`Mesh::bind`] followed by an indexed
/// draw of [`Mesh::index_count`] indices.
#[derive(Debug)]
pub struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl Mesh {
    /// Uploads vertex and index data into static GPU buffers.
    pub fn upload(gpu: &GpuContext, vertices: &[Vertex], indices: &[u16]) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Cube Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Cube Index Buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        log::debug!(
            "uploaded mesh: {} vertices, {} indices",
            vertices.len(),
            indices.len()
        );

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    /// Uploads the six-colored cube.
    pub fn cube(gpu: &GpuContext) -> Self {
        Self::upload(gpu, &CUBE_VERTICES, &CUBE_INDICES)
    }

    /// Number of indices to draw.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Binds the vertex buffer to slot 0 and the index buffer.
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
    }
}
