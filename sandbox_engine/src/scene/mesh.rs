/// Vertex formats, cube meshes and their GPU buffers

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::error::{Error, Result};
use crate::graphics_device::{
    BufferDesc, BufferHandle, DeviceContext, Format, GraphicsDevice, InputElementDesc,
    PrimitiveTopology,
};

// ===== VERTEX FORMATS =====

/// Vertex with a position and an RGB color
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct VertexPositionColor {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl VertexPositionColor {
    pub const INPUT_LAYOUT: [InputElementDesc; 2] = [
        InputElementDesc::per_vertex("POSITION", Format::R32G32B32_FLOAT, 0),
        InputElementDesc::per_vertex("COLOR", Format::R32G32B32_FLOAT, 12),
    ];
}

/// Vertex with a position, a texture coordinate and a normal
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct VertexPositionTextureNormal {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

impl VertexPositionTextureNormal {
    pub const INPUT_LAYOUT: [InputElementDesc; 3] = [
        InputElementDesc::per_vertex("POSITION", Format::R32G32B32_FLOAT, 0),
        InputElementDesc::per_vertex("TEXCOORD", Format::R32G32_FLOAT, 12),
        InputElementDesc::per_vertex("NORMAL", Format::R32G32B32_FLOAT, 20),
    ];
}

// ===== MESH DATA =====

/// CPU-side indexed triangle list
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData<V> {
    pub vertices: Vec<V>,
    pub indices: Vec<u16>,
}

impl<V> MeshData<V> {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Unit cube centered on the origin, colored by corner position
///
/// Eight shared corners; triangles wind clockwise seen from outside.
pub fn colored_cube() -> MeshData<VertexPositionColor> {
    let mut vertices = Vec::with_capacity(8);
    for corner in 0..8u8 {
        let x = if corner & 0b100 != 0 { 0.5 } else { -0.5 };
        let y = if corner & 0b010 != 0 { 0.5 } else { -0.5 };
        let z = if corner & 0b001 != 0 { 0.5 } else { -0.5 };
        vertices.push(VertexPositionColor {
            position: [x, y, z],
            color: [x + 0.5, y + 0.5, z + 0.5],
        });
    }

    let indices = vec![
        0, 2, 1, // -x
        1, 2, 3,
        4, 5, 6, // +x
        5, 7, 6,
        0, 1, 5, // -y
        0, 5, 4,
        2, 6, 7, // +y
        2, 7, 3,
        0, 4, 6, // -z
        0, 6, 2,
        1, 3, 7, // +z
        1, 7, 5,
    ];

    MeshData { vertices, indices }
}

/// Unit cube with per-face normals and texture coordinates
///
/// Four vertices per face so every face maps the full [0, 1] texture.
pub fn textured_cube() -> MeshData<VertexPositionTextureNormal> {
    // (normal, u axis, v axis) with u x v = normal
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in faces {
        let base = vertices.len() as u16;
        let center = normal * 0.5;
        let (u, v) = (u * 0.5, v * 0.5);

        let corners = [
            (center - u - v, [0.0, 1.0]),
            (center + u - v, [1.0, 1.0]),
            (center + u + v, [1.0, 0.0]),
            (center - u + v, [0.0, 0.0]),
        ];
        for (position, uv) in corners {
            vertices.push(VertexPositionTextureNormal {
                position: position.to_array(),
                uv,
                normal: normal.to_array(),
            });
        }

        indices.extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
    }

    MeshData { vertices, indices }
}

// ===== GPU BUFFERS =====

/// Immutable vertex and index buffers for one mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshBuffers {
    pub vertex_buffer: BufferHandle,
    pub index_buffer: BufferHandle,
    pub index_count: u32,
    pub stride: u32,
}

impl MeshBuffers {
    /// Upload `mesh` into two immutable buffers
    ///
    /// # Errors
    ///
    /// `InvalidResource` for an empty mesh, or any device creation error. The
    /// vertex buffer is released again if the index buffer fails.
    pub fn create<V: Pod>(device: &dyn GraphicsDevice, mesh: &MeshData<V>) -> Result<Self> {
        if mesh.vertices.is_empty() || mesh.indices.is_empty() {
            return Err(Error::InvalidResource("mesh has no geometry".to_string()));
        }

        let vertex_bytes: &[u8] = bytemuck::cast_slice(&mesh.vertices);
        let index_bytes: &[u8] = bytemuck::cast_slice(&mesh.indices);

        let vertex_buffer =
            device.create_buffer(&BufferDesc::vertex(vertex_bytes.len()), Some(vertex_bytes))?;
        let index_buffer =
            match device.create_buffer(&BufferDesc::index(index_bytes.len()), Some(index_bytes)) {
                Ok(buffer) => buffer,
                Err(e) => {
                    device.release(vertex_buffer.into());
                    return Err(e);
                }
            };

        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            stride: std::mem::size_of::<V>() as u32,
        })
    }

    /// Bind both buffers and a triangle-list topology
    pub fn bind(&self, context: &dyn DeviceContext) {
        context.set_vertex_buffer(0, self.vertex_buffer, self.stride, 0);
        context.set_index_buffer(self.index_buffer, Format::R16_UINT, 0);
        context.set_primitive_topology(PrimitiveTopology::TriangleList);
    }

    pub fn draw(&self, context: &dyn DeviceContext) {
        context.draw_indexed(self.index_count, 0, 0);
    }

    pub fn release(&self, device: &dyn GraphicsDevice) {
        device.release(self.vertex_buffer.into());
        device.release(self.index_buffer.into());
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
