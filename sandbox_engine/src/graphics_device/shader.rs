/// Shader stages and vertex input layouts

use crate::graphics_device::Format;

/// Programmable stage a shader or binding targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Pixel,
}

/// One vertex attribute: semantic name and byte offset within the vertex
#[derive(Debug, Clone, PartialEq)]
pub struct InputElementDesc {
    pub semantic: &'static str,
    pub semantic_index: u32,
    pub format: Format,
    pub input_slot: u32,
    pub aligned_byte_offset: u32,
}

impl InputElementDesc {
    /// Per-vertex element in input slot 0
    pub const fn per_vertex(semantic: &'static str, format: Format, aligned_byte_offset: u32) -> Self {
        Self {
            semantic,
            semantic_index: 0,
            format,
            input_slot: 0,
            aligned_byte_offset,
        }
    }

    /// First byte past this element
    pub fn end_offset(&self) -> u32 {
        self.aligned_byte_offset + self.format.size_bytes()
    }
}

/// Size in bytes of a vertex described by `elements` in input slot 0
pub fn vertex_stride(elements: &[InputElementDesc]) -> u32 {
    elements
        .iter()
        .filter(|e| e.input_slot == 0)
        .map(InputElementDesc::end_offset)
        .max()
        .unwrap_or(0)
}
