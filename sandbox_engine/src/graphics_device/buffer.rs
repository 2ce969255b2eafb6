/// Buffer descriptors and data formats

use bitflags::bitflags;

bitflags! {
    /// Pipeline stages a buffer or texture may be bound to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BindFlags: u32 {
        const VERTEX_BUFFER   = 0x01;
        const INDEX_BUFFER    = 0x02;
        const CONSTANT_BUFFER = 0x04;
        const SHADER_RESOURCE = 0x08;
        const RENDER_TARGET   = 0x20;
        const DEPTH_STENCIL   = 0x40;
    }
}

/// Expected CPU/GPU access pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// GPU read/write, updated by copies
    Default,
    /// Written once at creation, never modified
    Immutable,
    /// Rewritten by the CPU through map/discard, read by the GPU
    Dynamic,
}

/// Descriptor for creating a buffer
#[derive(Debug, Clone, PartialEq)]
pub struct BufferDesc {
    /// Size in bytes
    pub byte_width: u32,
    pub bind: BindFlags,
    pub usage: BufferUsage,
}

impl BufferDesc {
    /// Immutable vertex buffer of `byte_width` bytes
    pub fn vertex(byte_width: usize) -> Self {
        Self {
            byte_width: byte_width as u32,
            bind: BindFlags::VERTEX_BUFFER,
            usage: BufferUsage::Immutable,
        }
    }

    /// Immutable index buffer of `byte_width` bytes
    pub fn index(byte_width: usize) -> Self {
        Self {
            byte_width: byte_width as u32,
            bind: BindFlags::INDEX_BUFFER,
            usage: BufferUsage::Immutable,
        }
    }

    /// CPU-writable constant buffer updated with map/discard
    pub fn constant(byte_width: usize) -> Self {
        Self {
            byte_width: byte_width as u32,
            bind: BindFlags::CONSTANT_BUFFER,
            usage: BufferUsage::Dynamic,
        }
    }
}

/// Element format for vertex attributes, indices and pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum Format {
    // Vertex attributes
    R32G32_FLOAT,
    R32G32B32_FLOAT,
    R32G32B32A32_FLOAT,

    // Indices
    R16_UINT,
    R32_UINT,

    // Color targets and textures
    R8G8B8A8_UNORM,
    B8G8R8A8_UNORM,

    // Depth-stencil
    D24_UNORM_S8_UINT,
}

impl Format {
    /// Size of one element in bytes
    pub fn size_bytes(&self) -> u32 {
        match self {
            Format::R32G32_FLOAT => 8,
            Format::R32G32B32_FLOAT => 12,
            Format::R32G32B32A32_FLOAT => 16,
            Format::R16_UINT => 2,
            Format::R32_UINT => 4,
            Format::R8G8B8A8_UNORM => 4,
            Format::B8G8R8A8_UNORM => 4,
            Format::D24_UNORM_S8_UINT => 4,
        }
    }
}
