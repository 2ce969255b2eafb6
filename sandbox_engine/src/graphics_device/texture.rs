/// Texture, view and sampler descriptors

use crate::graphics_device::{BindFlags, Format};

/// Descriptor for creating a 2D texture
#[derive(Debug, Clone, PartialEq)]
pub struct TextureDesc {
    pub width: u32,
    pub height: u32,
    pub format: Format,
    pub mip_levels: u32,
    pub bind: BindFlags,
}

impl TextureDesc {
    /// Single-mip shader-readable texture
    pub fn sampled(width: u32, height: u32, format: Format) -> Self {
        Self {
            width,
            height,
            format,
            mip_levels: 1,
            bind: BindFlags::SHADER_RESOURCE,
        }
    }

    /// Depth-stencil target
    pub fn depth_stencil(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            format: Format::D24_UNORM_S8_UINT,
            mip_levels: 1,
            bind: BindFlags::DEPTH_STENCIL,
        }
    }

    /// Bytes of the top mip level
    pub fn top_level_size(&self) -> usize {
        self.width as usize * self.height as usize * self.format.size_bytes() as usize
    }
}

/// Texel filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    MinMagMipPoint,
    MinMagMipLinear,
    Anisotropic,
}

/// Texture coordinate handling outside [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    Wrap,
    Clamp,
    Mirror,
}

/// Descriptor for creating a sampler state
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerDesc {
    pub filter: Filter,
    pub address_u: AddressMode,
    pub address_v: AddressMode,
    pub max_anisotropy: u32,
}

impl Default for SamplerDesc {
    fn default() -> Self {
        Self {
            filter: Filter::MinMagMipLinear,
            address_u: AddressMode::Wrap,
            address_v: AddressMode::Wrap,
            max_anisotropy: 1,
        }
    }
}
