/// Constant buffer layouts shared with the demo shaders
///
/// Each layout mirrors a cbuffer declaration byte for byte; the declared size
/// is asserted at compile time.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::constant_buffer::{GpuMatrix, ShaderConstants};
use crate::scene::Light;

macro_rules! shader_constants {
    ($layout:ident, $size:expr) => {
        impl ShaderConstants for $layout {
            const SHADER_SIZE: usize = $size;
            const NAME: &'static str = stringify!($layout);
        }

        const _: () = assert!(std::mem::size_of::<$layout>() == $size);
    };
}

/// Model, view and projection transforms (vertex shader, slot 0)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct ModelViewProjectionData {
    pub model: GpuMatrix,
    pub view: GpuMatrix,
    pub projection: GpuMatrix,
}

shader_constants!(ModelViewProjectionData, 192);

impl ModelViewProjectionData {
    pub fn new(model: Mat4, view: Mat4, projection: Mat4) -> Self {
        Self {
            model: model.into(),
            view: view.into(),
            projection: projection.into(),
        }
    }
}

/// World, view and projection transforms of the lit shader
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct MatrixBufferData {
    pub world: GpuMatrix,
    pub view: GpuMatrix,
    pub projection: GpuMatrix,
}

shader_constants!(MatrixBufferData, 192);

/// Eye position for specular lighting (vertex shader, slot 1)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct CameraBufferData {
    pub camera_position: [f32; 3],
    pub padding: f32,
}

shader_constants!(CameraBufferData, 16);

impl CameraBufferData {
    pub fn new(position: Vec3) -> Self {
        Self {
            camera_position: position.to_array(),
            padding: 0.0,
        }
    }
}

/// Directional light (pixel shader, slot 0)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct LightBufferData {
    pub ambient_color: [f32; 4],
    pub diffuse_color: [f32; 4],
    pub light_direction: [f32; 3],
    pub specular_power: f32,
    pub specular_color: [f32; 4],
}

shader_constants!(LightBufferData, 64);

impl LightBufferData {
    pub fn from_light(light: &Light) -> Self {
        Self {
            ambient_color: light.ambient_color().to_array(),
            diffuse_color: light.diffuse_color().to_array(),
            light_direction: light.direction().to_array(),
            specular_power: light.specular_power(),
            specular_color: light.specular_color().to_array(),
        }
    }
}

#[cfg(test)]
#[path = "layouts_tests.rs"]
mod tests;
