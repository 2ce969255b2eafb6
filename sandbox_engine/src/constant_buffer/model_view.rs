/// Model/view/projection constant buffer used by the rotating demo scenes

use glam::Mat4;

use crate::constant_buffer::{ConstantBuffer, GpuMatrix, ModelViewProjectionData};
use crate::error::Result;
use crate::graphics_device::{DeviceContext, GraphicsDevice, ShaderStage};

/// Constant buffer holding one `ModelViewProjectionData`
///
/// Setters only touch the CPU copy; `apply_changes` uploads all three
/// matrices at once.
#[derive(Default)]
pub struct ModelViewConstantBuffer {
    buffer: ConstantBuffer<ModelViewProjectionData>,
}

impl ModelViewConstantBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, device: &dyn GraphicsDevice) -> Result<()> {
        self.buffer.create(device)
    }

    pub fn release(&mut self, device: &dyn GraphicsDevice) {
        self.buffer.release(device);
    }

    pub fn is_created(&self) -> bool {
        self.buffer.is_created()
    }

    pub fn data(&self) -> &ModelViewProjectionData {
        self.buffer.value()
    }

    pub fn set_model(&mut self, model: Mat4) {
        self.buffer.value_mut().model = GpuMatrix::from_mat4(model);
    }

    pub fn set_view(&mut self, view: Mat4) {
        self.buffer.value_mut().view = GpuMatrix::from_mat4(view);
    }

    pub fn set_projection(&mut self, projection: Mat4) {
        self.buffer.value_mut().projection = GpuMatrix::from_mat4(projection);
    }

    pub fn apply_changes(&mut self, context: &dyn DeviceContext) -> Result<()> {
        self.buffer.apply_changes(context)
    }

    pub fn bind_to_vertex_shader(&self, context: &dyn DeviceContext, slot: u32) -> Result<()> {
        self.buffer.bind(context, ShaderStage::Vertex, slot)
    }

    pub fn bind_to_pixel_shader(&self, context: &dyn DeviceContext, slot: u32) -> Result<()> {
        self.buffer.bind(context, ShaderStage::Pixel, slot)
    }
}

#[cfg(test)]
#[path = "model_view_tests.rs"]
mod tests;
