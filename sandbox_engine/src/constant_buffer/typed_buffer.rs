/// Typed constant buffers
///
/// A `ShaderConstants` layout is a POD struct whose size matches the cbuffer
/// declared in the shader. `ConstantBuffer<T>` keeps a CPU shadow copy of the
/// layout next to the GPU buffer and uploads it on `apply_changes`.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::constant_buffer::update_constant_buffer;
use crate::error::{Error, Result};
use crate::graphics_device::{BufferDesc, BufferHandle, DeviceContext, GraphicsDevice, ShaderStage};

/// POD layout of a shader constant buffer
pub trait ShaderConstants: Pod {
    /// Size of the cbuffer declared by the shader, in bytes
    const SHADER_SIZE: usize;

    /// Layout name used in diagnostics
    const NAME: &'static str;
}

/// Size of `T` after checking it against the shader declaration
///
/// # Errors
///
/// `Error::LayoutMismatch` when the size differs from `T::SHADER_SIZE` or is
/// not a multiple of 16 bytes.
pub fn checked_layout_size<T: ShaderConstants>() -> Result<usize> {
    let size = std::mem::size_of::<T>();
    if size != T::SHADER_SIZE || size % 16 != 0 {
        return Err(Error::LayoutMismatch {
            layout: T::NAME,
            expected: T::SHADER_SIZE,
            actual: size,
        });
    }
    Ok(size)
}

/// Matrix in the memory order shaders read
///
/// Only built by transposing a CPU matrix, so uploaded data is transposed
/// exactly once.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuMatrix([[f32; 4]; 4]);

impl GpuMatrix {
    pub const IDENTITY: GpuMatrix = GpuMatrix([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    pub fn from_mat4(matrix: Mat4) -> Self {
        Self(matrix.transpose().to_cols_array_2d())
    }

    /// Raw data, four float4 registers
    pub fn registers(&self) -> &[[f32; 4]; 4] {
        &self.0
    }
}

impl Default for GpuMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Mat4> for GpuMatrix {
    fn from(matrix: Mat4) -> Self {
        Self::from_mat4(matrix)
    }
}

/// GPU constant buffer with a CPU shadow value
pub struct ConstantBuffer<T: ShaderConstants> {
    buffer: Option<BufferHandle>,
    value: T,
}

impl<T: ShaderConstants> ConstantBuffer<T> {
    pub fn new(value: T) -> Self {
        Self { buffer: None, value }
    }

    /// Create the GPU buffer, initialized from the shadow value
    ///
    /// A previously created buffer is released first.
    pub fn create(&mut self, device: &dyn GraphicsDevice) -> Result<()> {
        let size = checked_layout_size::<T>()?;
        self.release(device);
        let buffer = device.create_buffer(&BufferDesc::constant(size), Some(bytemuck::bytes_of(&self.value)))?;
        self.buffer = Some(buffer);
        Ok(())
    }

    /// Release the GPU buffer; safe when never created
    pub fn release(&mut self, device: &dyn GraphicsDevice) {
        if let Some(buffer) = self.buffer.take() {
            device.release(buffer.into());
        }
    }

    pub fn is_created(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn handle(&self) -> Option<BufferHandle> {
        self.buffer
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Shadow value, uploaded on the next `apply_changes`
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Modify the shadow value and upload it
    pub fn update<F: FnOnce(&mut T)>(&mut self, context: &dyn DeviceContext, update: F) -> Result<()> {
        update(&mut self.value);
        self.apply_changes(context)
    }

    /// Replace the shadow value and upload it
    pub fn set_value(&mut self, context: &dyn DeviceContext, value: T) -> Result<()> {
        self.value = value;
        self.apply_changes(context)
    }

    /// Upload the shadow value to the GPU buffer
    pub fn apply_changes(&mut self, context: &dyn DeviceContext) -> Result<()> {
        let buffer = self.require_buffer()?;
        let value = self.value;
        update_constant_buffer::<T, _>(context, buffer, |data| *data = value)
    }

    /// Bind the GPU buffer to a shader stage slot
    pub fn bind(&self, context: &dyn DeviceContext, stage: ShaderStage, slot: u32) -> Result<()> {
        let buffer = self.require_buffer()?;
        context.set_constant_buffers(stage, slot, &[buffer]);
        Ok(())
    }

    fn require_buffer(&self) -> Result<BufferHandle> {
        self.buffer
            .ok_or_else(|| Error::NullPointer(format!("{} buffer has not been created", T::NAME)))
    }
}

impl<T: ShaderConstants + Default> Default for ConstantBuffer<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
#[path = "typed_buffer_tests.rs"]
mod tests;
