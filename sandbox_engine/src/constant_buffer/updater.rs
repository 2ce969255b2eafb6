/// Constant buffer updates
///
/// Every write goes through a `MappedBuffer`, which maps with discard on
/// creation and unmaps when dropped. Map and unmap are therefore paired on
/// every path, including `?` returns and panics inside the update closure.

use crate::error::{Error, Result};
use crate::graphics_device::{BufferHandle, DeviceContext, ShaderStage};
use crate::constant_buffer::ShaderConstants;

/// Shader stage slot a constant buffer is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindTarget {
    pub stage: ShaderStage,
    pub slot: u32,
}

impl BindTarget {
    pub const fn vertex(slot: u32) -> Self {
        Self { stage: ShaderStage::Vertex, slot }
    }

    pub const fn pixel(slot: u32) -> Self {
        Self { stage: ShaderStage::Pixel, slot }
    }
}

/// Write access to a buffer mapped with discard, unmapped on drop
pub struct MappedBuffer<'a> {
    context: &'a dyn DeviceContext,
    buffer: BufferHandle,
    size: usize,
}

impl<'a> MappedBuffer<'a> {
    /// Map `buffer`, invalidating its previous contents
    pub fn map(context: &'a dyn DeviceContext, buffer: BufferHandle) -> Result<Self> {
        let size = context.map_write_discard(buffer)?;
        Ok(Self { context, buffer, size })
    }

    /// Mapped size in bytes
    pub fn size(&self) -> usize {
        self.size
    }

    /// Write a complete layout
    ///
    /// # Errors
    ///
    /// `Error::LayoutMismatch` when `T` does not cover the mapping exactly;
    /// partial writes are not allowed.
    pub fn write<T: ShaderConstants>(&mut self, value: &T) -> Result<()> {
        let bytes = bytemuck::bytes_of(value);
        if bytes.len() != self.size {
            return Err(Error::LayoutMismatch {
                layout: T::NAME,
                expected: self.size,
                actual: bytes.len(),
            });
        }
        self.context.write_mapped(self.buffer, bytes)
    }
}

impl Drop for MappedBuffer<'_> {
    fn drop(&mut self) {
        self.context.unmap(self.buffer);
    }
}

/// Map `buffer`, let `update` fill a zeroed `T`, write it and unmap
///
/// # Arguments
///
/// * `context` - Immediate context of the device owning `buffer`
/// * `buffer` - Dynamic constant buffer sized for `T`
/// * `update` - Fills the staged layout
pub fn update_constant_buffer<T, F>(context: &dyn DeviceContext, buffer: BufferHandle, update: F) -> Result<()>
where
    T: ShaderConstants,
    F: FnOnce(&mut T),
{
    let mut mapped = MappedBuffer::map(context, buffer)?;
    let mut staged = T::zeroed();
    update(&mut staged);
    mapped.write(&staged)
}

/// `update_constant_buffer` followed by binding the buffer to `target`
///
/// The buffer is only bound when the update succeeded.
pub fn update_and_bind<T, F>(
    context: &dyn DeviceContext,
    buffer: BufferHandle,
    target: BindTarget,
    update: F,
) -> Result<()>
where
    T: ShaderConstants,
    F: FnOnce(&mut T),
{
    update_constant_buffer::<T, F>(context, buffer, update)?;
    context.set_constant_buffers(target.stage, target.slot, &[buffer]);
    Ok(())
}

#[cfg(test)]
#[path = "updater_tests.rs"]
mod tests;
