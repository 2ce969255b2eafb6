/// Sampled 2D texture: the texture, its shader view and a sampler

use crate::error::Result;
use crate::graphics_device::{
    DeviceContext, GraphicsDevice, SamplerDesc, SamplerHandle, ShaderResourceViewHandle, ShaderStage,
    TextureHandle,
};
use crate::resource::DecodedImage;

#[derive(Debug, Default, PartialEq)]
pub struct Texture2d {
    texture: Option<TextureHandle>,
    view: Option<ShaderResourceViewHandle>,
    sampler: Option<SamplerHandle>,
}

impl Texture2d {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload `image` and create its view and sampler
    ///
    /// Any previous objects are released first.
    ///
    /// # Errors
    ///
    /// Device creation errors. Objects created before the failure are
    /// released again and the texture is left empty.
    pub fn create(
        &mut self,
        device: &dyn GraphicsDevice,
        image: &DecodedImage,
        sampler: &SamplerDesc,
    ) -> Result<()> {
        self.release(device);

        let result = self.create_objects(device, image, sampler);
        if result.is_err() {
            self.release(device);
        }
        result
    }

    fn create_objects(
        &mut self,
        device: &dyn GraphicsDevice,
        image: &DecodedImage,
        sampler: &SamplerDesc,
    ) -> Result<()> {
        let texture = device.create_texture(&image.texture_desc(), Some(&image.pixels))?;
        self.texture = Some(texture);
        self.view = Some(device.create_shader_resource_view(texture)?);
        self.sampler = Some(device.create_sampler(sampler)?);
        Ok(())
    }

    /// Release every object; safe to call on an empty texture
    pub fn release(&mut self, device: &dyn GraphicsDevice) {
        if let Some(view) = self.view.take() {
            device.release(view.into());
        }
        if let Some(texture) = self.texture.take() {
            device.release(texture.into());
        }
        if let Some(sampler) = self.sampler.take() {
            device.release(sampler.into());
        }
    }

    /// True when all three objects exist
    pub fn is_valid(&self) -> bool {
        self.texture.is_some() && self.view.is_some() && self.sampler.is_some()
    }

    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }

    pub fn shader_resource_view(&self) -> Option<ShaderResourceViewHandle> {
        self.view
    }

    pub fn sampler(&self) -> Option<SamplerHandle> {
        self.sampler
    }

    /// Bind the view and sampler at `slot`; does nothing when not valid
    pub fn bind(&self, context: &dyn DeviceContext, stage: ShaderStage, slot: u32) {
        if let (Some(view), Some(sampler)) = (self.view, self.sampler) {
            context.set_shader_resources(stage, slot, &[view]);
            context.set_samplers(stage, slot, &[sampler]);
        }
    }
}

#[cfg(test)]
#[path = "texture2d_tests.rs"]
mod tests;
