/// Surface description: a sampled texture plus its color terms

use glam::Vec4;

use crate::error::Result;
use crate::graphics_device::{DeviceContext, GraphicsDevice, SamplerDesc, ShaderStage};
use crate::resource::{DecodedImage, Texture2d};

#[derive(Debug, PartialEq)]
pub struct Material {
    texture: Texture2d,
    sampler: SamplerDesc,
    mesh_color: Vec4,
    diffuse_color: Vec4,
    specular_color: Vec4,
    specular_exponent: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            texture: Texture2d::new(),
            sampler: SamplerDesc::default(),
            mesh_color: Vec4::ONE,
            diffuse_color: Vec4::ONE,
            specular_color: Vec4::ONE,
            specular_exponent: 1.0,
        }
    }
}

impl Material {
    /// White material with no texture
    pub fn new() -> Self {
        Self::default()
    }

    // ===== GPU OBJECTS =====

    /// Upload `image` as this material's texture
    ///
    /// # Errors
    ///
    /// Device creation errors; the material is left without a texture.
    pub fn create(&mut self, device: &dyn GraphicsDevice, image: &DecodedImage) -> Result<()> {
        self.texture.create(device, image, &self.sampler)
    }

    pub fn release(&mut self, device: &dyn GraphicsDevice) {
        self.texture.release(device);
    }

    /// True once the texture is loaded and ready to bind
    pub fn is_valid(&self) -> bool {
        self.texture.is_valid()
    }

    pub fn texture(&self) -> &Texture2d {
        &self.texture
    }

    pub fn bind(&self, context: &dyn DeviceContext, stage: ShaderStage, slot: u32) {
        self.texture.bind(context, stage, slot);
    }

    // ===== PROPERTIES =====

    pub fn sampler_desc(&self) -> &SamplerDesc {
        &self.sampler
    }

    /// Takes effect on the next `create`
    pub fn set_sampler_desc(&mut self, sampler: SamplerDesc) {
        self.sampler = sampler;
    }

    pub fn mesh_color(&self) -> Vec4 {
        self.mesh_color
    }

    pub fn set_mesh_color(&mut self, color: Vec4) {
        self.mesh_color = color;
    }

    pub fn diffuse_color(&self) -> Vec4 {
        self.diffuse_color
    }

    pub fn set_diffuse_color(&mut self, color: Vec4) {
        self.diffuse_color = color;
    }

    pub fn specular_color(&self) -> Vec4 {
        self.specular_color
    }

    pub fn set_specular_color(&mut self, color: Vec4) {
        self.specular_color = color;
    }

    pub fn specular_exponent(&self) -> f32 {
        self.specular_exponent
    }

    pub fn set_specular_exponent(&mut self, exponent: f32) {
        self.specular_exponent = exponent;
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
