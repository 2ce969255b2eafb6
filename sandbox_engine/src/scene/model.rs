/// Placeable textured mesh with a bounding sphere
///
/// The model keeps its CPU-side mesh and texture image, so its GPU objects
/// can be rebuilt after a device loss.

use glam::{Vec3, Vec4};

use crate::device_resources::DeviceResources;
use crate::engine_debug;
use crate::error::Result;
use crate::graphics_device::{DeviceContext, SamplerDesc, ShaderStage};
use crate::resource::{DecodedImage, DeviceDependent, Texture2d};
use crate::scene::{MeshBuffers, MeshData, VertexPositionTextureNormal};

const SOURCE: &str = "sandbox::Model";

/// Pixel shader slot the texture is bound to
pub const TEXTURE_SLOT: u32 = 0;

pub struct Model {
    mesh: MeshData<VertexPositionTextureNormal>,
    image: Option<DecodedImage>,
    buffers: Option<MeshBuffers>,
    texture: Texture2d,
    position: Vec3,
    color: Vec4,
    enabled: bool,
    bounding_sphere_radius: f32,
}

impl Model {
    /// Untextured, enabled, white model at the origin
    pub fn new(mesh: MeshData<VertexPositionTextureNormal>) -> Self {
        let bounding_sphere_radius = mesh
            .vertices
            .iter()
            .map(|v| Vec3::from_array(v.position).length())
            .fold(0.0, f32::max);

        Self {
            mesh,
            image: None,
            buffers: None,
            texture: Texture2d::new(),
            position: Vec3::ZERO,
            color: Vec4::ONE,
            enabled: true,
            bounding_sphere_radius,
        }
    }

    /// Texture uploaded alongside the mesh buffers
    pub fn with_texture(mut self, image: DecodedImage) -> Self {
        self.image = Some(image);
        self
    }

    // ===== GEOMETRY =====

    pub fn index_count(&self) -> u32 {
        self.mesh.indices.len() as u32
    }

    pub fn vertex_count(&self) -> u32 {
        self.mesh.vertices.len() as u32
    }

    pub fn bounding_sphere_center(&self) -> Vec3 {
        self.position
    }

    /// Distance from the model origin to its farthest vertex
    pub fn bounding_sphere_radius(&self) -> f32 {
        self.bounding_sphere_radius
    }

    // ===== PROPERTIES =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn color(&self) -> Vec4 {
        self.color
    }

    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Disabled models are skipped by [`Model::render`]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    // ===== GPU OBJECTS =====

    pub fn is_created(&self) -> bool {
        self.buffers.is_some()
    }

    pub fn mesh_buffers(&self) -> Option<MeshBuffers> {
        self.buffers
    }

    pub fn texture(&self) -> &Texture2d {
        &self.texture
    }

    /// Bind the texture and buffers, then draw
    pub fn render(&self, context: &dyn DeviceContext) {
        if !self.enabled {
            return;
        }
        let Some(buffers) = self.buffers else {
            return;
        };
        self.texture.bind(context, ShaderStage::Pixel, TEXTURE_SLOT);
        buffers.bind(context);
        buffers.draw(context);
    }
}

impl DeviceDependent for Model {
    fn create_device_dependent_resources(&mut self, resources: &DeviceResources) -> Result<()> {
        self.release_device_dependent_resources(resources);
        let device = resources.device();

        let buffers = MeshBuffers::create(device, &self.mesh)?;
        if let Some(image) = &self.image {
            if let Err(e) = self.texture.create(device, image, &SamplerDesc::default()) {
                buffers.release(device);
                return Err(e);
            }
        }
        self.buffers = Some(buffers);

        engine_debug!(
            SOURCE,
            "Created {} vertices, {} indices{}",
            self.vertex_count(),
            self.index_count(),
            if self.texture.is_valid() { ", textured" } else { "" }
        );
        Ok(())
    }

    fn release_device_dependent_resources(&mut self, resources: &DeviceResources) {
        let device = resources.device();
        if let Some(buffers) = self.buffers.take() {
            buffers.release(device);
        }
        self.texture.release(device);
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
