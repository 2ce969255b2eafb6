/// Spinning textured cube with a directional light

use glam::{Vec3, Vec4};

use crate::constant_buffer::{CameraBufferData, ConstantBuffer, LightBufferData};
use crate::device_resources::DeviceResources;
use crate::engine_info;
use crate::error::Result;
use crate::graphics_device::{
    GpuResource, InputLayoutHandle, PixelShaderHandle, ShaderResourceViewHandle, ShaderStage,
    VertexShaderHandle,
};
use crate::input::InputTracker;
use crate::renderer::rotating_scene::EYE;
use crate::renderer::{DemoRenderer, RotatingScene};
use crate::resource::{
    BinaryBlob, DecodedImage, DeviceDependent, LoadBatch, LoadTask, RendererState, ResourceLoader,
};
use crate::scene::{textured_cube, Camera, Light, Material, MeshBuffers, VertexPositionTextureNormal};
use crate::timing::StepTimer;

const SOURCE: &str = "sandbox::LitCubeRenderer";

pub const VERTEX_SHADER_FILE: &str = "LitCubeVertexShader.cso";
pub const PIXEL_SHADER_FILE: &str = "LitCubePixelShader.cso";
pub const TEXTURE_FILE: &str = "CubeTexture.png";

/// Vertex shader slot of the camera buffer
pub const CAMERA_SLOT: u32 = 1;
/// Pixel shader slot of the light buffer, texture and sampler
pub const LIGHT_SLOT: u32 = 0;
pub const TEXTURE_SLOT: u32 = 0;

struct PendingLoad {
    generation: u64,
    shaders: LoadBatch<BinaryBlob>,
    texture: LoadTask<DecodedImage>,
    decoded: Option<DecodedImage>,
}

impl PendingLoad {
    /// True once the shaders and the texture have all arrived
    fn poll(&mut self) -> Result<bool> {
        if self.decoded.is_none() {
            if let Some(result) = self.texture.try_take() {
                self.decoded = Some(result?);
            }
        }
        let shaders_done = self.shaders.poll()?;
        Ok(shaders_done && self.decoded.is_some())
    }
}

#[derive(Default)]
struct GpuObjects {
    vertex_shader: Option<VertexShaderHandle>,
    input_layout: Option<InputLayoutHandle>,
    pixel_shader: Option<PixelShaderHandle>,
    mesh: Option<MeshBuffers>,
}

pub struct LitCubeRenderer {
    scene: RotatingScene,
    loader: ResourceLoader,
    camera: Camera,
    light: Light,
    material: Material,
    camera_buffer: ConstantBuffer<CameraBufferData>,
    light_buffer: ConstantBuffer<LightBufferData>,
    pending: Option<PendingLoad>,
    objects: GpuObjects,
}

fn default_light() -> Light {
    let mut light = Light::new();
    light.set_ambient_color(Vec4::new(0.15, 0.15, 0.15, 1.0));
    light.set_diffuse_color(Vec4::ONE);
    light.set_specular_color(Vec4::ONE);
    light.set_specular_power(32.0);
    light.set_direction(Vec3::Z);
    light
}

fn default_material() -> Material {
    let mut material = Material::new();
    material.set_specular_exponent(32.0);
    material
}

impl LitCubeRenderer {
    /// Create the renderer and start loading its shaders and texture
    pub fn new(loader: ResourceLoader, resources: &DeviceResources) -> Result<Self> {
        let mut camera = Camera::new();
        camera.set_position(EYE);
        let light = default_light();

        let mut renderer = Self {
            scene: RotatingScene::new(),
            loader,
            camera_buffer: ConstantBuffer::new(CameraBufferData::new(camera.position())),
            light_buffer: ConstantBuffer::new(LightBufferData::from_light(&light)),
            camera,
            light,
            material: default_material(),
            pending: None,
            objects: GpuObjects::default(),
        };
        renderer.create_device_dependent_resources(resources)?;
        renderer.scene.create_window_size_dependent_resources(resources);
        Ok(renderer)
    }

    pub fn scene(&self) -> &RotatingScene {
        &self.scene
    }

    pub fn light(&self) -> &Light {
        &self.light
    }

    /// Changes are uploaded on the next render
    pub fn light_mut(&mut self) -> &mut Light {
        &mut self.light
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Color changes are uploaded on the next render
    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    pub fn texture_view(&self) -> Option<ShaderResourceViewHandle> {
        self.material.texture().shader_resource_view()
    }

    /// Light terms scaled by the material's diffuse and specular colors
    fn light_constants(&self) -> LightBufferData {
        let mut data = LightBufferData::from_light(&self.light);
        data.diffuse_color = (self.light.diffuse_color() * self.material.diffuse_color()).to_array();
        data.specular_color = (self.light.specular_color() * self.material.specular_color()).to_array();
        data
    }

    fn finish_loading(
        &mut self,
        resources: &DeviceResources,
        mut shaders: LoadBatch<BinaryBlob>,
        image: DecodedImage,
    ) -> Result<()> {
        let device = resources.device();
        let objects = &mut self.objects;
        let vs_blob = shaders.take(VERTEX_SHADER_FILE).unwrap_or_default();
        let ps_blob = shaders.take(PIXEL_SHADER_FILE).unwrap_or_default();

        objects.vertex_shader = Some(device.create_vertex_shader(vs_blob.as_slice())?);
        objects.input_layout = Some(device.create_input_layout(
            &VertexPositionTextureNormal::INPUT_LAYOUT,
            vs_blob.as_slice(),
        )?);
        objects.pixel_shader = Some(device.create_pixel_shader(ps_blob.as_slice())?);

        self.material.create(device, &image)?;
        objects.mesh = Some(MeshBuffers::create(device, &textured_cube())?);
        Ok(())
    }
}

impl DeviceDependent for LitCubeRenderer {
    fn create_device_dependent_resources(&mut self, resources: &DeviceResources) -> Result<()> {
        let generation = self.scene.create_device_dependent_resources(resources)?;
        self.camera_buffer.create(resources.device())?;
        self.light_buffer.create(resources.device())?;

        let mut shaders = LoadBatch::new();
        shaders.insert(VERTEX_SHADER_FILE, self.loader.read_data_async(VERTEX_SHADER_FILE));
        shaders.insert(PIXEL_SHADER_FILE, self.loader.read_data_async(PIXEL_SHADER_FILE));
        self.pending = Some(PendingLoad {
            generation,
            shaders,
            texture: self.loader.load_texture_async(TEXTURE_FILE),
            decoded: None,
        });
        Ok(())
    }

    fn release_device_dependent_resources(&mut self, resources: &DeviceResources) {
        let device = resources.device();
        self.pending = None;
        self.scene.release_device_dependent_resources(resources);
        self.camera_buffer.release(device);
        self.light_buffer.release(device);

        let objects = std::mem::take(&mut self.objects);
        if let Some(mesh) = objects.mesh {
            mesh.release(device);
        }
        self.material.release(device);
        let handles: [Option<GpuResource>; 3] = [
            objects.vertex_shader.map(Into::into),
            objects.input_layout.map(Into::into),
            objects.pixel_shader.map(Into::into),
        ];
        for resource in handles.into_iter().flatten() {
            device.release(resource);
        }
    }
}

impl DemoRenderer for LitCubeRenderer {
    fn name(&self) -> &str {
        "LitCube"
    }

    fn state(&self) -> RendererState {
        self.scene.lifecycle().state()
    }

    fn update(&mut self, timer: &StepTimer, input: &InputTracker) {
        self.scene.update(timer, input);
    }

    fn poll_loads(&mut self, resources: &DeviceResources) -> Result<()> {
        let Some(mut pending) = self.pending.take() else {
            return Ok(());
        };
        if !self.scene.lifecycle().is_current(pending.generation) {
            return Ok(());
        }
        if !pending.poll()? {
            self.pending = Some(pending);
            return Ok(());
        }

        let generation = pending.generation;
        let Some(image) = pending.decoded.take() else {
            return Ok(());
        };
        self.finish_loading(resources, pending.shaders, image)?;
        if self.scene.lifecycle_mut().complete_loading(generation) {
            engine_info!(SOURCE, "Resources loaded (generation {})", generation);
        }
        Ok(())
    }

    fn render(&mut self, resources: &DeviceResources) -> Result<()> {
        if !self.scene.lifecycle().is_ready() {
            return Ok(());
        }
        let Some(mesh) = self.objects.mesh else {
            return Ok(());
        };
        let context = resources.context();

        self.scene.apply_changes(resources)?;
        self.camera_buffer
            .set_value(context, CameraBufferData::new(self.camera.position()))?;
        self.light_buffer
            .set_value(context, self.light_constants())?;

        mesh.bind(context);
        context.set_input_layout(self.objects.input_layout);

        context.set_vertex_shader(self.objects.vertex_shader);
        self.scene.bind_model_view(resources)?;
        self.camera_buffer.bind(context, ShaderStage::Vertex, CAMERA_SLOT)?;

        context.set_pixel_shader(self.objects.pixel_shader);
        self.light_buffer.bind(context, ShaderStage::Pixel, LIGHT_SLOT)?;
        self.material.bind(context, ShaderStage::Pixel, TEXTURE_SLOT);

        mesh.draw(context);
        Ok(())
    }

    fn create_window_size_dependent_resources(&mut self, resources: &DeviceResources) {
        self.scene.create_window_size_dependent_resources(resources);
    }
}

#[cfg(test)]
#[path = "lit_cube_tests.rs"]
mod tests;
