/// Spinning cube with per-vertex colors

use crate::device_resources::DeviceResources;
use crate::engine_info;
use crate::error::Result;
use crate::graphics_device::{InputLayoutHandle, PixelShaderHandle, VertexShaderHandle};
use crate::input::InputTracker;
use crate::renderer::{DemoRenderer, RotatingScene};
use crate::resource::{BinaryBlob, DeviceDependent, LoadBatch, RendererState, ResourceLoader};
use crate::scene::{colored_cube, MeshBuffers, VertexPositionColor};
use crate::timing::StepTimer;

const SOURCE: &str = "sandbox::ColoredCubeRenderer";

pub const VERTEX_SHADER_FILE: &str = "ColoredCubeVertexShader.cso";
pub const PIXEL_SHADER_FILE: &str = "ColoredCubePixelShader.cso";

struct PendingLoad {
    generation: u64,
    shaders: LoadBatch<BinaryBlob>,
}

pub struct ColoredCubeRenderer {
    scene: RotatingScene,
    loader: ResourceLoader,
    pending: Option<PendingLoad>,
    vertex_shader: Option<VertexShaderHandle>,
    input_layout: Option<InputLayoutHandle>,
    pixel_shader: Option<PixelShaderHandle>,
    mesh: Option<MeshBuffers>,
}

impl ColoredCubeRenderer {
    /// Create the renderer and start loading its shaders
    pub fn new(loader: ResourceLoader, resources: &DeviceResources) -> Result<Self> {
        let mut renderer = Self {
            scene: RotatingScene::new(),
            loader,
            pending: None,
            vertex_shader: None,
            input_layout: None,
            pixel_shader: None,
            mesh: None,
        };
        renderer.create_device_dependent_resources(resources)?;
        renderer.scene.create_window_size_dependent_resources(resources);
        Ok(renderer)
    }

    pub fn scene(&self) -> &RotatingScene {
        &self.scene
    }

    pub fn mesh(&self) -> Option<&MeshBuffers> {
        self.mesh.as_ref()
    }

    /// Create shaders from the loaded blobs, then the cube mesh
    fn finish_loading(&mut self, resources: &DeviceResources, mut shaders: LoadBatch<BinaryBlob>) -> Result<()> {
        let device = resources.device();
        let vs_blob = shaders.take(VERTEX_SHADER_FILE).unwrap_or_default();
        let ps_blob = shaders.take(PIXEL_SHADER_FILE).unwrap_or_default();

        self.vertex_shader = Some(device.create_vertex_shader(vs_blob.as_slice())?);
        self.input_layout = Some(
            device.create_input_layout(&VertexPositionColor::INPUT_LAYOUT, vs_blob.as_slice())?,
        );
        self.pixel_shader = Some(device.create_pixel_shader(ps_blob.as_slice())?);

        // Mesh only after both shaders exist
        self.mesh = Some(MeshBuffers::create(device, &colored_cube())?);
        Ok(())
    }
}

impl DeviceDependent for ColoredCubeRenderer {
    fn create_device_dependent_resources(&mut self, resources: &DeviceResources) -> Result<()> {
        let generation = self.scene.create_device_dependent_resources(resources)?;

        let mut shaders = LoadBatch::new();
        shaders.insert(VERTEX_SHADER_FILE, self.loader.read_data_async(VERTEX_SHADER_FILE));
        shaders.insert(PIXEL_SHADER_FILE, self.loader.read_data_async(PIXEL_SHADER_FILE));
        self.pending = Some(PendingLoad { generation, shaders });
        Ok(())
    }

    fn release_device_dependent_resources(&mut self, resources: &DeviceResources) {
        let device = resources.device();
        self.pending = None;
        self.scene.release_device_dependent_resources(resources);

        if let Some(shader) = self.vertex_shader.take() {
            device.release(shader.into());
        }
        if let Some(layout) = self.input_layout.take() {
            device.release(layout.into());
        }
        if let Some(shader) = self.pixel_shader.take() {
            device.release(shader.into());
        }
        if let Some(mesh) = self.mesh.take() {
            mesh.release(device);
        }
    }
}

impl DemoRenderer for ColoredCubeRenderer {
    fn name(&self) -> &str {
        "ColoredCube"
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
        if !pending.shaders.poll()? {
            self.pending = Some(pending);
            return Ok(());
        }

        self.finish_loading(resources, pending.shaders)?;
        if self.scene.lifecycle_mut().complete_loading(pending.generation) {
            engine_info!(SOURCE, "Resources loaded (generation {})", pending.generation);
        }
        Ok(())
    }

    fn render(&mut self, resources: &DeviceResources) -> Result<()> {
        // Loading is asynchronous; draw only once everything exists
        if !self.scene.lifecycle().is_ready() {
            return Ok(());
        }
        let Some(mesh) = self.mesh else {
            return Ok(());
        };
        let context = resources.context();

        self.scene.apply_changes(resources)?;

        mesh.bind(context);
        context.set_input_layout(self.input_layout);
        context.set_vertex_shader(self.vertex_shader);
        self.scene.bind_model_view(resources)?;
        context.set_pixel_shader(self.pixel_shader);

        mesh.draw(context);
        Ok(())
    }

    fn create_window_size_dependent_resources(&mut self, resources: &DeviceResources) {
        self.scene.create_window_size_dependent_resources(resources);
    }
}

#[cfg(test)]
#[path = "colored_cube_tests.rs"]
mod tests;
