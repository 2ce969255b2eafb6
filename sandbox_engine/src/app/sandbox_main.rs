/// Per-frame orchestration of the active demo scene
///
/// `SandboxMain` owns the scene renderer and the update timer. It is
/// registered with the device resource container as a device notify target,
/// so it lives behind `Arc<Mutex<_>>` and never holds the container itself.

use std::sync::Arc;

use crate::config::SandboxConfig;
use crate::device_resources::{DeviceNotify, DeviceResources};
use crate::engine_info;
use crate::error::{Error, Result};
use crate::graphics_device::ClearFlags;
use crate::input::InputTracker;
use crate::renderer::{create_renderer, DemoRenderer};
use crate::resource::{RendererState, ResourceLoader};
use crate::timing::StepTimer;

const SOURCE: &str = "sandbox::SandboxMain";

/// Back buffer clear color (cornflower blue)
pub const CLEAR_COLOR: [f32; 4] = [0.392_157, 0.584_314, 0.929_412, 1.0];

pub struct SandboxMain {
    scene: Box<dyn DemoRenderer>,
    input: Arc<InputTracker>,
    update_timer: StepTimer,
    frames_rendered: u64,
}

impl SandboxMain {
    /// Create the scene selected by `config` and start loading it
    pub fn new(
        resources: &DeviceResources,
        config: &SandboxConfig,
        input: Arc<InputTracker>,
    ) -> Result<Self> {
        let loader = ResourceLoader::from_config(&config.assets);
        let scene = create_renderer(config.scene.kind, loader, resources)?;
        engine_info!(SOURCE, "Starting scene {}", scene.name());
        Ok(Self::with_scene(scene, input, StepTimer::from_config(&config.timing)))
    }

    pub fn with_scene(scene: Box<dyn DemoRenderer>, input: Arc<InputTracker>, update_timer: StepTimer) -> Self {
        Self {
            scene,
            input,
            update_timer,
            frames_rendered: 0,
        }
    }

    pub fn scene(&self) -> &dyn DemoRenderer {
        self.scene.as_ref()
    }

    pub fn scene_state(&self) -> RendererState {
        self.scene.state()
    }

    pub fn timer(&self) -> &StepTimer {
        &self.update_timer
    }

    pub fn timer_mut(&mut self) -> &mut StepTimer {
        &mut self.update_timer
    }

    /// Frames rendered since creation
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Replace the active scene
    ///
    /// The outgoing scene's GPU objects are released. `scene` must have been
    /// built against `resources`; it keeps loading and renders once ready.
    /// Timer and frame statistics carry over.
    pub fn start_renderer(&mut self, scene: Box<dyn DemoRenderer>, resources: &DeviceResources) {
        let mut previous = std::mem::replace(&mut self.scene, scene);
        previous.release_device_dependent_resources(resources);
        engine_info!(SOURCE, "Switched scene {} -> {}", previous.name(), self.scene.name());
    }

    pub fn create_window_size_dependent_resources(&mut self, resources: &DeviceResources) {
        self.scene.create_window_size_dependent_resources(resources);
    }

    /// Run one iteration of the frame loop
    ///
    /// # Returns
    ///
    /// `true` when a frame was rendered and must be presented
    pub fn update_game_loop(&mut self, resources: &DeviceResources) -> Result<bool> {
        self.scene.poll_loads(resources)?;

        // Pointer state is read by the scene inside each timer step
        self.update();

        // Nothing to show before the first update
        if self.update_timer.frame_count() == 0 {
            return Ok(false);
        }

        self.render(resources)?;
        self.frames_rendered += 1;
        Ok(true)
    }

    fn update(&mut self) {
        let scene = &mut self.scene;
        let input = self.input.as_ref();
        self.update_timer.tick(|timer| scene.update(timer, input));
    }

    fn render(&mut self, resources: &DeviceResources) -> Result<()> {
        let context = resources.context();
        let render_target = resources
            .render_target_view()
            .ok_or_else(|| Error::NullPointer("back buffer render target view".to_string()))?;
        let depth_stencil = resources
            .depth_stencil_view()
            .ok_or_else(|| Error::NullPointer("depth stencil view".to_string()))?;

        context.set_viewports(&[resources.viewport()]);
        context.set_render_targets(&[render_target], Some(depth_stencil));

        context.clear_render_target_view(render_target, CLEAR_COLOR);
        context.clear_depth_stencil_view(depth_stencil, ClearFlags::DEPTH | ClearFlags::STENCIL, 1.0, 0);

        self.scene.render(resources)
    }
}

impl DeviceNotify for SandboxMain {
    fn on_device_lost(&mut self, resources: &DeviceResources) {
        self.scene.release_device_dependent_resources(resources);
    }

    fn on_device_restored(&mut self, resources: &DeviceResources) -> Result<()> {
        self.scene.create_device_dependent_resources(resources)?;
        self.create_window_size_dependent_resources(resources);
        Ok(())
    }
}

#[cfg(test)]
#[path = "sandbox_main_tests.rs"]
mod tests;
