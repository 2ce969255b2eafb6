/// Capability trait implemented by every demo scene

use crate::config::SceneKind;
use crate::device_resources::DeviceResources;
use crate::error::Result;
use crate::input::InputTracker;
use crate::renderer::{ColoredCubeRenderer, LitCubeRenderer};
use crate::resource::{DeviceDependent, RendererState, ResourceLoader};
use crate::timing::StepTimer;

/// A scene driven by the frame loop
///
/// `update` runs on every timer step whether or not resources are loaded.
/// `render` issues draw calls only in [`RendererState::Ready`] and is a no-op
/// otherwise. `poll_loads` collects finished asynchronous loads without
/// blocking and runs on the render thread before each render.
pub trait DemoRenderer: DeviceDependent + Send {
    /// Scene name for logs
    fn name(&self) -> &str;

    fn state(&self) -> RendererState;

    fn update(&mut self, timer: &StepTimer, input: &InputTracker);

    fn poll_loads(&mut self, resources: &DeviceResources) -> Result<()>;

    fn render(&mut self, resources: &DeviceResources) -> Result<()>;

    /// Recompute state that depends on the output size or orientation
    fn create_window_size_dependent_resources(&mut self, resources: &DeviceResources);
}

/// Build the renderer for `kind` and start loading its resources
pub fn create_renderer(
    kind: SceneKind,
    loader: ResourceLoader,
    resources: &DeviceResources,
) -> Result<Box<dyn DemoRenderer>> {
    Ok(match kind {
        SceneKind::ColoredCube => Box::new(ColoredCubeRenderer::new(loader, resources)?),
        SceneKind::LitCube => Box::new(LitCubeRenderer::new(loader, resources)?),
    })
}
