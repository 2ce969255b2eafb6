/// Camera and model rotation shared by the cube demos
///
/// Holds the model/view/projection constant buffer and the renderer
/// lifecycle. The model spins about +Y at a fixed rate, or follows the
/// pointer while it is tracked.

use std::f32::consts::TAU;

use glam::{Mat4, Vec3};

use crate::constant_buffer::ModelViewConstantBuffer;
use crate::device_resources::DeviceResources;
use crate::error::Result;
use crate::input::InputTracker;
use crate::resource::RendererLifecycle;
use crate::timing::StepTimer;

const DEGREES_PER_SECOND: f32 = 45.0;
const FOV_Y_DEGREES: f32 = 70.0;
const NEAR_PLANE: f32 = 0.01;
const FAR_PLANE: f32 = 100.0;

/// Eye position of the scene camera
pub const EYE: Vec3 = Vec3::new(0.0, 0.0, -5.0);

/// Vertex shader slot of the model/view/projection buffer
pub const MODEL_VIEW_SLOT: u32 = 0;

pub struct RotatingScene {
    model_view: ModelViewConstantBuffer,
    lifecycle: RendererLifecycle,
    output_width: f32,
    rotation: f32,
}

impl RotatingScene {
    pub fn new() -> Self {
        Self {
            model_view: ModelViewConstantBuffer::new(),
            lifecycle: RendererLifecycle::new(),
            output_width: 1.0,
            rotation: 0.0,
        }
    }

    pub fn lifecycle(&self) -> &RendererLifecycle {
        &self.lifecycle
    }

    pub fn lifecycle_mut(&mut self) -> &mut RendererLifecycle {
        &mut self.lifecycle
    }

    pub fn model_view(&self) -> &ModelViewConstantBuffer {
        &self.model_view
    }

    /// Current model rotation about +Y in radians
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Create the constant buffer and start a load generation
    ///
    /// # Returns
    ///
    /// The generation the caller tags its loads with
    pub fn create_device_dependent_resources(&mut self, resources: &DeviceResources) -> Result<u64> {
        self.model_view.create(resources.device())?;
        Ok(self.lifecycle.begin_loading())
    }

    pub fn release_device_dependent_resources(&mut self, resources: &DeviceResources) {
        self.model_view.release(resources.device());
        self.lifecycle.mark_device_lost();
    }

    /// Rebuild view and projection for the current output size and orientation
    pub fn create_window_size_dependent_resources(&mut self, resources: &DeviceResources) {
        let output_size = resources.output_size();
        self.output_width = output_size.x;

        let aspect_ratio = output_size.x / output_size.y;
        let mut fov_y = FOV_Y_DEGREES.to_radians();
        if aspect_ratio < 1.0 {
            fov_y *= 2.0;
        }

        // Orientation applied last so the scene matches the display rotation
        let perspective = Mat4::perspective_rh(fov_y, aspect_ratio, NEAR_PLANE, FAR_PLANE);
        self.model_view
            .set_projection(resources.orientation_transform_3d() * perspective);
        self.model_view
            .set_view(Mat4::look_at_rh(EYE, Vec3::ZERO, Vec3::Y));
    }

    /// Rotate by elapsed time, or by pointer position while tracking
    pub fn update(&mut self, timer: &StepTimer, input: &InputTracker) {
        let radians = if input.is_tracking() {
            TAU * 2.0 * input.position_x() / self.output_width
        } else {
            let radians_per_second = f64::from(DEGREES_PER_SECOND.to_radians());
            let total_rotation = timer.total_seconds() * radians_per_second;
            (total_rotation % std::f64::consts::TAU) as f32
        };
        self.rotate(radians);
    }

    /// Upload the matrices
    pub fn apply_changes(&mut self, resources: &DeviceResources) -> Result<()> {
        self.model_view.apply_changes(resources.context())
    }

    pub fn bind_model_view(&self, resources: &DeviceResources) -> Result<()> {
        self.model_view
            .bind_to_vertex_shader(resources.context(), MODEL_VIEW_SLOT)
    }

    fn rotate(&mut self, radians: f32) {
        self.rotation = radians;
        self.model_view.set_model(Mat4::from_rotation_y(radians));
    }
}

impl Default for RotatingScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "rotating_scene_tests.rs"]
mod tests;
