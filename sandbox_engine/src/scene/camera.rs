/// First-person camera with a lazily regenerated view matrix
///
/// Rotation is stored in degrees as (pitch, yaw, roll). The view matrix is
/// left-handed, looking down +Z with +Y up before rotation, and is
/// regenerated on the first access after the position or rotation changed.

use glam::{EulerRot, Mat4, Vec3};

const DEGREES_TO_RADIANS: f32 = 0.017_453_292_5;

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    rotation: Vec3,
    view_matrix: Mat4,
    regenerate_view_matrix: bool,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            view_matrix: Mat4::IDENTITY,
            regenerate_view_matrix: false,
        }
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Rotation in degrees: x = pitch, y = yaw, z = roll
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// True when the view matrix is stale
    pub fn is_view_matrix_dirty(&self) -> bool {
        self.regenerate_view_matrix
    }

    /// Current view matrix, regenerated if dirty
    pub fn view_matrix(&mut self) -> Mat4 {
        if self.regenerate_view_matrix {
            self.regenerate();
        }
        self.view_matrix
    }

    // ===== SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.regenerate_view_matrix = true;
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.regenerate_view_matrix = true;
    }

    fn regenerate(&mut self) {
        let pitch = self.rotation.x * DEGREES_TO_RADIANS;
        let yaw = self.rotation.y * DEGREES_TO_RADIANS;
        let roll = self.rotation.z * DEGREES_TO_RADIANS;

        // Roll, then pitch, then yaw
        let rotation = Mat4::from_euler(EulerRot::YXZ, yaw, pitch, roll);
        let look = rotation.transform_vector3(Vec3::Z);
        let up = rotation.transform_vector3(Vec3::Y);

        self.view_matrix = Mat4::look_at_lh(self.position, self.position + look, up);
        self.regenerate_view_matrix = false;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
