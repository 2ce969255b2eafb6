/// Directional light parameters

use glam::{Vec3, Vec4};

/// Values required for lighting computation, all zero by default
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Light {
    ambient_color: Vec4,
    diffuse_color: Vec4,
    specular_color: Vec4,
    direction: Vec3,
    specular_power: f32,
}

impl Light {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ambient_color(&self) -> Vec4 {
        self.ambient_color
    }

    pub fn diffuse_color(&self) -> Vec4 {
        self.diffuse_color
    }

    pub fn specular_color(&self) -> Vec4 {
        self.specular_color
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn specular_power(&self) -> f32 {
        self.specular_power
    }

    pub fn set_ambient_color(&mut self, color: Vec4) {
        self.ambient_color = color;
    }

    pub fn set_diffuse_color(&mut self, color: Vec4) {
        self.diffuse_color = color;
    }

    pub fn set_specular_color(&mut self, color: Vec4) {
        self.specular_color = color;
    }

    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction;
    }

    pub fn set_specular_power(&mut self, power: f32) {
        self.specular_power = power;
    }
}

#[cfg(test)]
#[path = "light_tests.rs"]
mod tests;
