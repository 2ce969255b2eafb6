/// Renderer resource lifecycle
///
/// ```text
/// Uninitialized -> LoadingResources -> Ready
///                        ^               |
///                        +-- DeviceLost <+
/// ```
///
/// Each call to [`RendererLifecycle::begin_loading`] starts a new load
/// generation. Loads carry the generation they were issued under, and only a
/// load from the current generation may complete the cycle.

use crate::device_resources::DeviceResources;
use crate::error::Result;

/// Readiness of a renderer's GPU resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererState {
    Uninitialized,
    LoadingResources,
    Ready,
    DeviceLost,
}

/// State machine plus the current load generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererLifecycle {
    state: RendererState,
    generation: u64,
}

impl RendererLifecycle {
    pub fn new() -> Self {
        Self {
            state: RendererState::Uninitialized,
            generation: 0,
        }
    }

    pub fn state(&self) -> RendererState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Draw calls are allowed only when ready
    pub fn is_ready(&self) -> bool {
        self.state == RendererState::Ready
    }

    /// True if loads issued under `generation` are still wanted
    pub fn is_current(&self, generation: u64) -> bool {
        self.state == RendererState::LoadingResources && generation == self.generation
    }

    /// Enter `LoadingResources` under a fresh generation
    ///
    /// # Returns
    ///
    /// The generation to tag newly issued loads with
    pub fn begin_loading(&mut self) -> u64 {
        self.generation += 1;
        self.state = RendererState::LoadingResources;
        self.generation
    }

    /// Move to `Ready` if `generation` is current
    ///
    /// # Returns
    ///
    /// `false` for a stale generation; the state is unchanged
    pub fn complete_loading(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.state = RendererState::Ready;
        true
    }

    /// GPU objects were released; outstanding loads become stale
    pub fn mark_device_lost(&mut self) {
        self.generation += 1;
        self.state = RendererState::DeviceLost;
    }
}

impl Default for RendererLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// An object owning GPU resources that must follow the device lifecycle
///
/// Creation and release are driven by the device resource container's
/// lost/restored notifications, not by construction and drop.
pub trait DeviceDependent {
    /// Create (or start loading) every GPU object
    fn create_device_dependent_resources(&mut self, resources: &DeviceResources) -> Result<()>;

    /// Release every GPU object; safe when nothing was created
    fn release_device_dependent_resources(&mut self, resources: &DeviceResources);
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
