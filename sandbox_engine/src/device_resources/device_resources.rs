/// Device resource container
///
/// Owns the one graphics device, immediate context and swap chain of the
/// application together with the window-size dependent targets (back buffer
/// view, depth buffer, viewport). When the device is lost everything is torn
/// down and rebuilt, and every registered `DeviceNotify` dependent is told to
/// release and recreate its own GPU objects.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use glam::{Mat4, Vec2};

use crate::config::SandboxConfig;
use crate::device_resources::{
    compute_display_rotation, convert_dips_to_pixels, orientation_transform_3d,
    DisplayOrientation, DIPS_PER_INCH,
};
use crate::error::{Error, Result};
use crate::graphics_device::{
    AdapterId, DepthStencilViewHandle, DeviceContext, DeviceCreationParams, DeviceObjects,
    DisplayRotation, Format, GraphicsBackend, GraphicsDevice, RenderTargetViewHandle,
    SwapChain, SwapChainDesc, TextureDesc, TextureHandle, Viewport,
};
use crate::{engine_error, engine_info, engine_warn};

/// Back buffer format of every swap chain
pub const BACK_BUFFER_FORMAT: Format = Format::B8G8R8A8_UNORM;

/// Receives device loss and restoration events
///
/// Implementors release every GPU object in `on_device_lost` (handles are
/// stale afterwards) and recreate them in `on_device_restored`.
pub trait DeviceNotify: Send {
    fn on_device_lost(&mut self, resources: &DeviceResources);

    fn on_device_restored(&mut self, resources: &DeviceResources) -> Result<()>;
}

/// Creation parameters of a `DeviceResources`
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceResourcesDesc {
    /// Window size in device-independent pixels
    pub logical_size: Vec2,
    pub dpi: f32,
    pub native_orientation: DisplayOrientation,
    pub current_orientation: DisplayOrientation,
    /// Vertical blanks waited by `present`
    pub sync_interval: u32,
    pub buffer_count: u32,
    pub device: DeviceCreationParams,
}

impl Default for DeviceResourcesDesc {
    fn default() -> Self {
        Self {
            logical_size: Vec2::new(1280.0, 720.0),
            dpi: DIPS_PER_INCH,
            native_orientation: DisplayOrientation::Landscape,
            current_orientation: DisplayOrientation::Landscape,
            sync_interval: 1,
            buffer_count: 2,
            device: DeviceCreationParams::default(),
        }
    }
}

impl DeviceResourcesDesc {
    pub fn from_config(config: &SandboxConfig) -> Self {
        Self {
            logical_size: Vec2::new(config.window.width, config.window.height),
            dpi: config.window.dpi,
            native_orientation: config.window.native_orientation,
            current_orientation: config.window.orientation,
            sync_interval: config.graphics.sync_interval,
            buffer_count: config.graphics.buffer_count,
            device: DeviceCreationParams {
                debug_layer: config.graphics.debug_layer,
            },
        }
    }
}

/// Controls all the graphics device resources
pub struct DeviceResources {
    backend: Box<dyn GraphicsBackend>,
    device_params: DeviceCreationParams,

    // Device objects
    device: Box<dyn GraphicsDevice>,
    context: Box<dyn DeviceContext>,
    swap_chain: Option<Box<dyn SwapChain>>,

    // Window size dependent objects
    render_target_view: Option<RenderTargetViewHandle>,
    depth_stencil: Option<TextureHandle>,
    depth_stencil_view: Option<DepthStencilViewHandle>,
    viewport: Viewport,

    // Cached display properties
    logical_size: Vec2,
    output_size: Vec2,
    render_target_size: Vec2,
    dpi: f32,
    composition_scale: Vec2,
    native_orientation: DisplayOrientation,
    current_orientation: DisplayOrientation,
    rotation: DisplayRotation,
    orientation_transform_3d: Mat4,
    sync_interval: u32,
    buffer_count: u32,

    notify: Vec<Weak<Mutex<dyn DeviceNotify>>>,
}

impl DeviceResources {
    const SOURCE: &'static str = "sandbox::DeviceResources";

    /// Create the device and the window-size dependent resources
    ///
    /// # Arguments
    ///
    /// * `backend` - Graphics API used for every device this container creates
    /// * `desc` - Initial window and swap chain parameters
    ///
    /// # Errors
    ///
    /// Any failure is fatal for the application.
    pub fn new(mut backend: Box<dyn GraphicsBackend>, desc: DeviceResourcesDesc) -> Result<Self> {
        let objects = Self::create_device_objects(backend.as_mut(), &desc.device)?;

        let mut resources = Self {
            backend,
            device_params: desc.device,
            device: objects.device,
            context: objects.context,
            swap_chain: None,
            render_target_view: None,
            depth_stencil: None,
            depth_stencil_view: None,
            viewport: Viewport::full(1.0, 1.0),
            logical_size: desc.logical_size,
            output_size: Vec2::ONE,
            render_target_size: Vec2::ONE,
            dpi: desc.dpi,
            composition_scale: Vec2::ONE,
            native_orientation: desc.native_orientation,
            current_orientation: desc.current_orientation,
            rotation: DisplayRotation::Identity,
            orientation_transform_3d: Mat4::IDENTITY,
            sync_interval: desc.sync_interval,
            buffer_count: desc.buffer_count,
            notify: Vec::new(),
        };

        resources.create_window_size_dependent_resources()?;
        Ok(resources)
    }

    fn create_device_objects(
        backend: &mut dyn GraphicsBackend,
        params: &DeviceCreationParams,
    ) -> Result<DeviceObjects> {
        match backend.create_device(params) {
            Ok(objects) => {
                engine_info!(
                    Self::SOURCE,
                    "Created {} device on adapter {}",
                    backend.name(),
                    objects.device.adapter().0
                );
                Ok(objects)
            }
            Err(error) => {
                engine_error!(Self::SOURCE, "Device creation failed: {}", error);
                Err(error)
            }
        }
    }

    // ===== NOTIFY REGISTRY =====

    /// Register a dependent for device lost/restored events
    ///
    /// Dependents are held weakly; registering the same dependent twice has
    /// no effect.
    pub fn register_device_notify(&mut self, dependent: Weak<Mutex<dyn DeviceNotify>>) {
        self.notify.retain(|entry| entry.strong_count() > 0);
        if !self.notify.iter().any(|entry| Weak::ptr_eq(entry, &dependent)) {
            self.notify.push(dependent);
        }
    }

    /// Number of registered dependents still alive
    pub fn registered_notify_count(&self) -> usize {
        self.notify.iter().filter(|entry| entry.strong_count() > 0).count()
    }

    fn live_dependents(&mut self) -> Vec<Arc<Mutex<dyn DeviceNotify>>> {
        self.notify.retain(|entry| entry.strong_count() > 0);
        self.notify.iter().filter_map(Weak::upgrade).collect()
    }

    // ===== WINDOW SIZE DEPENDENT RESOURCES =====

    /// Recreate the swap chain buffers, target views and viewport for the
    /// current logical size, DPI and orientation
    pub fn create_window_size_dependent_resources(&mut self) -> Result<()> {
        // Clear the previous window size specific context
        self.context.set_render_targets(&[], None);
        self.release_size_dependent_views();

        self.update_render_target_size();

        self.rotation = compute_display_rotation(self.native_orientation, self.current_orientation);
        self.render_target_size = if self.rotation.swaps_dimensions() {
            Vec2::new(self.output_size.y, self.output_size.x)
        } else {
            self.output_size
        };
        let width = self.render_target_size.x as u32;
        let height = self.render_target_size.y as u32;

        match self.swap_chain.as_mut() {
            Some(swap_chain) => {
                let resized = swap_chain.resize_buffers(self.buffer_count, width, height, BACK_BUFFER_FORMAT);
                match resized {
                    Err(error) if error.is_device_lost() => {
                        // Everything is rebuilt by the lost/restored cycle
                        return self.handle_device_lost();
                    }
                    other => other?,
                }
            }
            None => {
                let desc = SwapChainDesc {
                    width,
                    height,
                    format: BACK_BUFFER_FORMAT,
                    buffer_count: self.buffer_count,
                };
                self.swap_chain = Some(self.backend.create_swap_chain(self.device.as_ref(), &desc)?);
            }
        }

        self.orientation_transform_3d = orientation_transform_3d(self.rotation);

        let swap_chain = self
            .swap_chain
            .as_mut()
            .ok_or_else(|| Error::NullPointer("swap chain".to_string()))?;
        swap_chain.set_rotation(self.rotation)?;
        swap_chain.set_matrix_transform(Vec2::ONE / self.composition_scale)?;
        let back_buffer = swap_chain.back_buffer()?;

        self.render_target_view = Some(self.device.create_render_target_view(back_buffer)?);

        let depth_stencil = self.device.create_texture(&TextureDesc::depth_stencil(width, height), None)?;
        self.depth_stencil = Some(depth_stencil);
        self.depth_stencil_view = Some(self.device.create_depth_stencil_view(depth_stencil)?);

        self.viewport = Viewport::full(self.render_target_size.x, self.render_target_size.y);
        Ok(())
    }

    fn update_render_target_size(&mut self) {
        self.output_size = Vec2::new(
            convert_dips_to_pixels(self.logical_size.x, self.dpi).max(1.0),
            convert_dips_to_pixels(self.logical_size.y, self.dpi).max(1.0),
        );
    }

    fn release_size_dependent_views(&mut self) {
        if let Some(view) = self.render_target_view.take() {
            self.device.release(view.into());
        }
        if let Some(view) = self.depth_stencil_view.take() {
            self.device.release(view.into());
        }
        if let Some(texture) = self.depth_stencil.take() {
            self.device.release(texture.into());
        }
    }

    // ===== HOST NOTIFICATIONS =====

    /// Called when the window is resized
    pub fn set_logical_size(&mut self, logical_size: Vec2) -> Result<()> {
        if self.logical_size != logical_size {
            self.logical_size = logical_size;
            self.create_window_size_dependent_resources()?;
        }
        Ok(())
    }

    /// Called when the display DPI changes
    pub fn set_dpi(&mut self, dpi: f32) -> Result<()> {
        if self.dpi != dpi {
            self.dpi = dpi;
            self.create_window_size_dependent_resources()?;
        }
        Ok(())
    }

    /// Called when the display is rotated
    pub fn set_current_orientation(&mut self, orientation: DisplayOrientation) -> Result<()> {
        if self.current_orientation != orientation {
            self.current_orientation = orientation;
            self.create_window_size_dependent_resources()?;
        }
        Ok(())
    }

    /// Called when the compositor scales the swap chain surface
    ///
    /// The swap chain receives the inverse scale.
    ///
    /// # Errors
    ///
    /// `InvalidResource` for a zero, negative or non-finite scale
    pub fn set_composition_scale(&mut self, scale_x: f32, scale_y: f32) -> Result<()> {
        let scale = Vec2::new(scale_x, scale_y);
        if !(scale.is_finite() && scale.x > 0.0 && scale.y > 0.0) {
            return Err(Error::InvalidResource(format!(
                "composition scale must be positive, got {}x{}",
                scale_x, scale_y
            )));
        }
        if self.composition_scale != scale {
            self.composition_scale = scale;
            self.create_window_size_dependent_resources()?;
        }
        Ok(())
    }

    /// Recreate the device if the adapter changed or the device was removed
    pub fn validate_device(&mut self) -> Result<()> {
        let default_adapter = self.backend.default_adapter()?;
        if default_adapter != self.device.adapter() {
            engine_warn!(
                Self::SOURCE,
                "Default adapter changed from {} to {}",
                self.device.adapter().0,
                default_adapter.0
            );
            return self.handle_device_lost();
        }
        if let Some(reason) = self.device.removed_reason() {
            engine_warn!(Self::SOURCE, "Device reports removal: {}", reason);
            return self.handle_device_lost();
        }
        Ok(())
    }

    /// Recreate all device resources and notify dependents
    pub fn handle_device_lost(&mut self) -> Result<()> {
        engine_warn!(Self::SOURCE, "Handling device lost, recreating all device resources");

        self.release_size_dependent_views();
        self.swap_chain = None;

        let dependents = self.live_dependents();
        for dependent in &dependents {
            dependent
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .on_device_lost(self);
        }

        // Make sure the rendering state has been released
        self.context.set_render_targets(&[], None);

        let objects = Self::create_device_objects(self.backend.as_mut(), &self.device_params)?;
        self.device = objects.device;
        self.context = objects.context;
        self.create_window_size_dependent_resources()?;

        for dependent in &dependents {
            dependent
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .on_device_restored(self)?;
        }

        engine_info!(Self::SOURCE, "Device restored");
        Ok(())
    }

    /// Present the back buffer
    ///
    /// A lost device runs the lost/restored cycle instead of failing.
    pub fn present(&mut self) -> Result<()> {
        let result = match self.swap_chain.as_mut() {
            Some(swap_chain) => swap_chain.present(self.sync_interval),
            None => Err(Error::NullPointer("swap chain".to_string())),
        };

        // The contents of the targets are not needed after presenting
        if let Some(view) = self.render_target_view {
            self.context.discard_view(view.into());
        }
        if let Some(view) = self.depth_stencil_view {
            self.context.discard_view(view.into());
        }

        match result {
            Err(error) if error.is_device_lost() => self.handle_device_lost(),
            other => other,
        }
    }

    /// Release temporary driver memory, called when the app is suspended
    pub fn trim(&mut self) {
        self.context.set_render_targets(&[], None);
        self.device.trim();
    }

    // ===== ACCESSORS =====

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn device(&self) -> &dyn GraphicsDevice {
        self.device.as_ref()
    }

    pub fn context(&self) -> &dyn DeviceContext {
        self.context.as_ref()
    }

    pub fn swap_chain(&self) -> Option<&dyn SwapChain> {
        self.swap_chain.as_deref()
    }

    pub fn adapter(&self) -> AdapterId {
        self.device.adapter()
    }

    pub fn render_target_view(&self) -> Option<RenderTargetViewHandle> {
        self.render_target_view
    }

    pub fn depth_stencil_view(&self) -> Option<DepthStencilViewHandle> {
        self.depth_stencil_view
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn orientation_transform_3d(&self) -> Mat4 {
        self.orientation_transform_3d
    }

    pub fn rotation(&self) -> DisplayRotation {
        self.rotation
    }

    /// Window size in physical pixels
    pub fn output_size(&self) -> Vec2 {
        self.output_size
    }

    /// Swap chain size, width and height swapped for 90/270 degree rotations
    pub fn render_target_size(&self) -> Vec2 {
        self.render_target_size
    }

    pub fn logical_size(&self) -> Vec2 {
        self.logical_size
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    pub fn composition_scale(&self) -> Vec2 {
        self.composition_scale
    }

    pub fn current_orientation(&self) -> DisplayOrientation {
        self.current_orientation
    }

    pub fn sync_interval(&self) -> u32 {
        self.sync_interval
    }
}

#[cfg(test)]
#[path = "device_resources_tests.rs"]
mod tests;
