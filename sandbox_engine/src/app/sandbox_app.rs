/// Host-facing application context
///
/// Pairs the device resource container with the frame loop. Window and input
/// callbacks from the host go through this object; there is no global
/// application pointer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use glam::Vec2;

use crate::app::SandboxMain;
use crate::config::{SandboxConfig, SceneKind};
use crate::device_resources::{DeviceNotify, DeviceResources, DeviceResourcesDesc, DisplayOrientation};
use crate::error::Result;
use crate::graphics_device::GraphicsBackend;
use crate::input::InputTracker;
use crate::renderer::create_renderer;
use crate::resource::ResourceLoader;
use crate::{engine_info, engine_warn};

const SOURCE: &str = "sandbox::SandboxApp";

pub struct SandboxApp {
    resources: DeviceResources,
    main: Arc<Mutex<SandboxMain>>,
    input: Arc<InputTracker>,
    loader: ResourceLoader,
}

impl SandboxApp {
    /// Create the device, the frame loop and the configured scene
    ///
    /// # Errors
    ///
    /// Device creation failures are fatal and returned as is.
    pub fn new(backend: Box<dyn GraphicsBackend>, config: &SandboxConfig) -> Result<Self> {
        config.validate()?;
        let mut resources = DeviceResources::new(backend, DeviceResourcesDesc::from_config(config))?;
        let input = Arc::new(InputTracker::new());
        let main = Arc::new(Mutex::new(SandboxMain::new(&resources, config, Arc::clone(&input))?));

        let notify: Weak<Mutex<dyn DeviceNotify>> = Arc::downgrade(&main) as Weak<Mutex<dyn DeviceNotify>>;
        resources.register_device_notify(notify);

        engine_info!(SOURCE, "Sandbox created on backend '{}'", resources.backend_name());
        Ok(Self {
            resources,
            main,
            input,
            loader: ResourceLoader::from_config(&config.assets),
        })
    }

    pub fn resources(&self) -> &DeviceResources {
        &self.resources
    }

    /// Pointer state shared with the host's input thread
    pub fn input(&self) -> Arc<InputTracker> {
        Arc::clone(&self.input)
    }

    pub fn main(&self) -> MutexGuard<'_, SandboxMain> {
        self.main.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Update, render and present one frame
    ///
    /// A device lost while loading or rendering runs the lost/restored cycle.
    ///
    /// # Returns
    ///
    /// `true` when a frame was presented
    pub fn update_game_loop(&mut self) -> Result<bool> {
        // The frame loop is unlocked before presenting: a lost device
        // notifies it from inside `present`
        let rendered = self.main().update_game_loop(&self.resources);

        match rendered {
            Ok(true) => {
                self.resources.present()?;
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(error) if error.is_device_lost() => {
                engine_warn!(SOURCE, "Frame failed: {}", error);
                self.resources.handle_device_lost()?;
                Ok(false)
            }
            Err(error) => Err(error),
        }
    }

    /// Switch the running demo to `kind`
    ///
    /// The new scene starts in `LoadingResources`; the device-notify
    /// registration is unaffected.
    pub fn start_renderer(&mut self, kind: SceneKind) -> Result<()> {
        let scene = create_renderer(kind, self.loader.clone(), &self.resources)?;
        self.main().start_renderer(scene, &self.resources);
        Ok(())
    }

    // ===== WINDOW EVENTS =====

    pub fn set_logical_size(&mut self, logical_size: Vec2) -> Result<()> {
        self.resources.set_logical_size(logical_size)?;
        self.refresh_window_size();
        Ok(())
    }

    pub fn set_dpi(&mut self, dpi: f32) -> Result<()> {
        self.resources.set_dpi(dpi)?;
        self.refresh_window_size();
        Ok(())
    }

    pub fn set_current_orientation(&mut self, orientation: DisplayOrientation) -> Result<()> {
        self.resources.set_current_orientation(orientation)?;
        self.refresh_window_size();
        Ok(())
    }

    pub fn set_composition_scale(&mut self, scale_x: f32, scale_y: f32) -> Result<()> {
        self.resources.set_composition_scale(scale_x, scale_y)?;
        self.refresh_window_size();
        Ok(())
    }

    /// Called when the display changes or the app becomes visible
    pub fn validate_device(&mut self) -> Result<()> {
        self.resources.validate_device()
    }

    /// Called when the app is suspended
    pub fn trim(&mut self) {
        self.resources.trim();
    }

    // ===== POINTER EVENTS =====

    pub fn pointer_pressed(&self, x: f32, y: f32) {
        self.input.pointer_pressed(x, y);
    }

    pub fn pointer_moved(&self, x: f32, y: f32) {
        self.input.pointer_moved(x, y);
    }

    pub fn pointer_released(&self, x: f32, y: f32) {
        self.input.pointer_released(x, y);
    }

    fn refresh_window_size(&mut self) {
        let resources = &self.resources;
        self.main
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .create_window_size_dependent_resources(resources);
    }
}

#[cfg(test)]
#[path = "sandbox_app_tests.rs"]
mod tests;
