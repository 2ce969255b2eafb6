/*!
# Sandbox Engine

Device-resource lifecycle core for small real-time rendering demos.

The crate owns the graphics device through the [`graphics_device`] traits,
recreates every GPU object when the device is lost, and moves per-frame
transform and lighting data to the shaders through typed constant buffers.

## Architecture

- **DeviceResources**: device, context, swap chain and render targets; notifies
  dependents on device lost/restored
- **ConstantBuffer**: typed CPU shadow plus GPU buffer, updated by map/discard
- **DemoRenderer**: scene capability trait driven by the frame loop
- **SandboxApp / RenderLoop**: host context and the dedicated render thread

A headless recording backend ships with the crate for tests and the demo host.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod graphics_device;
pub mod device_resources;
pub mod constant_buffer;
pub mod resource;
pub mod scene;
pub mod timing;
pub mod input;
pub mod renderer;
pub mod app;
pub mod utils;

// Main sandbox namespace module
pub mod sandbox {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging facade
    pub use crate::engine::Engine;

    // Configuration
    pub use crate::config::SandboxConfig;

    // Host-facing application types
    pub use crate::app::{RenderLoop, SandboxApp};

    // Logging sub-module (types only, macros are exported at the crate root)
    pub mod log {
        pub use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
    }
}

// Re-export math library at crate root
pub use glam;
