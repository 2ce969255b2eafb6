/// Graphics device module - the seam between the engine and a graphics API

// Module declarations
pub mod handles;
pub mod buffer;
pub mod shader;
pub mod texture;
pub mod context;
pub mod swapchain;
pub mod device;

// Headless recording backend (tests and the demo host)
pub mod headless;

// Re-export everything
pub use handles::*;
pub use buffer::*;
pub use shader::*;
pub use texture::*;
pub use context::*;
pub use swapchain::*;
pub use device::*;
pub use headless::{HeadlessBackend, HeadlessProbe, RecordedCommand};
