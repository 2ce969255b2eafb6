/// App module - frame loop, host entry points and the render thread

pub mod sandbox_main;
pub mod sandbox_app;
pub mod render_loop;

pub use sandbox_main::{SandboxMain, CLEAR_COLOR};
pub use sandbox_app::SandboxApp;
pub use render_loop::RenderLoop;
