/// Renderer module - demo scene renderers and their shared lifecycle

pub mod demo_renderer;
pub mod rotating_scene;
pub mod colored_cube;
pub mod lit_cube;

#[cfg(test)]
pub(crate) mod testing;

pub use demo_renderer::{create_renderer, DemoRenderer};
pub use rotating_scene::RotatingScene;
pub use colored_cube::ColoredCubeRenderer;
pub use lit_cube::LitCubeRenderer;
