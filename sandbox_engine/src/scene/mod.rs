/// Scene module - camera, light, materials, models and mesh data for the demo renderers

pub mod camera;
pub mod light;
pub mod material;
pub mod mesh;
pub mod model;

pub use camera::Camera;
pub use light::Light;
pub use material::Material;
pub use mesh::{
    colored_cube, textured_cube, MeshBuffers, MeshData, VertexPositionColor,
    VertexPositionTextureNormal,
};
pub use model::Model;
