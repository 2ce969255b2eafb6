/// Resource module - device-dependent resource lifecycle and asset loading

pub mod binary_blob;
pub mod loader;
pub mod lifecycle;
pub mod texture2d;

pub use binary_blob::BinaryBlob;
pub use loader::{DecodedImage, LoadBatch, LoadTask, ResourceLoader};
pub use lifecycle::{DeviceDependent, RendererLifecycle, RendererState};
pub use texture2d::Texture2d;
