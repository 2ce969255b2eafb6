/// Constant buffer module - typed shader constants and the map/write/unmap/bind protocol

pub mod updater;
pub mod typed_buffer;
pub mod layouts;
pub mod model_view;

pub use updater::{update_and_bind, update_constant_buffer, BindTarget, MappedBuffer};
pub use typed_buffer::{checked_layout_size, ConstantBuffer, GpuMatrix, ShaderConstants};
pub use layouts::{CameraBufferData, LightBufferData, MatrixBufferData, ModelViewProjectionData};
pub use model_view::ModelViewConstantBuffer;
