/// Graphics backend and device traits
///
/// A `GraphicsBackend` creates the device/context pair and swap chains. The
/// `GraphicsDevice` is the free-threaded object factory; every object it
/// creates is addressed by a handle and lives until released or until the
/// device is lost.

use crate::error::{Error, Result};
use crate::graphics_device::{
    BufferDesc, BufferHandle, DepthStencilViewHandle, DeviceContext, GpuResource,
    InputElementDesc, InputLayoutHandle, PixelShaderHandle, RenderTargetViewHandle,
    SamplerDesc, SamplerHandle, ShaderResourceViewHandle, SwapChain, SwapChainDesc,
    TextureDesc, TextureHandle, VertexShaderHandle,
};

/// Identity of the display adapter a device runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdapterId(pub u64);

/// Device creation options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceCreationParams {
    /// Enable the backend's validation layer
    pub debug_layer: bool,
}

/// A freshly created device and its immediate context
pub struct DeviceObjects {
    pub device: Box<dyn GraphicsDevice>,
    pub context: Box<dyn DeviceContext>,
}

/// Entry point of a graphics API implementation
pub trait GraphicsBackend: Send {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Adapter a new device would be created on right now
    fn default_adapter(&self) -> Result<AdapterId>;

    /// Create a device and its immediate context
    ///
    /// # Arguments
    ///
    /// * `params` - Creation options
    fn create_device(&mut self, params: &DeviceCreationParams) -> Result<DeviceObjects>;

    /// Create a swap chain for the host surface
    ///
    /// # Arguments
    ///
    /// * `device` - Device that will render into the swap chain
    /// * `desc` - Buffer size, format and count
    fn create_swap_chain(
        &mut self,
        device: &dyn GraphicsDevice,
        desc: &SwapChainDesc,
    ) -> Result<Box<dyn SwapChain>>;
}

/// GPU object factory
pub trait GraphicsDevice: Send + Sync {
    fn adapter(&self) -> AdapterId;

    /// `Some(Error::DeviceLost)` once the device has been removed or reset
    fn removed_reason(&self) -> Option<Error>;

    /// Create a buffer, `initial_data` must cover the whole buffer when given
    fn create_buffer(&self, desc: &BufferDesc, initial_data: Option<&[u8]>) -> Result<BufferHandle>;

    fn create_vertex_shader(&self, bytecode: &[u8]) -> Result<VertexShaderHandle>;

    fn create_pixel_shader(&self, bytecode: &[u8]) -> Result<PixelShaderHandle>;

    /// Create an input layout validated against a vertex shader signature
    fn create_input_layout(
        &self,
        elements: &[InputElementDesc],
        vertex_shader_bytecode: &[u8],
    ) -> Result<InputLayoutHandle>;

    fn create_texture(&self, desc: &TextureDesc, initial_data: Option<&[u8]>) -> Result<TextureHandle>;

    fn create_shader_resource_view(&self, texture: TextureHandle) -> Result<ShaderResourceViewHandle>;

    fn create_sampler(&self, desc: &SamplerDesc) -> Result<SamplerHandle>;

    fn create_render_target_view(&self, texture: TextureHandle) -> Result<RenderTargetViewHandle>;

    fn create_depth_stencil_view(&self, texture: TextureHandle) -> Result<DepthStencilViewHandle>;

    /// Destroy an object; unknown or stale handles are ignored
    fn release(&self, resource: GpuResource);

    /// True while `resource` refers to a live object of this device
    fn is_alive(&self, resource: GpuResource) -> bool;

    /// Let the driver free temporary allocations
    fn trim(&self);
}
