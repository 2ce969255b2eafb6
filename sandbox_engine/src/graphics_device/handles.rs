/// GPU object handles
///
/// Handles are slot-map keys owned by exactly one holder (a renderer, a
/// constant buffer, the device resource container). The device keeps the
/// objects; releasing a handle removes the object. When the device is lost the
/// whole object table is cleared, so every outstanding handle goes stale.

use slotmap::new_key_type;

new_key_type! {
    /// Vertex, index or constant buffer
    pub struct BufferHandle;
    /// Compiled vertex shader
    pub struct VertexShaderHandle;
    /// Compiled pixel shader
    pub struct PixelShaderHandle;
    /// Vertex input layout bound to a vertex shader signature
    pub struct InputLayoutHandle;
    /// 2D texture
    pub struct TextureHandle;
    /// Shader-readable view of a texture
    pub struct ShaderResourceViewHandle;
    /// Texture sampler state
    pub struct SamplerHandle;
    /// Render target view (back buffer)
    pub struct RenderTargetViewHandle;
    /// Depth-stencil view
    pub struct DepthStencilViewHandle;
}

/// Any GPU object, used for release and liveness queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GpuResource {
    Buffer(BufferHandle),
    VertexShader(VertexShaderHandle),
    PixelShader(PixelShaderHandle),
    InputLayout(InputLayoutHandle),
    Texture(TextureHandle),
    ShaderResourceView(ShaderResourceViewHandle),
    Sampler(SamplerHandle),
    RenderTargetView(RenderTargetViewHandle),
    DepthStencilView(DepthStencilViewHandle),
}

macro_rules! impl_from_handle {
    ($($handle:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$handle> for GpuResource {
                fn from(handle: $handle) -> Self {
                    GpuResource::$variant(handle)
                }
            }
        )*
    };
}

impl_from_handle! {
    BufferHandle => Buffer,
    VertexShaderHandle => VertexShader,
    PixelShaderHandle => PixelShader,
    InputLayoutHandle => InputLayout,
    TextureHandle => Texture,
    ShaderResourceViewHandle => ShaderResourceView,
    SamplerHandle => Sampler,
    RenderTargetViewHandle => RenderTargetView,
    DepthStencilViewHandle => DepthStencilView,
}
