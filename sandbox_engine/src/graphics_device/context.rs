/// Immediate device context - command submission
///
/// The context is `Send` but deliberately not `Sync`: it may move to the
/// render thread, but only one thread submits commands at a time.

use bitflags::bitflags;

use crate::error::Result;
use crate::graphics_device::{
    BufferHandle, DepthStencilViewHandle, Format, GpuResource, InputLayoutHandle,
    PixelShaderHandle, RenderTargetViewHandle, SamplerHandle, ShaderResourceViewHandle,
    ShaderStage, VertexShaderHandle,
};

/// Rasterizer viewport in render-target pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub top_left_x: f32,
    pub top_left_y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Viewport covering a whole `width` x `height` target with depth [0, 1]
    pub fn full(width: f32, height: f32) -> Self {
        Self {
            top_left_x: 0.0,
            top_left_y: 0.0,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// How vertices are assembled into primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    TriangleList,
    TriangleStrip,
    LineList,
}

bitflags! {
    /// Planes cleared by `clear_depth_stencil_view`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        const DEPTH   = 0x1;
        const STENCIL = 0x2;
    }
}

/// Command submission interface of the graphics API
///
/// Draw-state calls never fail; on a lost device they are silently dropped
/// and the loss is reported by the next map or present.
pub trait DeviceContext: Send {
    fn set_viewports(&self, viewports: &[Viewport]);

    fn set_render_targets(
        &self,
        render_targets: &[RenderTargetViewHandle],
        depth_stencil: Option<DepthStencilViewHandle>,
    );

    fn clear_render_target_view(&self, view: RenderTargetViewHandle, color: [f32; 4]);

    fn clear_depth_stencil_view(
        &self,
        view: DepthStencilViewHandle,
        flags: ClearFlags,
        depth: f32,
        stencil: u8,
    );

    /// Map a dynamic buffer for writing, discarding its previous contents
    ///
    /// # Returns
    ///
    /// The mapped size in bytes
    fn map_write_discard(&self, buffer: BufferHandle) -> Result<usize>;

    /// Copy `data` into a mapped buffer starting at byte 0
    fn write_mapped(&self, buffer: BufferHandle, data: &[u8]) -> Result<()>;

    /// Release a mapping; unmapping a buffer that is not mapped does nothing
    fn unmap(&self, buffer: BufferHandle);

    fn set_constant_buffers(&self, stage: ShaderStage, start_slot: u32, buffers: &[BufferHandle]);

    fn set_vertex_buffer(&self, slot: u32, buffer: BufferHandle, stride: u32, offset: u32);

    fn set_index_buffer(&self, buffer: BufferHandle, format: Format, offset: u32);

    fn set_primitive_topology(&self, topology: PrimitiveTopology);

    fn set_input_layout(&self, layout: Option<InputLayoutHandle>);

    fn set_vertex_shader(&self, shader: Option<VertexShaderHandle>);

    fn set_pixel_shader(&self, shader: Option<PixelShaderHandle>);

    fn set_shader_resources(
        &self,
        stage: ShaderStage,
        start_slot: u32,
        views: &[ShaderResourceViewHandle],
    );

    fn set_samplers(&self, stage: ShaderStage, start_slot: u32, samplers: &[SamplerHandle]);

    fn draw_indexed(&self, index_count: u32, start_index: u32, base_vertex: i32);

    /// Hint that the contents of a view are no longer needed
    fn discard_view(&self, view: GpuResource);
}
