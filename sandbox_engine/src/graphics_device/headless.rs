/// Headless graphics backend
///
/// Implements the device traits without a GPU. Objects live in slot maps,
/// every context command is appended to a log, and a `HeadlessProbe` shared
/// with the host inspects state and injects faults: device loss, adapter
/// change, device creation failure.
///
/// All devices created by one backend share a single object table. Creating a
/// new device clears the table, which invalidates the handles of the previous
/// device the same way a device reset does on real hardware.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use glam::Vec2;
use slotmap::SlotMap;

use crate::error::{Error, Result};
use crate::graphics_device::{
    AdapterId, BindFlags, BufferDesc, BufferHandle, BufferUsage, ClearFlags,
    DepthStencilViewHandle, DeviceContext, DeviceCreationParams, DeviceObjects,
    DisplayRotation, Format, GpuResource, GraphicsBackend, GraphicsDevice, InputElementDesc,
    InputLayoutHandle, PixelShaderHandle, PrimitiveTopology, RenderTargetViewHandle,
    SamplerDesc, SamplerHandle, ShaderResourceViewHandle, ShaderStage, SwapChain,
    SwapChainDesc, TextureDesc, TextureHandle, VertexShaderHandle, Viewport,
};

/// Invalid argument passed to a creation call
const E_INVALIDARG: u32 = 0x8007_0057;
/// Call made in a state the API forbids
const DXGI_ERROR_INVALID_CALL: u32 = 0x887A_0001;

// ============================================================================
// Recorded commands
// ============================================================================

/// One command submitted to the headless context
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCommand {
    SetViewport(Viewport),
    SetRenderTargets {
        render_targets: Vec<RenderTargetViewHandle>,
        depth_stencil: Option<DepthStencilViewHandle>,
    },
    ClearRenderTarget {
        view: RenderTargetViewHandle,
        color: [f32; 4],
    },
    ClearDepthStencil {
        view: DepthStencilViewHandle,
        flags: ClearFlags,
        depth: f32,
        stencil: u8,
    },
    Map(BufferHandle),
    Unmap(BufferHandle),
    SetConstantBuffer {
        stage: ShaderStage,
        slot: u32,
        buffer: BufferHandle,
    },
    SetVertexBuffer {
        slot: u32,
        buffer: BufferHandle,
        stride: u32,
        offset: u32,
    },
    SetIndexBuffer {
        buffer: BufferHandle,
        format: Format,
        offset: u32,
    },
    SetPrimitiveTopology(PrimitiveTopology),
    SetInputLayout(Option<InputLayoutHandle>),
    SetVertexShader(Option<VertexShaderHandle>),
    SetPixelShader(Option<PixelShaderHandle>),
    SetShaderResource {
        stage: ShaderStage,
        slot: u32,
        view: ShaderResourceViewHandle,
    },
    SetSampler {
        stage: ShaderStage,
        slot: u32,
        sampler: SamplerHandle,
    },
    DrawIndexed {
        index_count: u32,
        start_index: u32,
        base_vertex: i32,
    },
    DiscardView(GpuResource),
    Present {
        sync_interval: u32,
    },
}

// ============================================================================
// Shared state
// ============================================================================

struct BufferObject {
    desc: BufferDesc,
    data: Vec<u8>,
    mapped: bool,
}

#[derive(Default)]
struct ObjectTable {
    buffers: SlotMap<BufferHandle, BufferObject>,
    vertex_shaders: SlotMap<VertexShaderHandle, usize>,
    pixel_shaders: SlotMap<PixelShaderHandle, usize>,
    input_layouts: SlotMap<InputLayoutHandle, Vec<InputElementDesc>>,
    textures: SlotMap<TextureHandle, TextureDesc>,
    shader_resource_views: SlotMap<ShaderResourceViewHandle, TextureHandle>,
    samplers: SlotMap<SamplerHandle, SamplerDesc>,
    render_target_views: SlotMap<RenderTargetViewHandle, TextureHandle>,
    depth_stencil_views: SlotMap<DepthStencilViewHandle, TextureHandle>,
}

impl ObjectTable {
    // Removal bumps slot versions, so cleared keys never resolve again
    fn clear(&mut self) {
        self.buffers.clear();
        self.vertex_shaders.clear();
        self.pixel_shaders.clear();
        self.input_layouts.clear();
        self.textures.clear();
        self.shader_resource_views.clear();
        self.samplers.clear();
        self.render_target_views.clear();
        self.depth_stencil_views.clear();
    }

    fn len(&self) -> usize {
        self.buffers.len()
            + self.vertex_shaders.len()
            + self.pixel_shaders.len()
            + self.input_layouts.len()
            + self.textures.len()
            + self.shader_resource_views.len()
            + self.samplers.len()
            + self.render_target_views.len()
            + self.depth_stencil_views.len()
    }

    fn contains(&self, resource: GpuResource) -> bool {
        match resource {
            GpuResource::Buffer(h) => self.buffers.contains_key(h),
            GpuResource::VertexShader(h) => self.vertex_shaders.contains_key(h),
            GpuResource::PixelShader(h) => self.pixel_shaders.contains_key(h),
            GpuResource::InputLayout(h) => self.input_layouts.contains_key(h),
            GpuResource::Texture(h) => self.textures.contains_key(h),
            GpuResource::ShaderResourceView(h) => self.shader_resource_views.contains_key(h),
            GpuResource::Sampler(h) => self.samplers.contains_key(h),
            GpuResource::RenderTargetView(h) => self.render_target_views.contains_key(h),
            GpuResource::DepthStencilView(h) => self.depth_stencil_views.contains_key(h),
        }
    }

    fn remove(&mut self, resource: GpuResource) {
        match resource {
            GpuResource::Buffer(h) => { self.buffers.remove(h); }
            GpuResource::VertexShader(h) => { self.vertex_shaders.remove(h); }
            GpuResource::PixelShader(h) => { self.pixel_shaders.remove(h); }
            GpuResource::InputLayout(h) => { self.input_layouts.remove(h); }
            GpuResource::Texture(h) => { self.textures.remove(h); }
            GpuResource::ShaderResourceView(h) => { self.shader_resource_views.remove(h); }
            GpuResource::Sampler(h) => { self.samplers.remove(h); }
            GpuResource::RenderTargetView(h) => { self.render_target_views.remove(h); }
            GpuResource::DepthStencilView(h) => { self.depth_stencil_views.remove(h); }
        }
    }
}

struct HeadlessState {
    /// Incremented for every created device
    epoch: u64,
    /// Removal reason of the current device
    lost: Option<String>,
    default_adapter: AdapterId,
    pending_creation_failure: Option<Error>,
    device_creations: u32,
    debug_layer: bool,
    objects: ObjectTable,
    commands: Vec<RecordedCommand>,
    presents: u64,
    trims: u32,
    swap_chain_desc: Option<SwapChainDesc>,
    swap_chain_rotation: Option<DisplayRotation>,
    swap_chain_scale: Option<Vec2>,
}

impl HeadlessState {
    fn new() -> Self {
        Self {
            epoch: 0,
            lost: None,
            default_adapter: AdapterId(1),
            pending_creation_failure: None,
            device_creations: 0,
            debug_layer: false,
            objects: ObjectTable::default(),
            commands: Vec::new(),
            presents: 0,
            trims: 0,
            swap_chain_desc: None,
            swap_chain_rotation: None,
            swap_chain_scale: None,
        }
    }

    /// Fail with DeviceLost unless `epoch` is the current, healthy device
    fn check(&self, epoch: u64) -> Result<()> {
        if self.epoch != epoch {
            return Err(Error::DeviceLost("device has been replaced".to_string()));
        }
        match &self.lost {
            Some(reason) => Err(Error::DeviceLost(reason.clone())),
            None => Ok(()),
        }
    }

    fn accepts_commands(&self, epoch: u64) -> bool {
        self.epoch == epoch && self.lost.is_none()
    }

    fn record(&mut self, epoch: u64, command: RecordedCommand) {
        if self.accepts_commands(epoch) {
            self.commands.push(command);
        }
    }
}

fn invalid_arg(context: &str) -> Error {
    Error::ApiFailure {
        code: E_INVALIDARG,
        context: context.to_string(),
    }
}

fn lock(shared: &Mutex<HeadlessState>) -> MutexGuard<'_, HeadlessState> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Backend
// ============================================================================

/// Backend entry point
pub struct HeadlessBackend {
    shared: Arc<Mutex<HeadlessState>>,
    frame_interval: Duration,
}

impl HeadlessBackend {
    /// Backend whose presents return immediately
    pub fn new() -> Self {
        Self::with_frame_interval(Duration::ZERO)
    }

    /// Backend whose presents block `frame_interval` per sync interval
    pub fn with_frame_interval(frame_interval: Duration) -> Self {
        Self {
            shared: Arc::new(Mutex::new(HeadlessState::new())),
            frame_interval,
        }
    }

    /// Inspector sharing this backend's state
    pub fn probe(&self) -> HeadlessProbe {
        HeadlessProbe { shared: self.shared.clone() }
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsBackend for HeadlessBackend {
    fn name(&self) -> &str {
        "headless"
    }

    fn default_adapter(&self) -> Result<AdapterId> {
        Ok(lock(&self.shared).default_adapter)
    }

    fn create_device(&mut self, params: &DeviceCreationParams) -> Result<DeviceObjects> {
        let mut state = lock(&self.shared);
        if let Some(error) = state.pending_creation_failure.take() {
            return Err(error);
        }

        state.epoch += 1;
        state.lost = None;
        state.objects.clear();
        state.swap_chain_desc = None;
        state.swap_chain_rotation = None;
        state.swap_chain_scale = None;
        state.device_creations += 1;
        state.debug_layer = params.debug_layer;

        let epoch = state.epoch;
        let adapter = state.default_adapter;
        Ok(DeviceObjects {
            device: Box::new(HeadlessDevice {
                shared: self.shared.clone(),
                epoch,
                adapter,
            }),
            context: Box::new(HeadlessContext {
                shared: self.shared.clone(),
                epoch,
            }),
        })
    }

    fn create_swap_chain(
        &mut self,
        device: &dyn GraphicsDevice,
        desc: &SwapChainDesc,
    ) -> Result<Box<dyn SwapChain>> {
        if let Some(error) = device.removed_reason() {
            return Err(error);
        }
        if desc.width == 0 || desc.height == 0 || desc.buffer_count < 2 {
            return Err(invalid_arg("CreateSwapChain: invalid buffer description"));
        }

        let mut state = lock(&self.shared);
        let epoch = state.epoch;
        let back_buffer = state.objects.textures.insert(back_buffer_desc(desc));
        state.swap_chain_desc = Some(desc.clone());
        state.swap_chain_rotation = Some(DisplayRotation::Identity);
        state.swap_chain_scale = Some(Vec2::ONE);

        Ok(Box::new(HeadlessSwapChain {
            shared: self.shared.clone(),
            epoch,
            desc: desc.clone(),
            rotation: DisplayRotation::Identity,
            scale: Vec2::ONE,
            back_buffer,
            frame_interval: self.frame_interval,
        }))
    }
}

fn back_buffer_desc(desc: &SwapChainDesc) -> TextureDesc {
    TextureDesc {
        width: desc.width,
        height: desc.height,
        format: desc.format,
        mip_levels: 1,
        bind: BindFlags::RENDER_TARGET,
    }
}

// ============================================================================
// Device
// ============================================================================

struct HeadlessDevice {
    shared: Arc<Mutex<HeadlessState>>,
    epoch: u64,
    adapter: AdapterId,
}

impl HeadlessDevice {
    fn live_state(&self) -> Result<MutexGuard<'_, HeadlessState>> {
        let state = lock(&self.shared);
        state.check(self.epoch)?;
        Ok(state)
    }

    fn texture_with_bind(
        state: &HeadlessState,
        texture: TextureHandle,
        bind: BindFlags,
        call: &str,
    ) -> Result<()> {
        match state.objects.textures.get(texture) {
            Some(desc) if desc.bind.contains(bind) => Ok(()),
            Some(_) => Err(invalid_arg(call)),
            None => Err(Error::InvalidResource(format!("{}: unknown texture", call))),
        }
    }
}

impl GraphicsDevice for HeadlessDevice {
    fn adapter(&self) -> AdapterId {
        self.adapter
    }

    fn removed_reason(&self) -> Option<Error> {
        lock(&self.shared).check(self.epoch).err()
    }

    fn create_buffer(&self, desc: &BufferDesc, initial_data: Option<&[u8]>) -> Result<BufferHandle> {
        let mut state = self.live_state()?;
        let size = desc.byte_width as usize;

        if size == 0 {
            return Err(invalid_arg("CreateBuffer: zero byte width"));
        }
        if desc.bind.contains(BindFlags::CONSTANT_BUFFER) && size % 16 != 0 {
            return Err(invalid_arg("CreateBuffer: constant buffer size must be a multiple of 16"));
        }
        let data = match initial_data {
            Some(bytes) if bytes.len() != size => {
                return Err(invalid_arg("CreateBuffer: initial data does not cover the buffer"));
            }
            Some(bytes) => bytes.to_vec(),
            None if desc.usage == BufferUsage::Immutable => {
                return Err(invalid_arg("CreateBuffer: immutable buffer without initial data"));
            }
            None => vec![0; size],
        };

        Ok(state.objects.buffers.insert(BufferObject {
            desc: desc.clone(),
            data,
            mapped: false,
        }))
    }

    fn create_vertex_shader(&self, bytecode: &[u8]) -> Result<VertexShaderHandle> {
        let mut state = self.live_state()?;
        if bytecode.is_empty() {
            return Err(invalid_arg("CreateVertexShader: empty bytecode"));
        }
        Ok(state.objects.vertex_shaders.insert(bytecode.len()))
    }

    fn create_pixel_shader(&self, bytecode: &[u8]) -> Result<PixelShaderHandle> {
        let mut state = self.live_state()?;
        if bytecode.is_empty() {
            return Err(invalid_arg("CreatePixelShader: empty bytecode"));
        }
        Ok(state.objects.pixel_shaders.insert(bytecode.len()))
    }

    fn create_input_layout(
        &self,
        elements: &[InputElementDesc],
        vertex_shader_bytecode: &[u8],
    ) -> Result<InputLayoutHandle> {
        let mut state = self.live_state()?;
        if elements.is_empty() || vertex_shader_bytecode.is_empty() {
            return Err(invalid_arg("CreateInputLayout: missing elements or signature"));
        }
        Ok(state.objects.input_layouts.insert(elements.to_vec()))
    }

    fn create_texture(&self, desc: &TextureDesc, initial_data: Option<&[u8]>) -> Result<TextureHandle> {
        let mut state = self.live_state()?;
        if desc.width == 0 || desc.height == 0 || desc.mip_levels == 0 {
            return Err(invalid_arg("CreateTexture2D: empty texture"));
        }
        if let Some(bytes) = initial_data {
            if bytes.len() != desc.top_level_size() {
                return Err(invalid_arg("CreateTexture2D: initial data does not match the top mip"));
            }
        }
        Ok(state.objects.textures.insert(desc.clone()))
    }

    fn create_shader_resource_view(&self, texture: TextureHandle) -> Result<ShaderResourceViewHandle> {
        let mut state = self.live_state()?;
        Self::texture_with_bind(&state, texture, BindFlags::SHADER_RESOURCE, "CreateShaderResourceView")?;
        Ok(state.objects.shader_resource_views.insert(texture))
    }

    fn create_sampler(&self, desc: &SamplerDesc) -> Result<SamplerHandle> {
        let mut state = self.live_state()?;
        if desc.max_anisotropy == 0 || desc.max_anisotropy > 16 {
            return Err(invalid_arg("CreateSamplerState: anisotropy out of range"));
        }
        Ok(state.objects.samplers.insert(desc.clone()))
    }

    fn create_render_target_view(&self, texture: TextureHandle) -> Result<RenderTargetViewHandle> {
        let mut state = self.live_state()?;
        Self::texture_with_bind(&state, texture, BindFlags::RENDER_TARGET, "CreateRenderTargetView")?;
        Ok(state.objects.render_target_views.insert(texture))
    }

    fn create_depth_stencil_view(&self, texture: TextureHandle) -> Result<DepthStencilViewHandle> {
        let mut state = self.live_state()?;
        Self::texture_with_bind(&state, texture, BindFlags::DEPTH_STENCIL, "CreateDepthStencilView")?;
        Ok(state.objects.depth_stencil_views.insert(texture))
    }

    fn release(&self, resource: GpuResource) {
        let mut state = lock(&self.shared);
        // Releasing on a removed device is legal, the replacement owns the table
        if state.epoch == self.epoch {
            state.objects.remove(resource);
        }
    }

    fn is_alive(&self, resource: GpuResource) -> bool {
        let state = lock(&self.shared);
        state.epoch == self.epoch && state.objects.contains(resource)
    }

    fn trim(&self) {
        let mut state = lock(&self.shared);
        if state.epoch == self.epoch {
            state.trims += 1;
        }
    }
}

// ============================================================================
// Context
// ============================================================================

struct HeadlessContext {
    shared: Arc<Mutex<HeadlessState>>,
    epoch: u64,
}

impl HeadlessContext {
    fn record(&self, command: RecordedCommand) {
        lock(&self.shared).record(self.epoch, command);
    }
}

impl DeviceContext for HeadlessContext {
    fn set_viewports(&self, viewports: &[Viewport]) {
        let mut state = lock(&self.shared);
        for viewport in viewports {
            state.record(self.epoch, RecordedCommand::SetViewport(*viewport));
        }
    }

    fn set_render_targets(
        &self,
        render_targets: &[RenderTargetViewHandle],
        depth_stencil: Option<DepthStencilViewHandle>,
    ) {
        self.record(RecordedCommand::SetRenderTargets {
            render_targets: render_targets.to_vec(),
            depth_stencil,
        });
    }

    fn clear_render_target_view(&self, view: RenderTargetViewHandle, color: [f32; 4]) {
        self.record(RecordedCommand::ClearRenderTarget { view, color });
    }

    fn clear_depth_stencil_view(
        &self,
        view: DepthStencilViewHandle,
        flags: ClearFlags,
        depth: f32,
        stencil: u8,
    ) {
        self.record(RecordedCommand::ClearDepthStencil { view, flags, depth, stencil });
    }

    fn map_write_discard(&self, buffer: BufferHandle) -> Result<usize> {
        let mut guard = lock(&self.shared);
        guard.check(self.epoch)?;
        let state = &mut *guard;

        let object = state
            .objects
            .buffers
            .get_mut(buffer)
            .ok_or_else(|| Error::InvalidResource("Map: unknown buffer".to_string()))?;
        if object.desc.usage != BufferUsage::Dynamic {
            return Err(invalid_arg("Map: WRITE_DISCARD requires a dynamic buffer"));
        }
        if object.mapped {
            return Err(Error::ApiFailure {
                code: DXGI_ERROR_INVALID_CALL,
                context: "Map: buffer is already mapped".to_string(),
            });
        }

        object.mapped = true;
        object.data.fill(0);
        let size = object.data.len();
        state.commands.push(RecordedCommand::Map(buffer));
        Ok(size)
    }

    fn write_mapped(&self, buffer: BufferHandle, data: &[u8]) -> Result<()> {
        let mut state = lock(&self.shared);
        state.check(self.epoch)?;

        match state.objects.buffers.get_mut(buffer) {
            Some(object) if object.mapped => {
                if data.len() > object.data.len() {
                    return Err(Error::InvalidResource(format!(
                        "write of {} bytes overflows a {} byte mapping",
                        data.len(),
                        object.data.len()
                    )));
                }
                object.data[..data.len()].copy_from_slice(data);
                Ok(())
            }
            Some(_) => Err(Error::ApiFailure {
                code: DXGI_ERROR_INVALID_CALL,
                context: "write to a buffer that is not mapped".to_string(),
            }),
            None => Err(Error::InvalidResource("write to unknown buffer".to_string())),
        }
    }

    fn unmap(&self, buffer: BufferHandle) {
        let mut guard = lock(&self.shared);
        if guard.epoch != self.epoch {
            return;
        }
        let state = &mut *guard;
        if let Some(object) = state.objects.buffers.get_mut(buffer) {
            if object.mapped {
                object.mapped = false;
                if state.lost.is_none() {
                    state.commands.push(RecordedCommand::Unmap(buffer));
                }
            }
        }
    }

    fn set_constant_buffers(&self, stage: ShaderStage, start_slot: u32, buffers: &[BufferHandle]) {
        let mut state = lock(&self.shared);
        for (offset, buffer) in buffers.iter().enumerate() {
            state.record(self.epoch, RecordedCommand::SetConstantBuffer {
                stage,
                slot: start_slot + offset as u32,
                buffer: *buffer,
            });
        }
    }

    fn set_vertex_buffer(&self, slot: u32, buffer: BufferHandle, stride: u32, offset: u32) {
        self.record(RecordedCommand::SetVertexBuffer { slot, buffer, stride, offset });
    }

    fn set_index_buffer(&self, buffer: BufferHandle, format: Format, offset: u32) {
        self.record(RecordedCommand::SetIndexBuffer { buffer, format, offset });
    }

    fn set_primitive_topology(&self, topology: PrimitiveTopology) {
        self.record(RecordedCommand::SetPrimitiveTopology(topology));
    }

    fn set_input_layout(&self, layout: Option<InputLayoutHandle>) {
        self.record(RecordedCommand::SetInputLayout(layout));
    }

    fn set_vertex_shader(&self, shader: Option<VertexShaderHandle>) {
        self.record(RecordedCommand::SetVertexShader(shader));
    }

    fn set_pixel_shader(&self, shader: Option<PixelShaderHandle>) {
        self.record(RecordedCommand::SetPixelShader(shader));
    }

    fn set_shader_resources(
        &self,
        stage: ShaderStage,
        start_slot: u32,
        views: &[ShaderResourceViewHandle],
    ) {
        let mut state = lock(&self.shared);
        for (offset, view) in views.iter().enumerate() {
            state.record(self.epoch, RecordedCommand::SetShaderResource {
                stage,
                slot: start_slot + offset as u32,
                view: *view,
            });
        }
    }

    fn set_samplers(&self, stage: ShaderStage, start_slot: u32, samplers: &[SamplerHandle]) {
        let mut state = lock(&self.shared);
        for (offset, sampler) in samplers.iter().enumerate() {
            state.record(self.epoch, RecordedCommand::SetSampler {
                stage,
                slot: start_slot + offset as u32,
                sampler: *sampler,
            });
        }
    }

    fn draw_indexed(&self, index_count: u32, start_index: u32, base_vertex: i32) {
        self.record(RecordedCommand::DrawIndexed { index_count, start_index, base_vertex });
    }

    fn discard_view(&self, view: GpuResource) {
        self.record(RecordedCommand::DiscardView(view));
    }
}

// ============================================================================
// Swap chain
// ============================================================================

struct HeadlessSwapChain {
    shared: Arc<Mutex<HeadlessState>>,
    epoch: u64,
    desc: SwapChainDesc,
    rotation: DisplayRotation,
    scale: Vec2,
    back_buffer: TextureHandle,
    frame_interval: Duration,
}

impl SwapChain for HeadlessSwapChain {
    fn desc(&self) -> &SwapChainDesc {
        &self.desc
    }

    fn resize_buffers(&mut self, buffer_count: u32, width: u32, height: u32, format: Format) -> Result<()> {
        let mut state = lock(&self.shared);
        state.check(self.epoch)?;

        if width == 0 || height == 0 || buffer_count < 2 {
            return Err(invalid_arg("ResizeBuffers: invalid buffer description"));
        }
        let back_buffer = self.back_buffer;
        if state.objects.render_target_views.values().any(|texture| *texture == back_buffer) {
            return Err(Error::ApiFailure {
                code: DXGI_ERROR_INVALID_CALL,
                context: "ResizeBuffers: back buffer is still referenced by a view".to_string(),
            });
        }

        self.desc = SwapChainDesc { width, height, format, buffer_count };
        state.objects.textures.remove(back_buffer);
        self.back_buffer = state.objects.textures.insert(back_buffer_desc(&self.desc));
        state.swap_chain_desc = Some(self.desc.clone());
        Ok(())
    }

    fn set_rotation(&mut self, rotation: DisplayRotation) -> Result<()> {
        let mut state = lock(&self.shared);
        state.check(self.epoch)?;
        self.rotation = rotation;
        state.swap_chain_rotation = Some(rotation);
        Ok(())
    }

    fn rotation(&self) -> DisplayRotation {
        self.rotation
    }

    fn set_matrix_transform(&mut self, scale: Vec2) -> Result<()> {
        let mut state = lock(&self.shared);
        state.check(self.epoch)?;
        if !(scale.is_finite() && scale.x > 0.0 && scale.y > 0.0) {
            return Err(invalid_arg("SetMatrixTransform: scale must be positive and finite"));
        }
        self.scale = scale;
        state.swap_chain_scale = Some(scale);
        Ok(())
    }

    fn matrix_transform(&self) -> Vec2 {
        self.scale
    }

    fn back_buffer(&self) -> Result<TextureHandle> {
        lock(&self.shared).check(self.epoch)?;
        Ok(self.back_buffer)
    }

    fn present(&mut self, sync_interval: u32) -> Result<()> {
        {
            let mut state = lock(&self.shared);
            state.check(self.epoch)?;
            state.commands.push(RecordedCommand::Present { sync_interval });
            state.presents += 1;
        }

        if sync_interval > 0 && !self.frame_interval.is_zero() {
            std::thread::sleep(self.frame_interval * sync_interval);
        }
        Ok(())
    }
}

impl Drop for HeadlessSwapChain {
    fn drop(&mut self) {
        let mut state = lock(&self.shared);
        if state.epoch == self.epoch {
            state.objects.textures.remove(self.back_buffer);
            state.swap_chain_desc = None;
            state.swap_chain_rotation = None;
            state.swap_chain_scale = None;
        }
    }
}

// ============================================================================
// Probe
// ============================================================================

/// Host-side view into a headless backend
///
/// Cloneable and usable from any thread while the backend itself is owned by
/// the device resource container.
#[derive(Clone)]
pub struct HeadlessProbe {
    shared: Arc<Mutex<HeadlessState>>,
}

impl HeadlessProbe {
    fn state(&self) -> MutexGuard<'_, HeadlessState> {
        lock(&self.shared)
    }

    // ===== FAULT INJECTION =====

    /// Mark the current device as removed
    pub fn lose_device(&self, reason: &str) {
        self.state().lost = Some(reason.to_string());
    }

    /// Switch the default adapter, as when a GPU is hot-plugged
    pub fn change_default_adapter(&self) {
        let mut state = self.state();
        state.default_adapter = AdapterId(state.default_adapter.0 + 1);
    }

    /// Make the next `create_device` call fail with `error`
    pub fn fail_next_device_creation(&self, error: Error) {
        self.state().pending_creation_failure = Some(error);
    }

    // ===== INSPECTION =====

    pub fn device_creation_count(&self) -> u32 {
        self.state().device_creations
    }

    pub fn is_device_lost(&self) -> bool {
        self.state().lost.is_some()
    }

    pub fn debug_layer_requested(&self) -> bool {
        self.state().debug_layer
    }

    pub fn present_count(&self) -> u64 {
        self.state().presents
    }

    pub fn trim_count(&self) -> u32 {
        self.state().trims
    }

    /// Number of live objects of the current device, back buffer included
    pub fn live_object_count(&self) -> usize {
        self.state().objects.len()
    }

    /// Copy of all commands recorded so far
    pub fn commands(&self) -> Vec<RecordedCommand> {
        self.state().commands.clone()
    }

    /// Drain the command log
    pub fn take_commands(&self) -> Vec<RecordedCommand> {
        std::mem::take(&mut self.state().commands)
    }

    /// Current bytes of a live buffer
    pub fn buffer_contents(&self, buffer: BufferHandle) -> Option<Vec<u8>> {
        self.state().objects.buffers.get(buffer).map(|object| object.data.clone())
    }

    pub fn is_mapped(&self, buffer: BufferHandle) -> bool {
        self.state()
            .objects
            .buffers
            .get(buffer)
            .map(|object| object.mapped)
            .unwrap_or(false)
    }

    /// Description of the live swap chain
    pub fn swap_chain_desc(&self) -> Option<SwapChainDesc> {
        self.state().swap_chain_desc.clone()
    }

    pub fn swap_chain_rotation(&self) -> Option<DisplayRotation> {
        self.state().swap_chain_rotation
    }

    /// Scale last applied with `set_matrix_transform`
    pub fn swap_chain_scale(&self) -> Option<Vec2> {
        self.state().swap_chain_scale
    }
}

#[cfg(test)]
#[path = "headless_tests.rs"]
mod tests;
