//! Unit tests for headless.rs

use super::*;

// ============================================================================
// Helpers
// ============================================================================

fn create_backend() -> (HeadlessBackend, HeadlessProbe, DeviceObjects) {
    let mut backend = HeadlessBackend::new();
    let probe = backend.probe();
    let objects = backend.create_device(&DeviceCreationParams::default()).unwrap();
    (backend, probe, objects)
}

fn swap_chain_desc(width: u32, height: u32) -> SwapChainDesc {
    SwapChainDesc {
        width,
        height,
        format: Format::B8G8R8A8_UNORM,
        buffer_count: 2,
    }
}

// ============================================================================
// Device creation
// ============================================================================

#[test]
fn test_create_device_counts_and_reports_adapter() {
    let (backend, probe, objects) = create_backend();
    assert_eq!(backend.name(), "headless");
    assert_eq!(probe.device_creation_count(), 1);
    assert_eq!(objects.device.adapter(), backend.default_adapter().unwrap());
    assert!(objects.device.removed_reason().is_none());
}

#[test]
fn test_injected_creation_failure_is_returned_once() {
    let mut backend = HeadlessBackend::new();
    let probe = backend.probe();
    probe.fail_next_device_creation(Error::InitializationFailed("no adapter".to_string()));

    let first = backend.create_device(&DeviceCreationParams::default());
    assert!(matches!(first, Err(Error::InitializationFailed(_))));
    assert_eq!(probe.device_creation_count(), 0);

    assert!(backend.create_device(&DeviceCreationParams::default()).is_ok());
    assert_eq!(probe.device_creation_count(), 1);
}

#[test]
fn test_debug_layer_request_is_recorded() {
    let mut backend = HeadlessBackend::new();
    let probe = backend.probe();
    backend.create_device(&DeviceCreationParams { debug_layer: true }).unwrap();
    assert!(probe.debug_layer_requested());
}

#[test]
fn test_new_device_invalidates_old_handles() {
    let (mut backend, probe, old) = create_backend();
    let buffer = old.device.create_buffer(&BufferDesc::constant(64), None).unwrap();
    assert!(old.device.is_alive(buffer.into()));

    let new = backend.create_device(&DeviceCreationParams::default()).unwrap();
    assert!(!old.device.is_alive(buffer.into()));
    assert!(!new.device.is_alive(buffer.into()));
    assert!(matches!(old.device.removed_reason(), Some(Error::DeviceLost(_))));
    assert_eq!(probe.live_object_count(), 0);
}

// ============================================================================
// Object creation
// ============================================================================

#[test]
fn test_create_buffer_with_initial_data() {
    let (_backend, probe, objects) = create_backend();
    let data = [1u8, 2, 3, 4, 5, 6, 7, 8];
    let buffer = objects.device.create_buffer(&BufferDesc::vertex(8), Some(&data)).unwrap();
    assert_eq!(probe.buffer_contents(buffer).unwrap(), data.to_vec());
}

#[test]
fn test_create_buffer_argument_validation() {
    let (_backend, _probe, objects) = create_backend();
    let device = &objects.device;

    let zero = device.create_buffer(&BufferDesc::vertex(0), Some(&[]));
    assert!(matches!(zero, Err(Error::ApiFailure { code: 0x8007_0057, .. })));

    let short_data = device.create_buffer(&BufferDesc::vertex(16), Some(&[0u8; 8]));
    assert!(matches!(short_data, Err(Error::ApiFailure { .. })));

    let immutable_empty = device.create_buffer(&BufferDesc::index(16), None);
    assert!(matches!(immutable_empty, Err(Error::ApiFailure { .. })));

    let unaligned = device.create_buffer(&BufferDesc::constant(20), None);
    assert!(matches!(unaligned, Err(Error::ApiFailure { .. })));
}

#[test]
fn test_empty_shader_bytecode_rejected() {
    let (_backend, _probe, objects) = create_backend();
    assert!(objects.device.create_vertex_shader(&[]).is_err());
    assert!(objects.device.create_pixel_shader(&[]).is_err());
    assert!(objects.device.create_vertex_shader(&[0x44, 0x58, 0x42, 0x43]).is_ok());
}

#[test]
fn test_input_layout_requires_elements() {
    let (_backend, _probe, objects) = create_backend();
    let elements = [InputElementDesc::per_vertex("POSITION", Format::R32G32B32_FLOAT, 0)];
    assert!(objects.device.create_input_layout(&elements, &[1, 2, 3]).is_ok());
    assert!(objects.device.create_input_layout(&[], &[1, 2, 3]).is_err());
}

#[test]
fn test_texture_views_need_matching_bind_flags() {
    let (_backend, _probe, objects) = create_backend();
    let device = &objects.device;

    let pixels = vec![255u8; 4 * 4 * 4];
    let sampled = device
        .create_texture(&TextureDesc::sampled(4, 4, Format::R8G8B8A8_UNORM), Some(&pixels))
        .unwrap();
    assert!(device.create_shader_resource_view(sampled).is_ok());
    assert!(device.create_render_target_view(sampled).is_err());

    let depth = device.create_texture(&TextureDesc::depth_stencil(4, 4), None).unwrap();
    assert!(device.create_depth_stencil_view(depth).is_ok());
}

#[test]
fn test_texture_data_must_match_top_level() {
    let (_backend, _probe, objects) = create_backend();
    let result = objects
        .device
        .create_texture(&TextureDesc::sampled(4, 4, Format::R8G8B8A8_UNORM), Some(&[0u8; 10]));
    assert!(result.is_err());
}

#[test]
fn test_release_removes_object() {
    let (_backend, probe, objects) = create_backend();
    let sampler = objects.device.create_sampler(&SamplerDesc::default()).unwrap();
    assert_eq!(probe.live_object_count(), 1);

    objects.device.release(sampler.into());
    assert!(!objects.device.is_alive(sampler.into()));
    assert_eq!(probe.live_object_count(), 0);

    // Releasing again is a no-op
    objects.device.release(sampler.into());
}

// ============================================================================
// Map / unmap
// ============================================================================

#[test]
fn test_map_write_unmap_cycle() {
    let (_backend, probe, objects) = create_backend();
    let buffer = objects.device.create_buffer(&BufferDesc::constant(16), None).unwrap();

    let size = objects.context.map_write_discard(buffer).unwrap();
    assert_eq!(size, 16);
    assert!(probe.is_mapped(buffer));

    objects.context.write_mapped(buffer, &[7u8; 16]).unwrap();
    objects.context.unmap(buffer);

    assert!(!probe.is_mapped(buffer));
    assert_eq!(probe.buffer_contents(buffer).unwrap(), vec![7u8; 16]);
    assert_eq!(
        probe.commands(),
        vec![RecordedCommand::Map(buffer), RecordedCommand::Unmap(buffer)]
    );
}

#[test]
fn test_map_discards_previous_contents() {
    let (_backend, probe, objects) = create_backend();
    let buffer = objects.device.create_buffer(&BufferDesc::constant(16), Some(&[9u8; 16])).unwrap();

    objects.context.map_write_discard(buffer).unwrap();
    assert_eq!(probe.buffer_contents(buffer).unwrap(), vec![0u8; 16]);
    objects.context.unmap(buffer);
}

#[test]
fn test_map_rejects_static_and_double_map() {
    let (_backend, _probe, objects) = create_backend();
    let vertex = objects.device.create_buffer(&BufferDesc::vertex(4), Some(&[0u8; 4])).unwrap();
    assert!(objects.context.map_write_discard(vertex).is_err());

    let constant = objects.device.create_buffer(&BufferDesc::constant(16), None).unwrap();
    objects.context.map_write_discard(constant).unwrap();
    assert!(matches!(
        objects.context.map_write_discard(constant),
        Err(Error::ApiFailure { code: 0x887A_0001, .. })
    ));
}

#[test]
fn test_write_requires_mapping_and_fits() {
    let (_backend, _probe, objects) = create_backend();
    let buffer = objects.device.create_buffer(&BufferDesc::constant(16), None).unwrap();
    assert!(objects.context.write_mapped(buffer, &[0u8; 4]).is_err());

    objects.context.map_write_discard(buffer).unwrap();
    assert!(matches!(
        objects.context.write_mapped(buffer, &[0u8; 32]),
        Err(Error::InvalidResource(_))
    ));
}

// ============================================================================
// Device loss
// ============================================================================

#[test]
fn test_lost_device_fails_creation_and_map() {
    let (_backend, probe, objects) = create_backend();
    let buffer = objects.device.create_buffer(&BufferDesc::constant(16), None).unwrap();
    probe.lose_device("driver upgrade");

    assert!(probe.is_device_lost());
    assert!(matches!(objects.device.removed_reason(), Some(Error::DeviceLost(r)) if r == "driver upgrade"));
    assert!(matches!(
        objects.device.create_buffer(&BufferDesc::constant(16), None),
        Err(Error::DeviceLost(_))
    ));
    assert!(objects.context.map_write_discard(buffer).unwrap_err().is_device_lost());
}

#[test]
fn test_lost_device_drops_draw_state_commands() {
    let (_backend, probe, objects) = create_backend();
    probe.lose_device("hung");

    objects.context.set_primitive_topology(PrimitiveTopology::TriangleList);
    objects.context.draw_indexed(36, 0, 0);
    assert!(probe.commands().is_empty());
}

#[test]
fn test_release_allowed_on_lost_device() {
    let (_backend, probe, objects) = create_backend();
    let sampler = objects.device.create_sampler(&SamplerDesc::default()).unwrap();
    probe.lose_device("reset");
    objects.device.release(sampler.into());
    assert_eq!(probe.live_object_count(), 0);
}

// ============================================================================
// Context recording
// ============================================================================

#[test]
fn test_multi_slot_bindings_expand_per_slot() {
    let (_backend, probe, objects) = create_backend();
    let a = objects.device.create_buffer(&BufferDesc::constant(16), None).unwrap();
    let b = objects.device.create_buffer(&BufferDesc::constant(16), None).unwrap();

    objects.context.set_constant_buffers(ShaderStage::Pixel, 2, &[a, b]);
    assert_eq!(
        probe.take_commands(),
        vec![
            RecordedCommand::SetConstantBuffer { stage: ShaderStage::Pixel, slot: 2, buffer: a },
            RecordedCommand::SetConstantBuffer { stage: ShaderStage::Pixel, slot: 3, buffer: b },
        ]
    );
    assert!(probe.commands().is_empty());
}

#[test]
fn test_draw_is_recorded() {
    let (_backend, probe, objects) = create_backend();
    objects.context.draw_indexed(36, 0, 0);
    assert_eq!(
        probe.commands(),
        vec![RecordedCommand::DrawIndexed { index_count: 36, start_index: 0, base_vertex: 0 }]
    );
}

// ============================================================================
// Swap chain
// ============================================================================

#[test]
fn test_swap_chain_lifecycle() {
    let (mut backend, probe, objects) = create_backend();
    let mut swap_chain = backend
        .create_swap_chain(objects.device.as_ref(), &swap_chain_desc(800, 600))
        .unwrap();

    assert_eq!(probe.swap_chain_desc(), Some(swap_chain_desc(800, 600)));
    assert_eq!(swap_chain.rotation(), DisplayRotation::Identity);
    assert!(objects.device.is_alive(swap_chain.back_buffer().unwrap().into()));

    swap_chain.set_rotation(DisplayRotation::Rotate90).unwrap();
    assert_eq!(probe.swap_chain_rotation(), Some(DisplayRotation::Rotate90));

    swap_chain.present(1).unwrap();
    assert_eq!(probe.present_count(), 1);
    assert_eq!(probe.commands(), vec![RecordedCommand::Present { sync_interval: 1 }]);

    drop(swap_chain);
    assert_eq!(probe.swap_chain_desc(), None);
    assert_eq!(probe.live_object_count(), 0);
}

#[test]
fn test_swap_chain_matrix_transform() {
    let (mut backend, probe, objects) = create_backend();
    let mut swap_chain = backend
        .create_swap_chain(objects.device.as_ref(), &swap_chain_desc(800, 600))
        .unwrap();
    assert_eq!(swap_chain.matrix_transform(), glam::Vec2::ONE);

    swap_chain.set_matrix_transform(glam::Vec2::new(0.5, 0.25)).unwrap();
    assert_eq!(probe.swap_chain_scale(), Some(glam::Vec2::new(0.5, 0.25)));

    let result = swap_chain.set_matrix_transform(glam::Vec2::new(0.0, 1.0));
    assert!(matches!(result, Err(Error::ApiFailure { code: 0x8007_0057, .. })));
    assert_eq!(swap_chain.matrix_transform(), glam::Vec2::new(0.5, 0.25));

    probe.lose_device("removed");
    assert!(matches!(swap_chain.set_matrix_transform(glam::Vec2::ONE), Err(Error::DeviceLost(_))));
}

#[test]
fn test_resize_fails_while_back_buffer_view_is_alive() {
    let (mut backend, _probe, objects) = create_backend();
    let mut swap_chain = backend
        .create_swap_chain(objects.device.as_ref(), &swap_chain_desc(800, 600))
        .unwrap();
    let rtv = objects
        .device
        .create_render_target_view(swap_chain.back_buffer().unwrap())
        .unwrap();

    let result = swap_chain.resize_buffers(2, 1024, 768, Format::B8G8R8A8_UNORM);
    assert!(matches!(result, Err(Error::ApiFailure { code: 0x887A_0001, .. })));

    objects.device.release(rtv.into());
    let old_back_buffer = swap_chain.back_buffer().unwrap();
    swap_chain.resize_buffers(2, 1024, 768, Format::B8G8R8A8_UNORM).unwrap();

    assert_eq!(swap_chain.desc().width, 1024);
    assert!(!objects.device.is_alive(old_back_buffer.into()));
    assert!(objects.device.is_alive(swap_chain.back_buffer().unwrap().into()));
}

#[test]
fn test_present_reports_device_lost() {
    let (mut backend, probe, objects) = create_backend();
    let mut swap_chain = backend
        .create_swap_chain(objects.device.as_ref(), &swap_chain_desc(64, 64))
        .unwrap();
    probe.lose_device("removed");

    assert!(swap_chain.present(1).unwrap_err().is_device_lost());
    assert_eq!(probe.present_count(), 0);
}

#[test]
fn test_swap_chain_creation_on_lost_device_fails() {
    let (mut backend, probe, objects) = create_backend();
    probe.lose_device("removed");
    let result = backend.create_swap_chain(objects.device.as_ref(), &swap_chain_desc(64, 64));
    assert!(matches!(result, Err(Error::DeviceLost(_))));
}

#[test]
fn test_present_paces_by_frame_interval() {
    let mut backend = HeadlessBackend::with_frame_interval(Duration::from_millis(5));
    let objects = backend.create_device(&DeviceCreationParams::default()).unwrap();
    let mut swap_chain = backend
        .create_swap_chain(objects.device.as_ref(), &swap_chain_desc(64, 64))
        .unwrap();

    let start = std::time::Instant::now();
    swap_chain.present(2).unwrap();
    assert!(start.elapsed() >= Duration::from_millis(10));

    let start = std::time::Instant::now();
    swap_chain.present(0).unwrap();
    assert!(start.elapsed() < Duration::from_millis(10));
}

// ============================================================================
// Probe
// ============================================================================

#[test]
fn test_change_default_adapter() {
    let (backend, probe, objects) = create_backend();
    probe.change_default_adapter();
    assert_ne!(backend.default_adapter().unwrap(), objects.device.adapter());
}

#[test]
fn test_trim_is_counted() {
    let (_backend, probe, objects) = create_backend();
    objects.device.trim();
    objects.device.trim();
    assert_eq!(probe.trim_count(), 2);
}
