//! Unit tests for typed_buffer.rs

use super::*;
use crate::graphics_device::{
    DeviceCreationParams, DeviceObjects, GraphicsBackend, HeadlessBackend, HeadlessProbe,
    RecordedCommand,
};
use glam::Vec3;

// ============================================================================
// Helpers
// ============================================================================

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
struct Params {
    values: [f32; 4],
}

impl ShaderConstants for Params {
    const SHADER_SIZE: usize = 16;
    const NAME: &'static str = "Params";
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct Odd {
    values: [f32; 3],
}

impl ShaderConstants for Odd {
    const SHADER_SIZE: usize = 12;
    const NAME: &'static str = "Odd";
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct Misdeclared {
    values: [f32; 4],
}

impl ShaderConstants for Misdeclared {
    const SHADER_SIZE: usize = 32;
    const NAME: &'static str = "Misdeclared";
}

fn setup() -> (HeadlessProbe, DeviceObjects) {
    let mut backend = HeadlessBackend::new();
    let probe = backend.probe();
    let objects = backend.create_device(&DeviceCreationParams::default()).unwrap();
    (probe, objects)
}

// ============================================================================
// Layout checks
// ============================================================================

#[test]
fn test_checked_layout_size() {
    assert_eq!(checked_layout_size::<Params>(), Ok(16));
    assert_eq!(
        checked_layout_size::<Odd>(),
        Err(Error::LayoutMismatch { layout: "Odd", expected: 12, actual: 12 })
    );
    assert_eq!(
        checked_layout_size::<Misdeclared>(),
        Err(Error::LayoutMismatch { layout: "Misdeclared", expected: 32, actual: 16 })
    );
}

#[test]
fn test_create_rejects_bad_layout() {
    let (probe, objects) = setup();
    let mut buffer = ConstantBuffer::new(Misdeclared { values: [0.0; 4] });
    assert!(matches!(buffer.create(objects.device.as_ref()), Err(Error::LayoutMismatch { .. })));
    assert!(!buffer.is_created());
    assert_eq!(probe.live_object_count(), 0);
}

// ============================================================================
// GpuMatrix
// ============================================================================

#[test]
fn test_gpu_matrix_is_transposed() {
    let matrix = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
    let gpu = GpuMatrix::from_mat4(matrix);

    // Translation lands in the last column of each register
    assert_eq!(gpu.registers()[0], [1.0, 0.0, 0.0, 1.0]);
    assert_eq!(gpu.registers()[1], [0.0, 1.0, 0.0, 2.0]);
    assert_eq!(gpu.registers()[2], [0.0, 0.0, 1.0, 3.0]);
    assert_eq!(gpu.registers()[3], [0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_gpu_matrix_identity_and_default() {
    assert_eq!(GpuMatrix::default(), GpuMatrix::IDENTITY);
    assert_eq!(GpuMatrix::from(Mat4::IDENTITY), GpuMatrix::IDENTITY);
}

#[test]
fn test_gpu_matrix_matches_row_major_source() {
    let matrix = Mat4::from_cols_array(&[
        1.0, 2.0, 3.0, 4.0,
        5.0, 6.0, 7.0, 8.0,
        9.0, 10.0, 11.0, 12.0,
        13.0, 14.0, 15.0, 16.0,
    ]);
    let gpu = GpuMatrix::from_mat4(matrix);
    assert_eq!(gpu.registers()[0], [1.0, 5.0, 9.0, 13.0]);
    assert_eq!(gpu.registers()[3], [4.0, 8.0, 12.0, 16.0]);
}

// ============================================================================
// ConstantBuffer
// ============================================================================

#[test]
fn test_create_uploads_shadow_value() {
    let (probe, objects) = setup();
    let value = Params { values: [1.0, 2.0, 3.0, 4.0] };
    let mut buffer = ConstantBuffer::new(value);
    buffer.create(objects.device.as_ref()).unwrap();

    let handle = buffer.handle().unwrap();
    assert_eq!(probe.buffer_contents(handle).unwrap(), bytemuck::bytes_of(&value).to_vec());
}

#[test]
fn test_value_mut_applies_on_apply_changes() {
    let (probe, objects) = setup();
    let mut buffer = ConstantBuffer::<Params>::default();
    buffer.create(objects.device.as_ref()).unwrap();
    let handle = buffer.handle().unwrap();

    buffer.value_mut().values[2] = 5.0;
    assert_eq!(probe.buffer_contents(handle).unwrap(), vec![0u8; 16]);

    buffer.apply_changes(objects.context.as_ref()).unwrap();
    assert_eq!(buffer.value().values, [0.0, 0.0, 5.0, 0.0]);
    assert_eq!(probe.buffer_contents(handle).unwrap(), bytemuck::bytes_of(buffer.value()).to_vec());
}

#[test]
fn test_set_value_stores_and_applies() {
    let (probe, objects) = setup();
    let mut buffer = ConstantBuffer::<Params>::default();
    buffer.create(objects.device.as_ref()).unwrap();

    let value = Params { values: [7.0; 4] };
    buffer.set_value(objects.context.as_ref(), value).unwrap();

    assert_eq!(*buffer.value(), value);
    assert_eq!(
        probe.buffer_contents(buffer.handle().unwrap()).unwrap(),
        bytemuck::bytes_of(&value).to_vec()
    );
}

#[test]
fn test_update_closure_applies() {
    let (probe, objects) = setup();
    let mut buffer = ConstantBuffer::<Params>::default();
    buffer.create(objects.device.as_ref()).unwrap();

    buffer.update(objects.context.as_ref(), |p| p.values[0] = 1.5).unwrap();
    let contents = probe.buffer_contents(buffer.handle().unwrap()).unwrap();
    assert_eq!(&contents[..4], &1.5f32.to_ne_bytes());
}

#[test]
fn test_bind_records_slot() {
    let (probe, objects) = setup();
    let mut buffer = ConstantBuffer::<Params>::default();
    buffer.create(objects.device.as_ref()).unwrap();
    probe.take_commands();

    buffer.bind(objects.context.as_ref(), ShaderStage::Vertex, 1).unwrap();
    assert_eq!(
        probe.commands(),
        vec![RecordedCommand::SetConstantBuffer {
            stage: ShaderStage::Vertex,
            slot: 1,
            buffer: buffer.handle().unwrap(),
        }]
    );
}

#[test]
fn test_uncreated_buffer_errors() {
    let (_probe, objects) = setup();
    let mut buffer = ConstantBuffer::<Params>::default();
    assert!(matches!(buffer.apply_changes(objects.context.as_ref()), Err(Error::NullPointer(_))));
    assert!(matches!(
        buffer.bind(objects.context.as_ref(), ShaderStage::Pixel, 0),
        Err(Error::NullPointer(_))
    ));
}

#[test]
fn test_release_is_idempotent() {
    let (probe, objects) = setup();
    let mut buffer = ConstantBuffer::<Params>::default();

    // Never created
    buffer.release(objects.device.as_ref());

    buffer.create(objects.device.as_ref()).unwrap();
    buffer.release(objects.device.as_ref());
    buffer.release(objects.device.as_ref());
    assert!(!buffer.is_created());
    assert_eq!(probe.live_object_count(), 0);
}

#[test]
fn test_recreate_releases_previous_buffer() {
    let (probe, objects) = setup();
    let mut buffer = ConstantBuffer::<Params>::default();
    buffer.create(objects.device.as_ref()).unwrap();
    let first = buffer.handle().unwrap();

    buffer.create(objects.device.as_ref()).unwrap();
    assert!(!objects.device.is_alive(first.into()));
    assert_eq!(probe.live_object_count(), 1);
}
