//! Integration tests for the device lost/restored cycle
//!
//! These tests drive a full `SandboxApp` over the headless backend and inject
//! device faults through the probe.
//!
//! Run with: cargo test --test device_lost_integration_tests


use glam::Vec2;
use sandbox_engine::config::SceneKind;
use sandbox_engine::graphics_device::RecordedCommand;
use sandbox_engine::resource::RendererState;
use sandbox_engine::sandbox::{Error, SandboxApp};
use sandbox_test_utils::*;

fn draw_count(commands: &[RecordedCommand]) -> usize {
    commands
        .iter()
        .filter(|c| matches!(c, RecordedCommand::DrawIndexed { index_count: 36, .. }))
        .count()
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_integration_colored_cube_draws_once_ready() {
    let (mut app, probe) = create_app("colored_ready", SceneKind::ColoredCube);
    app.update_game_loop().unwrap();
    assert_eq!(draw_count(&probe.take_commands()), 0);

    run_until_ready(&mut app);
    probe.take_commands();
    assert!(app.update_game_loop().unwrap());
    assert_eq!(draw_count(&probe.take_commands()), 1);
}

#[test]
fn test_integration_lit_cube_binds_texture_and_sampler() {
    let (mut app, probe) = create_app("lit_ready", SceneKind::LitCube);
    run_until_ready(&mut app);
    probe.take_commands();

    app.update_game_loop().unwrap();
    let commands = probe.take_commands();
    assert_eq!(draw_count(&commands), 1);
    assert!(commands.iter().any(|c| matches!(c, RecordedCommand::SetShaderResource { slot: 0, .. })));
    assert!(commands.iter().any(|c| matches!(c, RecordedCommand::SetSampler { slot: 0, .. })));
    assert!(commands.iter().any(|c| matches!(c, RecordedCommand::SetConstantBuffer { slot: 1, .. })));
}

#[test]
fn test_integration_missing_assets_fail_the_frame() {
    let mut config = test_config("missing_assets", SceneKind::ColoredCube);
    config.assets.root = std::env::temp_dir().join("sandbox_integration_does_not_exist");
    let mut app = SandboxApp::new(
        Box::new(sandbox_engine::graphics_device::HeadlessBackend::new()),
        &config,
    )
    .unwrap();

    let mut failure = None;
    for _ in 0..2000 {
        match app.update_game_loop() {
            Ok(_) => std::thread::sleep(std::time::Duration::from_millis(1)),
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
    }
    assert!(matches!(failure, Some(Error::FileLoad { .. })));
}

// ============================================================================
// Device lost
// ============================================================================

#[test]
fn test_integration_lost_device_recreates_everything() {
    let (mut app, probe) = create_app("lost_cycle", SceneKind::LitCube);
    run_until_ready(&mut app);
    let live_before = probe.live_object_count();

    probe.lose_device("driver reset");
    app.update_game_loop().unwrap();

    assert_eq!(probe.device_creation_count(), 2);
    assert!(!probe.is_device_lost());
    assert_eq!(app.main().scene_state(), RendererState::LoadingResources);

    run_until_ready(&mut app);
    assert_eq!(probe.live_object_count(), live_before);

    probe.take_commands();
    app.update_game_loop().unwrap();
    assert_eq!(draw_count(&probe.take_commands()), 1);
}

#[test]
fn test_integration_lost_device_during_loading() {
    let (mut app, probe) = create_app("lost_loading", SceneKind::ColoredCube);
    assert_eq!(app.main().scene_state(), RendererState::LoadingResources);

    probe.lose_device("lost before load completed");
    app.update_game_loop().unwrap();
    assert_eq!(probe.device_creation_count(), 2);

    run_until_ready(&mut app);
    assert_eq!(app.main().scene_state(), RendererState::Ready);
}

#[test]
fn test_integration_repeated_losses_do_not_leak() {
    let (mut app, probe) = create_app("lost_repeated", SceneKind::ColoredCube);
    run_until_ready(&mut app);
    let live_before = probe.live_object_count();

    for round in 0..3 {
        probe.lose_device(&format!("loss {}", round));
        app.update_game_loop().unwrap();
        run_until_ready(&mut app);
    }

    assert_eq!(probe.device_creation_count(), 4);
    assert_eq!(probe.live_object_count(), live_before);
}

#[test]
fn test_integration_failed_recreation_is_fatal() {
    let (mut app, probe) = create_app("lost_fatal", SceneKind::ColoredCube);
    run_until_ready(&mut app);

    probe.lose_device("removed");
    probe.fail_next_device_creation(Error::OutOfMemory);
    assert_eq!(app.update_game_loop(), Err(Error::OutOfMemory));
}

#[test]
fn test_integration_adapter_change_on_validate() {
    let (mut app, probe) = create_app("adapter_change", SceneKind::LitCube);
    run_until_ready(&mut app);

    probe.change_default_adapter();
    app.validate_device().unwrap();

    assert_eq!(probe.device_creation_count(), 2);
    run_until_ready(&mut app);
}

// ============================================================================
// Window events
// ============================================================================

#[test]
fn test_integration_resize_keeps_device_and_scene() {
    let (mut app, probe) = create_app("resize", SceneKind::ColoredCube);
    run_until_ready(&mut app);

    app.set_logical_size(Vec2::new(800.0, 600.0)).unwrap();
    app.set_dpi(192.0).unwrap();

    assert_eq!(probe.device_creation_count(), 1);
    assert_eq!(app.resources().output_size(), Vec2::new(1600.0, 1200.0));
    assert_eq!(app.main().scene_state(), RendererState::Ready);

    probe.take_commands();
    app.update_game_loop().unwrap();
    let commands = probe.take_commands();
    assert!(commands.contains(&RecordedCommand::SetViewport(app.resources().viewport())));
}
