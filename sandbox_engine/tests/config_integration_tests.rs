//! Integration tests for configuration files
//!
//! Run with: cargo test --test config_integration_tests


use glam::Vec2;
use sandbox_engine::config::SceneKind;
use sandbox_engine::device_resources::DisplayOrientation;
use sandbox_engine::graphics_device::HeadlessBackend;
use sandbox_engine::sandbox::{Error, SandboxApp, SandboxConfig};
use sandbox_test_utils::*;

fn config_path(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("sandbox_integration_config");
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

// ============================================================================
// CONFIG FILE TESTS
// ============================================================================

#[test]
fn test_integration_saved_config_drives_app() {
    let mut config = test_config("config_saved", SceneKind::LitCube);
    config.window.width = 1024.0;
    config.window.height = 768.0;
    config.window.orientation = DisplayOrientation::Portrait;
    config.graphics.sync_interval = 0;

    let path = config_path("saved.toml");
    config.save_to_file(&path).unwrap();
    let loaded = SandboxConfig::from_file(&path).unwrap();
    assert_eq!(loaded, config);

    let backend = HeadlessBackend::new();
    let probe = backend.probe();
    let mut app = SandboxApp::new(Box::new(backend), &loaded).unwrap();
    assert_eq!(app.main().scene().name(), "LitCube");
    assert_eq!(app.resources().render_target_size(), Vec2::new(768.0, 1024.0));

    run_until_ready(&mut app);
    assert!(probe.commands().contains(
        &sandbox_engine::graphics_device::RecordedCommand::Present { sync_interval: 0 }
    ));
}

#[test]
fn test_integration_partial_file_uses_defaults() {
    let path = config_path("partial.toml");
    std::fs::write(&path, "[scene]\nkind = \"lit_cube\"\n\n[logging]\nlevel = \"warn\"\n").unwrap();

    let config = SandboxConfig::from_file(&path).unwrap();
    assert_eq!(config.scene.kind, SceneKind::LitCube);
    assert_eq!(config.window, SandboxConfig::default().window);
    assert_eq!(config.graphics.buffer_count, 2);
}

#[test]
fn test_integration_missing_file_falls_back_to_defaults() {
    let config = SandboxConfig::from_file_or_default(config_path("absent.toml")).unwrap();
    assert_eq!(config, SandboxConfig::default());
}

#[test]
fn test_integration_invalid_file_is_rejected() {
    let path = config_path("invalid.toml");
    std::fs::write(&path, "[graphics]\nbuffer_count = 0\n").unwrap();

    assert!(matches!(SandboxConfig::from_file_or_default(&path), Err(Error::Config(_))));
}
