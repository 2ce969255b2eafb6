//! Integration tests for engine logging
//!
//! A capturing logger is installed globally, so every test is `#[serial]`.
//!
//! Run with: cargo test --test logging_integration_tests


use std::sync::{Arc, Mutex};

use sandbox_engine::config::{LoggingConfig, SceneKind};
use sandbox_engine::sandbox::log::{LogEntry, LogSeverity, Logger};
use sandbox_engine::sandbox::Engine;
use sandbox_engine::{engine_error, engine_info};
use serial_test::serial;
use sandbox_test_utils::*;

// ============================================================================
// CAPTURING LOGGER
// ============================================================================

struct CapturingLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl CapturingLogger {
    fn install() -> Arc<Mutex<Vec<LogEntry>>> {
        let entries = Arc::new(Mutex::new(Vec::new()));
        Engine::set_logger(Self { entries: entries.clone() });
        entries
    }
}

impl Logger for CapturingLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn messages_from(entries: &Arc<Mutex<Vec<LogEntry>>>, source: &str) -> Vec<String> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.source == source)
        .map(|e| e.message.clone())
        .collect()
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_macros_reach_custom_logger() {
    let entries = CapturingLogger::install();

    engine_info!("test::module", "Loaded {} assets", 3);
    engine_error!("test::module", "Failed to open {}", "cube.cso");

    let captured = entries.lock().unwrap().clone();
    Engine::reset_logger();

    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0].severity, LogSeverity::Info);
    assert_eq!(captured[0].message, "Loaded 3 assets");
    assert_eq!(captured[0].file, None);
    assert_eq!(captured[1].severity, LogSeverity::Error);
    assert_eq!(captured[1].message, "Failed to open cube.cso");
    assert!(captured[1].file.is_some());
    assert!(captured[1].line.is_some());
}

#[test]
#[serial]
fn test_integration_device_lost_cycle_is_logged() {
    let (mut app, probe) = create_app("logging_lost", SceneKind::ColoredCube);
    run_until_ready(&mut app);

    let entries = CapturingLogger::install();
    probe.lose_device("driver reset");
    app.update_game_loop().unwrap();
    Engine::reset_logger();

    let messages = messages_from(&entries, "sandbox::DeviceResources");
    assert!(messages.iter().any(|m| m.starts_with("Handling device lost")));
    assert_eq!(messages.last().map(String::as_str), Some("Device restored"));
}

#[test]
#[serial]
fn test_integration_scene_load_is_logged() {
    let entries = CapturingLogger::install();
    let (mut app, _probe) = create_app("logging_load", SceneKind::LitCube);
    run_until_ready(&mut app);
    Engine::reset_logger();

    assert!(messages_from(&entries, "sandbox::SandboxApp")
        .iter()
        .any(|m| m == "Sandbox created on backend 'headless'"));
    assert!(messages_from(&entries, "sandbox::LitCubeRenderer")
        .iter()
        .any(|m| m.starts_with("Resources loaded (generation")));
}

#[test]
#[serial]
fn test_integration_configure_logging_replaces_logger() {
    let entries = CapturingLogger::install();
    Engine::configure_logging(&LoggingConfig { level: LogSeverity::Warn });

    engine_info!("test::module", "goes to the default logger");
    Engine::reset_logger();

    assert!(entries.lock().unwrap().is_empty());
}
