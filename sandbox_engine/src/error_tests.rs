//! Unit tests for error.rs
//!
//! Tests Error variants, Display formatting and the error macros.

use crate::error::{Error, Result};
use std::path::PathBuf;

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("context creation failed".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("context creation failed"));
}

#[test]
fn test_api_failure_display_shows_hex_code() {
    let err = Error::ApiFailure {
        code: 0x887A_0005,
        context: "Present".to_string(),
    };
    assert_eq!(
        format!("{}", err),
        "Graphics API call failed with 0x887A0005: Present"
    );
}

#[test]
fn test_file_load_display() {
    let err = Error::file_load("assets/missing.cso", "not found");
    let display = format!("{}", err);
    assert!(display.contains("assets/missing.cso"));
    assert!(display.contains("not found"));
}

#[test]
fn test_layout_mismatch_display() {
    let err = Error::LayoutMismatch {
        layout: "ModelViewProjectionData",
        expected: 192,
        actual: 176,
    };
    let display = format!("{}", err);
    assert!(display.contains("ModelViewProjectionData"));
    assert!(display.contains("176"));
    assert!(display.contains("192"));
}

#[test]
fn test_out_of_memory_display() {
    assert_eq!(format!("{}", Error::OutOfMemory), "Out of GPU memory");
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

#[test]
fn test_only_device_lost_is_recoverable() {
    assert!(Error::DeviceLost("removed".to_string()).is_device_lost());
    assert!(!Error::OutOfMemory.is_device_lost());
    assert!(!Error::NullPointer("device".to_string()).is_device_lost());
    assert!(!Error::ApiFailure { code: 1, context: String::new() }.is_device_lost());
}

#[test]
fn test_file_load_helper_keeps_path() {
    match Error::file_load("a/b.png", "bad header") {
        Error::FileLoad { path, reason } => {
            assert_eq!(path, PathBuf::from("a/b.png"));
            assert_eq!(reason, "bad header");
        }
        other => panic!("unexpected variant {:?}", other),
    }
}

// ============================================================================
// TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::OutOfMemory;
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_clone_and_eq() {
    let err = Error::InvalidResource("buffer".to_string());
    assert_eq!(err.clone(), err);
}

// ============================================================================
// MACROS
// ============================================================================

fn bail_if_negative(value: i32) -> Result<i32> {
    if value < 0 {
        crate::engine_bail!("sandbox::Test", "negative value {}", value);
    }
    Ok(value)
}

fn fail_with_null() -> Result<()> {
    crate::engine_fail!("sandbox::Test", Error::NullPointer("context".to_string()));
}

#[test]
fn test_engine_bail_returns_backend_error() {
    assert_eq!(bail_if_negative(3), Ok(3));
    assert_eq!(
        bail_if_negative(-1),
        Err(Error::BackendError("negative value -1".to_string()))
    );
}

#[test]
fn test_engine_fail_returns_typed_error() {
    assert_eq!(
        fail_with_null(),
        Err(Error::NullPointer("context".to_string()))
    );
}

#[test]
fn test_engine_err_builds_value() {
    let err = crate::engine_err!("sandbox::Test", "{} + {}", 1, 2);
    assert_eq!(err, Error::BackendError("1 + 2".to_string()));
}
