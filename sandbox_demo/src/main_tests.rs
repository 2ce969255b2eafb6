//! Unit tests for the demo command line

use super::*;

fn parse(args: &[&str]) -> Result<DemoArgs> {
    DemoArgs::parse(args.iter().map(|arg| arg.to_string()))
}

// ============================================================================
// Command line
// ============================================================================

#[test]
fn test_defaults() {
    let args = parse(&[]).unwrap();
    assert_eq!(args.run_time, Duration::from_secs(2));
    assert_eq!(args.scene, None);
    assert!(!args.lose_device);
    assert!(args.config_path.ends_with("sandbox.toml"));
}

#[test]
fn test_all_flags() {
    let args = parse(&["--config", "demo.toml", "--scene", "lit_cube", "--seconds", "0.5", "--lose-device"]).unwrap();
    assert_eq!(args.config_path, PathBuf::from("demo.toml"));
    assert_eq!(args.scene, Some(SceneKind::LitCube));
    assert_eq!(args.run_time, Duration::from_millis(500));
    assert!(args.lose_device);
}

#[test]
fn test_seconds_must_be_positive_and_finite() {
    for value in ["inf", "-inf", "NaN", "0", "-1", "1e300", "soon"] {
        assert!(
            matches!(parse(&["--seconds", value]), Err(Error::Config(_))),
            "--seconds {} was accepted",
            value
        );
    }
}

#[test]
fn test_unknown_scene_and_argument() {
    assert!(matches!(parse(&["--scene", "teapot"]), Err(Error::Config(_))));
    assert!(matches!(parse(&["--fullscreen"]), Err(Error::Config(_))));
    assert!(matches!(parse(&["--config"]), Err(Error::Config(_))));
}
