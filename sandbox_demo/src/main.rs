//! Sandbox demo host
//!
//! Runs a demo scene on the headless backend for a fixed time, drives the
//! pointer like a user dragging across the window and optionally pulls the
//! device away halfway through.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p sandbox_demo -- --scene lit_cube --seconds 3 --lose-device
//! ```
//!
//! # Command line
//!
//! - `--config <path>`: configuration file (default `sandbox_demo/sandbox.toml`)
//! - `--scene <colored_cube|lit_cube>`: override the configured scene
//! - `--seconds <value>`: run time (default 2)
//! - `--lose-device`: simulate a device removal halfway through

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use sandbox_engine::config::SceneKind;
use sandbox_engine::graphics_device::{HeadlessBackend, HeadlessProbe};
use sandbox_engine::sandbox::{Engine, Error, RenderLoop, Result, SandboxApp, SandboxConfig};
use sandbox_engine::{engine_error, engine_info, engine_warn};

const SOURCE: &str = "sandbox::Demo";

/// Pointer update period while simulating a drag
const POINTER_STEP: Duration = Duration::from_millis(50);

struct DemoArgs {
    config_path: PathBuf,
    scene: Option<SceneKind>,
    run_time: Duration,
    lose_device: bool,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/sandbox.toml")),
            scene: None,
            run_time: Duration::from_secs(2),
            lose_device: false,
        }
    }
}

impl DemoArgs {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Self> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => parsed.config_path = PathBuf::from(Self::value(&mut args, &arg)?),
                "--scene" => {
                    parsed.scene = Some(match Self::value(&mut args, &arg)?.as_str() {
                        "colored_cube" => SceneKind::ColoredCube,
                        "lit_cube" => SceneKind::LitCube,
                        other => return Err(Error::Config(format!("unknown scene '{}'", other))),
                    })
                }
                "--seconds" => {
                    let value = Self::value(&mut args, &arg)?;
                    let seconds: f64 = value
                        .parse()
                        .map_err(|_| Error::Config(format!("invalid --seconds '{}'", value)))?;
                    parsed.run_time = Duration::try_from_secs_f64(seconds)
                        .ok()
                        .filter(|run_time| !run_time.is_zero())
                        .ok_or_else(|| {
                            Error::Config(format!("--seconds must be a positive, finite value, got '{}'", value))
                        })?;
                }
                "--lose-device" => parsed.lose_device = true,
                other => return Err(Error::Config(format!("unknown argument '{}'", other))),
            }
        }
        Ok(parsed)
    }

    fn value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String> {
        args.next()
            .ok_or_else(|| Error::Config(format!("{} expects a value", flag)))
    }
}

fn load_config(args: &DemoArgs) -> Result<SandboxConfig> {
    let mut config = SandboxConfig::from_file_or_default(&args.config_path)?;
    if let Some(kind) = args.scene {
        config.scene.kind = kind;
    }

    // Relative asset roots are relative to the configuration file
    if config.assets.root.is_relative() {
        if let Some(dir) = args.config_path.parent() {
            config.assets.root = dir.join(&config.assets.root);
        }
    }
    config.validate()?;
    Ok(config)
}

fn run(args: DemoArgs) -> Result<()> {
    let config = load_config(&args)?;
    Engine::configure_logging(&config.logging);

    let backend = HeadlessBackend::with_frame_interval(Duration::from_millis(
        config.graphics.headless_frame_interval_ms,
    ));
    let probe = backend.probe();
    let app = SandboxApp::new(Box::new(backend), &config)?;
    let input = app.input();
    let width = config.window.width;
    let height = config.window.height;

    let mut render_loop = RenderLoop::new(Arc::new(Mutex::new(app)));
    render_loop.start()?;

    let started = Instant::now();
    let mut device_lost = false;
    input.pointer_pressed(0.0, height / 2.0);

    while started.elapsed() < args.run_time && render_loop.is_running() {
        let progress = started.elapsed().as_secs_f32() / args.run_time.as_secs_f32();
        input.pointer_moved(progress * width, height / 2.0);

        if args.lose_device && !device_lost && progress >= 0.5 {
            engine_warn!(SOURCE, "Simulating device removal");
            probe.lose_device("removed by demo");
            device_lost = true;
        }
        std::thread::sleep(POINTER_STEP);
    }
    input.pointer_released(width, height / 2.0);

    render_loop.stop()?;
    report(&render_loop, &probe, started.elapsed());
    Ok(())
}

fn report(render_loop: &RenderLoop, probe: &HeadlessProbe, elapsed: Duration) {
    let app = render_loop
        .app()
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    let main = app.main();
    let timer = main.timer();

    engine_info!(
        SOURCE,
        "Scene {}: {} frames rendered, {} presented in {:.2}s ({} fps, {:.1} average)",
        main.scene().name(),
        main.frames_rendered(),
        probe.present_count(),
        elapsed.as_secs_f64(),
        timer.frames_per_second(),
        main.frames_rendered() as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    engine_info!(
        SOURCE,
        "Devices created: {}, state at exit: {:?}",
        probe.device_creation_count(),
        main.scene_state()
    );
}

fn main() -> ExitCode {
    let result = DemoArgs::parse(std::env::args().skip(1)).and_then(run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            engine_error!(SOURCE, "Demo failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
