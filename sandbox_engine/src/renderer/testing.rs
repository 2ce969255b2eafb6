//! Shared fixtures for renderer unit tests

use std::path::PathBuf;
use std::time::Duration;

use crate::device_resources::{DeviceResources, DeviceResourcesDesc};
use crate::graphics_device::{HeadlessBackend, HeadlessProbe};
use crate::renderer::{colored_cube, lit_cube, DemoRenderer};
use crate::resource::{RendererState, ResourceLoader};

/// Placeholder shader bytecode
pub(crate) const SHADER_BYTES: [u8; 8] = [0x44, 0x58, 0x42, 0x43, 0x01, 0x02, 0x03, 0x04];

/// Asset directory holding every shader and texture the demos load
pub(crate) fn asset_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sandbox_renderer_{}", test));
    std::fs::create_dir_all(&dir).unwrap();
    for name in [
        colored_cube::VERTEX_SHADER_FILE,
        colored_cube::PIXEL_SHADER_FILE,
        lit_cube::VERTEX_SHADER_FILE,
        lit_cube::PIXEL_SHADER_FILE,
    ] {
        std::fs::write(dir.join(name), SHADER_BYTES).unwrap();
    }
    image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 120, 40, 255]))
        .save(dir.join(lit_cube::TEXTURE_FILE))
        .unwrap();
    dir
}

pub(crate) fn loader(test: &str) -> ResourceLoader {
    ResourceLoader::new(asset_dir(test))
}

pub(crate) fn headless_resources() -> (DeviceResources, HeadlessProbe) {
    let backend = HeadlessBackend::new();
    let probe = backend.probe();
    let resources = DeviceResources::new(Box::new(backend), DeviceResourcesDesc::default()).unwrap();
    (resources, probe)
}

/// Poll until the renderer leaves `LoadingResources`
pub(crate) fn poll_until_ready(renderer: &mut dyn DemoRenderer, resources: &DeviceResources) {
    for _ in 0..1000 {
        renderer.poll_loads(resources).unwrap();
        if renderer.state() != RendererState::LoadingResources {
            return;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    panic!("{} never finished loading", renderer.name());
}
