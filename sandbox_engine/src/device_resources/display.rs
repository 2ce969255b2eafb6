/// Display orientation and DPI helpers

use glam::{Mat4, Vec4};
use serde::{Deserialize, Serialize};

use crate::graphics_device::DisplayRotation;

/// Device-independent pixels per inch
pub const DIPS_PER_INCH: f32 = 96.0;

/// Physical orientation of the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayOrientation {
    Landscape,
    Portrait,
    LandscapeFlipped,
    PortraitFlipped,
}

/// Rotation to pre-apply to rendered content so it appears upright
///
/// # Arguments
///
/// * `native` - Orientation the panel was built for
/// * `current` - Orientation the display is held in
pub fn compute_display_rotation(
    native: DisplayOrientation,
    current: DisplayOrientation,
) -> DisplayRotation {
    use DisplayOrientation::*;

    match (native, current) {
        (Landscape | LandscapeFlipped, Landscape) => DisplayRotation::Identity,
        (Landscape | LandscapeFlipped, Portrait) => DisplayRotation::Rotate270,
        (Landscape | LandscapeFlipped, LandscapeFlipped) => DisplayRotation::Rotate180,
        (Landscape | LandscapeFlipped, PortraitFlipped) => DisplayRotation::Rotate90,

        (Portrait | PortraitFlipped, Landscape) => DisplayRotation::Rotate90,
        (Portrait | PortraitFlipped, Portrait) => DisplayRotation::Identity,
        (Portrait | PortraitFlipped, LandscapeFlipped) => DisplayRotation::Rotate270,
        (Portrait | PortraitFlipped, PortraitFlipped) => DisplayRotation::Rotate180,
    }
}

// Rotations about Z, exact so composed projections stay bit-stable
const ROTATION_0: Mat4 = Mat4::IDENTITY;

const ROTATION_90: Mat4 = Mat4::from_cols(
    Vec4::new(0.0, 1.0, 0.0, 0.0),
    Vec4::new(-1.0, 0.0, 0.0, 0.0),
    Vec4::new(0.0, 0.0, 1.0, 0.0),
    Vec4::new(0.0, 0.0, 0.0, 1.0),
);

const ROTATION_180: Mat4 = Mat4::from_cols(
    Vec4::new(-1.0, 0.0, 0.0, 0.0),
    Vec4::new(0.0, -1.0, 0.0, 0.0),
    Vec4::new(0.0, 0.0, 1.0, 0.0),
    Vec4::new(0.0, 0.0, 0.0, 1.0),
);

const ROTATION_270: Mat4 = Mat4::from_cols(
    Vec4::new(0.0, -1.0, 0.0, 0.0),
    Vec4::new(1.0, 0.0, 0.0, 0.0),
    Vec4::new(0.0, 0.0, 1.0, 0.0),
    Vec4::new(0.0, 0.0, 0.0, 1.0),
);

/// 3D transform that maps scene content onto a rotated swap chain
pub fn orientation_transform_3d(rotation: DisplayRotation) -> Mat4 {
    match rotation {
        DisplayRotation::Identity => ROTATION_0,
        DisplayRotation::Rotate90 => ROTATION_90,
        DisplayRotation::Rotate180 => ROTATION_180,
        DisplayRotation::Rotate270 => ROTATION_270,
    }
}

/// Convert a length in device-independent pixels to physical pixels,
/// rounded to the nearest integer
pub fn convert_dips_to_pixels(dips: f32, dpi: f32) -> f32 {
    (dips * dpi / DIPS_PER_INCH + 0.5).floor()
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
