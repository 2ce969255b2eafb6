/// Swap chain trait - presentation of the back buffer

use glam::Vec2;

use crate::error::Result;
use crate::graphics_device::{Format, TextureHandle};

/// Rotation applied by the compositor to the presented image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRotation {
    Identity,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl DisplayRotation {
    /// True when width and height are exchanged on screen
    pub fn swaps_dimensions(&self) -> bool {
        matches!(self, DisplayRotation::Rotate90 | DisplayRotation::Rotate270)
    }
}

/// Descriptor for creating or resizing a swap chain
#[derive(Debug, Clone, PartialEq)]
pub struct SwapChainDesc {
    pub width: u32,
    pub height: u32,
    pub format: Format,
    pub buffer_count: u32,
}

/// Rotating set of back buffers presented to the display
pub trait SwapChain: Send {
    /// Current buffer dimensions and format
    fn desc(&self) -> &SwapChainDesc;

    /// Resize all buffers
    ///
    /// Every view of the current back buffer must be released first.
    /// A lost device is reported as `Error::DeviceLost`.
    fn resize_buffers(&mut self, buffer_count: u32, width: u32, height: u32, format: Format) -> Result<()>;

    /// Tell the compositor how the content is pre-rotated
    fn set_rotation(&mut self, rotation: DisplayRotation) -> Result<()>;

    fn rotation(&self) -> DisplayRotation;

    /// Scale the compositor applies to the presented image
    ///
    /// Hosts that zoom the surface pass the inverse of their composition
    /// scale so the content maps 1:1 to physical pixels.
    fn set_matrix_transform(&mut self, scale: Vec2) -> Result<()>;

    fn matrix_transform(&self) -> Vec2;

    /// Texture of the buffer currently being rendered
    fn back_buffer(&self) -> Result<TextureHandle>;

    /// Present the back buffer, waiting `sync_interval` vertical blanks
    ///
    /// A lost device is reported as `Error::DeviceLost`.
    fn present(&mut self, sync_interval: u32) -> Result<()>;
}
