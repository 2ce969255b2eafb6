/// Device resources module - device, swap chain and window-size dependent targets

pub mod display;
pub mod device_resources;

pub use display::*;
pub use device_resources::{DeviceNotify, DeviceResources, DeviceResourcesDesc, BACK_BUFFER_FORMAT};
