//! Error types for the Sandbox engine
//!
//! Every failure is converted into an [`Error`] at the point of detection and
//! propagated with `?`. The only recoverable variant is [`Error::DeviceLost`],
//! which the device resource container turns into a full teardown/recreate
//! cycle. Everything else is fatal and surfaces to the host.

use std::fmt;
use std::path::PathBuf;

/// Result type for Sandbox engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Sandbox engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error without a result code
    BackendError(String),

    /// A native graphics API call returned a failing result code
    ApiFailure {
        code: u32,
        context: String,
    },

    /// The graphics device was removed or reset, all GPU objects are invalid
    DeviceLost(String),

    /// A required object or pointer was missing
    NullPointer(String),

    /// A file could not be read or decoded
    FileLoad {
        path: PathBuf,
        reason: String,
    },

    /// Invalid resource (texture, buffer, shader, etc.)
    InvalidResource(String),

    /// CPU layout size does not match the size declared for the shader
    LayoutMismatch {
        layout: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Initialization failed (device, swap chain, subsystems)
    InitializationFailed(String),

    /// Invalid or unreadable configuration
    Config(String),

    /// Out of GPU memory
    OutOfMemory,
}

impl Error {
    /// True when the error is the recoverable device-lost condition
    pub fn is_device_lost(&self) -> bool {
        matches!(self, Error::DeviceLost(_))
    }

    /// Build a file-load error from any displayable cause
    pub fn file_load(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Error::FileLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::ApiFailure { code, context } => {
                write!(f, "Graphics API call failed with 0x{:08X}: {}", code, context)
            }
            Error::DeviceLost(reason) => write!(f, "Graphics device lost: {}", reason),
            Error::NullPointer(what) => write!(f, "Null pointer: {}", what),
            Error::FileLoad { path, reason } => {
                write!(f, "Failed to load '{}': {}", path.display(), reason)
            }
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::LayoutMismatch { layout, expected, actual } => write!(
                f,
                "Layout '{}' is {} bytes but the shader declares {} bytes",
                layout, actual, expected
            ),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an error message with file:line and build an [`Error::BackendError`]
///
/// # Example
///
/// ```no_run
/// # use sandbox_engine::engine_err;
/// # let name = "CubeTexture.png";
/// let err = engine_err!("sandbox::Loader", "Asset '{}' missing", name);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::sandbox::Error::BackendError(message)
    }};
}

/// Log an error message with file:line and return an [`Error::BackendError`]
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

/// Log a typed error with file:line and return it
///
/// # Example
///
/// ```no_run
/// # use sandbox_engine::engine_fail;
/// # use sandbox_engine::sandbox::{Error, Result};
/// fn present(swap_chain: Option<u32>) -> Result<u32> {
///     let Some(swap_chain) = swap_chain else {
///         engine_fail!("sandbox::DeviceResources", Error::NullPointer("swap chain".into()));
///     };
///     Ok(swap_chain)
/// }
/// # let _ = present(None);
/// ```
#[macro_export]
macro_rules! engine_fail {
    ($source:expr, $err:expr) => {{
        let error = $err;
        $crate::engine_error!($source, "{}", error);
        return Err(error);
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
