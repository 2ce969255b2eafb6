/// Owned opaque byte buffer (compiled shaders, raw asset files)
///
/// A blob is either null or holds at least one byte. Building a blob from an
/// empty slice yields the null blob.

use std::path::Path;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryBlob {
    data: Option<Box<[u8]>>,
}

impl BinaryBlob {
    /// Null blob
    pub fn new() -> Self {
        Self { data: None }
    }

    /// Copy `bytes` into a new blob
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_vec(bytes.to_vec())
    }

    /// Take ownership of `bytes`
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        if bytes.is_empty() {
            Self::new()
        } else {
            Self { data: Some(bytes.into_boxed_slice()) }
        }
    }

    /// Read a whole file
    ///
    /// # Errors
    ///
    /// `FileLoad` when the file is missing or unreadable
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| Error::file_load(path, e))?;
        Ok(Self::from_vec(bytes))
    }

    pub fn is_null(&self) -> bool {
        self.data.is_none()
    }

    /// Size in bytes, 0 for the null blob
    pub fn size(&self) -> usize {
        self.data.as_ref().map_or(0, |data| data.len())
    }

    /// Contents, `None` for the null blob
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Contents, empty for the null blob
    pub fn as_slice(&self) -> &[u8] {
        self.data.as_deref().unwrap_or(&[])
    }

    /// Release the bytes, leaving the null blob
    pub fn clear(&mut self) {
        self.data = None;
    }
}

impl From<Vec<u8>> for BinaryBlob {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_vec(bytes)
    }
}

impl From<&[u8]> for BinaryBlob {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

#[cfg(test)]
#[path = "binary_blob_tests.rs"]
mod tests;
