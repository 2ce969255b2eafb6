/// Asynchronous asset loading
///
/// Every load runs on its own background thread and delivers exactly one
/// result through a channel. The render thread polls with
/// [`LoadTask::try_take`] and never blocks. Dropping a task drops its
/// receiver, so a load that finishes after its owner went away is discarded.

use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{bounded, Receiver, TryRecvError};
use rustc_hash::FxHashMap;

use crate::config::AssetsConfig;
use crate::error::{Error, Result};
use crate::graphics_device::{Format, TextureDesc};
use crate::resource::BinaryBlob;
use crate::{engine_debug, engine_error};

const SOURCE: &str = "sandbox::ResourceLoader";

// ===== DECODED IMAGE =====

/// Image decoded to tightly packed RGBA8 rows
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Decode any format the `image` crate recognizes
    pub fn from_memory(bytes: &[u8]) -> std::result::Result<Self, image::ImageError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self { width, height, pixels: rgba.into_raw() })
    }

    /// Sampled texture descriptor matching the pixel data
    pub fn texture_desc(&self) -> TextureDesc {
        TextureDesc::sampled(self.width, self.height, Format::R8G8B8A8_UNORM)
    }
}

// ===== LOAD TASK =====

/// Handle to one in-flight load
pub struct LoadTask<T> {
    name: String,
    receiver: Receiver<Result<T>>,
    taken: bool,
}

impl<T: Send + 'static> LoadTask<T> {
    /// Run `load` on a background thread
    pub fn spawn<F>(name: impl Into<String>, load: F) -> Self
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let name = name.into();
        let (sender, receiver) = bounded(1);
        let thread_sender = sender.clone();

        let spawned = thread::Builder::new()
            .name(format!("sandbox-load-{}", name))
            .spawn(move || {
                // Receiver gone: the owner no longer wants the result
                let _ = thread_sender.send(load());
            });

        if let Err(e) = spawned {
            let _ = sender.send(Err(Error::BackendError(format!(
                "failed to spawn load thread for '{}': {}",
                name, e
            ))));
        }

        Self { name, receiver, taken: false }
    }

    /// Task that is already complete
    pub fn ready(name: impl Into<String>, result: Result<T>) -> Self {
        let (sender, receiver) = bounded(1);
        let _ = sender.send(result);
        Self { name: name.into(), receiver, taken: false }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Take the result if the load has finished
    ///
    /// Returns `None` while the load is running and after the result was
    /// taken once.
    pub fn try_take(&mut self) -> Option<Result<T>> {
        if self.taken {
            return None;
        }
        match self.receiver.try_recv() {
            Ok(result) => {
                self.taken = true;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.taken = true;
                Some(Err(Error::BackendError(format!(
                    "load '{}' ended without a result",
                    self.name
                ))))
            }
        }
    }

    /// Block until the load finishes
    pub fn wait(mut self) -> Result<T> {
        if self.taken {
            return Err(Error::InvalidResource(format!(
                "load '{}' result already taken",
                self.name
            )));
        }
        self.taken = true;
        self.receiver.recv().unwrap_or_else(|_| {
            Err(Error::BackendError(format!("load '{}' ended without a result", self.name)))
        })
    }
}

// ===== LOAD BATCH =====

/// A named group of loads that completes when every member has
pub struct LoadBatch<T> {
    pending: FxHashMap<String, LoadTask<T>>,
    completed: FxHashMap<String, T>,
}

impl<T: Send + 'static> LoadBatch<T> {
    pub fn new() -> Self {
        Self {
            pending: FxHashMap::default(),
            completed: FxHashMap::default(),
        }
    }

    /// Add a task under `key`, replacing any task or result with that key
    pub fn insert(&mut self, key: impl Into<String>, task: LoadTask<T>) {
        let key = key.into();
        self.completed.remove(&key);
        self.pending.insert(key, task);
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    /// Collect finished tasks without blocking
    ///
    /// # Returns
    ///
    /// `true` once every task has delivered its result
    ///
    /// # Errors
    ///
    /// The first failed load; the failing task is removed from the batch
    pub fn poll(&mut self) -> Result<bool> {
        let mut finished = Vec::new();
        for (key, task) in self.pending.iter_mut() {
            if let Some(result) = task.try_take() {
                finished.push((key.clone(), result));
            }
        }

        let mut first_error = None;
        for (key, result) in finished {
            self.pending.remove(&key);
            match result {
                Ok(value) => {
                    self.completed.insert(key, value);
                }
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(self.pending.is_empty()),
        }
    }

    /// Remove a completed result
    pub fn take(&mut self, key: &str) -> Option<T> {
        self.completed.remove(key)
    }
}

impl<T: Send + 'static> Default for LoadBatch<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ===== RESOURCE LOADER =====

/// Loads named assets relative to a fixed root directory
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    root: PathBuf,
}

impl ResourceLoader {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &AssetsConfig) -> Self {
        Self::new(config.root.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of asset `name`
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Read asset `name` on the calling thread
    ///
    /// # Errors
    ///
    /// `FileLoad` when the file is missing or unreadable
    pub fn read_data(&self, name: &str) -> Result<BinaryBlob> {
        read_blob(&self.resolve(name))
    }

    /// Read asset `name` on a background thread
    pub fn read_data_async(&self, name: &str) -> LoadTask<BinaryBlob> {
        let path = self.resolve(name);
        engine_debug!(SOURCE, "Reading '{}'", path.display());
        LoadTask::spawn(name, move || read_blob(&path))
    }

    /// Decode texture `name` on the calling thread
    ///
    /// # Errors
    ///
    /// `FileLoad` when the file is missing or not a decodable image
    pub fn load_texture(&self, name: &str) -> Result<DecodedImage> {
        decode_image(&self.resolve(name))
    }

    /// Decode texture `name` on a background thread
    pub fn load_texture_async(&self, name: &str) -> LoadTask<DecodedImage> {
        let path = self.resolve(name);
        engine_debug!(SOURCE, "Decoding '{}'", path.display());
        LoadTask::spawn(name, move || decode_image(&path))
    }
}

fn read_blob(path: &Path) -> Result<BinaryBlob> {
    let blob = BinaryBlob::load_from_file(path);
    if let Err(e) = &blob {
        engine_error!(SOURCE, "{}", e);
    }
    blob
}

fn decode_image(path: &Path) -> Result<DecodedImage> {
    let bytes = read_blob(path)?;
    DecodedImage::from_memory(bytes.as_slice()).map_err(|e| {
        let error = Error::file_load(path, e);
        engine_error!(SOURCE, "{}", error);
        error
    })
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
