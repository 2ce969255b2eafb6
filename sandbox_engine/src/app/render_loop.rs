/// Dedicated render thread driving update, render and present
///
/// The worker takes the application lock once per frame. Host callbacks take
/// the same lock, so they always run between frames.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use crate::app::SandboxApp;
use crate::error::{Error, Result};
use crate::{engine_debug, engine_error, engine_info};

const SOURCE: &str = "sandbox::RenderLoop";

pub struct RenderLoop {
    app: Arc<Mutex<SandboxApp>>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<Result<()>>>,
}

impl RenderLoop {
    pub fn new(app: Arc<Mutex<SandboxApp>>) -> Self {
        Self {
            app,
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    pub fn app(&self) -> &Arc<Mutex<SandboxApp>> {
        &self.app
    }

    /// True while the worker is looping
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Spawn the render thread; does nothing if it is already running
    ///
    /// # Errors
    ///
    /// The fatal error of a previous run that was never collected by `stop`,
    /// or `InitializationFailed` if the thread cannot be spawned.
    pub fn start(&mut self) -> Result<()> {
        if self.is_running() {
            return Ok(());
        }
        self.join_worker()?;

        self.running.store(true, Ordering::Release);
        let app = Arc::clone(&self.app);
        let running = Arc::clone(&self.running);

        let worker = thread::Builder::new()
            .name("sandbox-render".to_string())
            .spawn(move || run(app, running));

        match worker {
            Ok(handle) => {
                self.worker = Some(handle);
                engine_info!(SOURCE, "Render loop started");
                Ok(())
            }
            Err(e) => {
                self.running.store(false, Ordering::Release);
                Err(Error::InitializationFailed(format!("failed to spawn render thread: {}", e)))
            }
        }
    }

    /// Stop the render thread and wait for it to exit
    ///
    /// # Returns
    ///
    /// The fatal error that ended the loop, if any
    pub fn stop(&mut self) -> Result<()> {
        self.running.store(false, Ordering::Release);
        if self.worker.is_none() {
            return Ok(());
        }
        let result = self.join_worker();
        engine_info!(SOURCE, "Render loop stopped");
        result
    }

    fn join_worker(&mut self) -> Result<()> {
        match self.worker.take() {
            Some(worker) => worker
                .join()
                .unwrap_or_else(|_| Err(Error::BackendError("render thread panicked".to_string()))),
            None => Ok(()),
        }
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            engine_error!(SOURCE, "Render loop ended with error: {}", e);
        }
    }
}

fn run(app: Arc<Mutex<SandboxApp>>, running: Arc<AtomicBool>) -> Result<()> {
    let mut frames: u64 = 0;
    while running.load(Ordering::Acquire) {
        let result = app
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .update_game_loop();

        match result {
            Ok(true) => frames += 1,
            Ok(false) => {}
            Err(e) => {
                engine_error!(SOURCE, "Fatal error after {} frames: {}", frames, e);
                running.store(false, Ordering::Release);
                return Err(e);
            }
        }

        // Let host callbacks take the lock between frames
        thread::yield_now();
    }
    engine_debug!(SOURCE, "Worker exiting after {} frames", frames);
    Ok(())
}

#[cfg(test)]
#[path = "render_loop_tests.rs"]
mod tests;
