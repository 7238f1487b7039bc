//! Background capture thread.
//!
//! A [`FrameStream`] owns a camera on a worker thread that keeps reading
//! frames and publishes the most recent one.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use super::types::Frame;
use super::usb::Camera;

/// State shared between the stream handle and the capture thread.
#[derive(Default)]
struct Shared {
    latest: Mutex<Option<Frame>>,
    last_error: Mutex<Option<String>>,
    frames: AtomicU64,
    stop: AtomicBool,
}

/// Continuously reads frames from a camera on a background thread.
///
/// Call [`latest`](Self::latest) to get the newest frame and
/// [`stop`](Self::stop) to get the camera back.
pub struct FrameStream<C: Camera + Send + 'static> {
    shared: Arc<Shared>,
    capture_thread: Option<JoinHandle<C>>,
}

impl<C: Camera + Send + 'static> std::fmt::Debug for FrameStream<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameStream")
            .field("frames_captured", &self.frames_captured())
            .field("is_running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl<C: Camera + Send + 'static> FrameStream<C> {
    /// Move `camera` onto a capture thread and start reading.
    pub fn start(camera: C) -> Self {
        let shared = Arc::new(Shared::default());
        let thread_shared = Arc::clone(&shared);
        let handle = thread::spawn(move || run_capture_loop(camera, &thread_shared));

        Self {
            shared,
            capture_thread: Some(handle),
        }
    }

    /// Get the latest captured frame.
    ///
    /// Returns `None` until the first frame arrives.
    pub fn latest(&self) -> Option<Frame> {
        let buffer = self.shared.latest.lock().ok()?;
        buffer.clone()
    }

    /// Number of frames read since the stream started.
    pub fn frames_captured(&self) -> u64 {
        self.shared.frames.load(Ordering::Relaxed)
    }

    /// The read error that ended the capture loop, if any.
    pub fn last_error(&self) -> Option<String> {
        self.shared.last_error.lock().ok()?.clone()
    }

    /// Check if the capture thread is still reading.
    pub fn is_running(&self) -> bool {
        self.capture_thread
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    /// Stop the capture thread and hand back the camera.
    ///
    /// Returns `None` if the capture thread panicked.
    pub fn stop(mut self) -> Option<C> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Option<C> {
        self.shared.stop.store(true, Ordering::SeqCst);
        let handle = self.capture_thread.take()?;
        match handle.join() {
            Ok(camera) => Some(camera),
            Err(_) => {
                log::error!("Capture thread panicked");
                None
            }
        }
    }
}

impl<C: Camera + Send + 'static> Drop for FrameStream<C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Read frames until asked to stop or the camera fails.
fn run_capture_loop<C: Camera>(mut camera: C, shared: &Shared) -> C {
    log::debug!(
        "Capture loop started ({}x{})",
        camera.width(),
        camera.height()
    );

    while !shared.stop.load(Ordering::Relaxed) {
        match camera.read() {
            Ok(frame) => {
                if let Ok(mut buf) = shared.latest.lock() {
                    *buf = Some(frame);
                }
                shared.frames.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                log::error!("Capture loop stopped: {}", e);
                if let Ok(mut slot) = shared.last_error.lock() {
                    *slot = Some(e.to_string());
                }
                break;
            }
        }
    }

    log::debug!(
        "Capture loop finished after {} frames",
        shared.frames.load(Ordering::Relaxed)
    );
    camera
}
