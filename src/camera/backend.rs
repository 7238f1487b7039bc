//! Capture library seam.
//!
//! [`UsbCamera`](super::UsbCamera) talks to the capture library only through
//! these traits. The OpenCV implementation lives in `opencv_backend` behind
//! the `opencv` feature.

use super::types::{CaptureApi, Frame};

/// Error reported by a capture backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct BackendError(pub String);

impl BackendError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Numeric properties that can be requested on an open handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureProperty {
    FrameWidth,
    FrameHeight,
    Fps,
}

/// Opens capture handles.
pub trait CaptureBackend {
    type Handle: CaptureHandle;

    /// Open a device by index with the given API preference.
    fn open_index(&self, index: u32, api: CaptureApi) -> Result<Self::Handle, BackendError>;

    /// Open through a pipeline description string.
    fn open_pipeline(&self, pipeline: &str, api: CaptureApi)
        -> Result<Self::Handle, BackendError>;
}

/// An open capture handle.
pub trait CaptureHandle: Send {
    /// Whether the backend considers the handle usable.
    fn is_opened(&self) -> Result<bool, BackendError>;

    /// Request a property value. `Ok(false)` means the backend ignored it.
    fn set(&mut self, prop: CaptureProperty, value: f64) -> Result<bool, BackendError>;

    fn get(&self, prop: CaptureProperty) -> Result<f64, BackendError>;

    /// Block until the next frame. `Ok(None)` means no frame was delivered.
    fn read(&mut self) -> Result<Option<Frame>, BackendError>;

    fn release(&mut self) -> Result<(), BackendError>;
}
