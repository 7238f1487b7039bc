//! Camera access for USB and CSI cameras.
//!
//! This module provides:
//! - A uniform camera surface via [`Camera`] and [`UsbCamera`]
//! - Continuous capture on a background thread via [`FrameStream`]
//! - GStreamer pipeline strings in [`pipeline`]
//! - Device enumeration via [`list_devices`]
//!
//! The capture library sits behind [`CaptureBackend`]; enable the `opencv`
//! feature for the OpenCV implementation and `discovery` for device listing.

mod backend;
mod capture_loop;
mod device;
mod frame_utils;
#[cfg(feature = "opencv")]
mod opencv_backend;
pub mod pipeline;
mod types;
mod usb;

pub use backend::{BackendError, CaptureBackend, CaptureHandle, CaptureProperty};
pub use capture_loop::FrameStream;
pub use device::list_devices;
pub use frame_utils::resize_frame;
#[cfg(feature = "opencv")]
pub use opencv_backend::{OpenCvBackend, OpenCvHandle};
pub use types::{
    CameraError, CameraInfo, CameraSettings, CameraSource, CaptureApi, Frame, FrameFormat,
    Resolution,
};
pub use usb::{Camera, UsbCamera};
