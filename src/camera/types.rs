//! Camera types and data structures.

use serde::Deserialize;
use std::fmt;

use super::backend::CaptureProperty;
use std::time::Instant;

/// Information about an available camera device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraInfo {
    /// Device index (the `N` in `/dev/videoN`)
    pub index: u32,
    /// Human-readable device name
    pub name: String,
    /// Device description (driver specific, often the node path)
    pub description: String,
}

impl fmt::Display for CameraInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.index, self.name, self.description)
    }
}

/// Frame dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// 320x240
    pub const QVGA: Resolution = Resolution {
        width: 320,
        height: 240,
    };

    /// 640x480, the default capture and output size
    pub const VGA: Resolution = Resolution {
        width: 640,
        height: 480,
    };

    /// 1280x720
    pub const HD: Resolution = Resolution {
        width: 1280,
        height: 720,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::VGA
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Capture backend preference passed to the capture library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureApi {
    /// Let the capture library pick
    #[default]
    Any,
    /// Direct Video4Linux2 access
    V4l2,
    /// Open through a GStreamer pipeline description
    GStreamer,
}

impl CaptureApi {
    /// OpenCV `VideoCaptureAPIs` identifier for this preference.
    pub const fn id(self) -> i32 {
        match self {
            CaptureApi::Any => 0,
            CaptureApi::V4l2 => 200,
            CaptureApi::GStreamer => 1800,
        }
    }
}

impl fmt::Display for CaptureApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CaptureApi::Any => "any",
            CaptureApi::V4l2 => "v4l2",
            CaptureApi::GStreamer => "gstreamer",
        };
        f.write_str(name)
    }
}

/// Which GStreamer source element feeds the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraSource {
    /// USB webcam through `v4l2src`
    #[default]
    Usb,
    /// MIPI CSI sensor through `nvarguscamerasrc`
    Csi,
}

/// Pixel format of a captured frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    /// BGR, 3 bytes per pixel
    Bgr,
}

/// A captured camera frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Row-major pixel data, `height * width * 3` bytes
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Pixel format
    pub format: FrameFormat,
    /// When the frame was read from the device
    pub timestamp: Instant,
}

impl Frame {
    /// Wrap a BGR buffer. Returns `None` if the length doesn't match the size.
    pub fn from_bgr(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != width as usize * height as usize * 3 {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
            format: FrameFormat::Bgr,
            timestamp: Instant::now(),
        })
    }

    /// Number of bytes per pixel (3 for BGR).
    pub fn bytes_per_pixel(&self) -> usize {
        match self.format {
            FrameFormat::Bgr => 3,
        }
    }

    /// Array shape as `(height, width, channels)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.bytes_per_pixel(),
        )
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }
}

/// Settings for a camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraSettings {
    /// Video device index
    pub capture_device: u32,
    /// Resolution requested from the device
    pub capture_resolution: Resolution,
    /// Frame rate requested from the device (actual may vary)
    pub capture_fps: u32,
    /// Capture backend preference
    pub capture_api_pref: CaptureApi,
    /// Source element used when opening through GStreamer
    pub source: CameraSource,
    /// Size of the frames handed to callers
    pub output: Resolution,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            capture_device: 0,
            capture_resolution: Resolution::default(),
            capture_fps: 30,
            capture_api_pref: CaptureApi::Any,
            source: CameraSource::Usb,
            output: Resolution::default(),
        }
    }
}

/// Errors that can occur during camera operations.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    /// Opening or validating the capture handle failed
    #[error("Could not initialize camera {device}: {reason}")]
    InitializationFailed { device: u32, reason: String },
    /// A frame read on an open handle failed
    #[error("Could not read image from camera: {0}")]
    ReadFailed(String),
    /// The capture handle has been released
    #[error("Camera is not open")]
    NotOpen,
    /// Reading a property from an open handle failed
    #[error("Could not get {property:?} from camera: {reason}")]
    PropertyFailed {
        property: CaptureProperty,
        reason: String,
    },
    /// Listing camera devices failed
    #[error("Could not query camera devices: {0}")]
    QueryFailed(String),
}
