//! USB camera handle and public API.

use super::backend::{BackendError, CaptureBackend, CaptureHandle, CaptureProperty};
use super::frame_utils::resize_frame;
use super::pipeline;
use super::types::{CameraError, CameraSettings, CaptureApi, Frame, Resolution};

/// Uniform camera surface: fixed-size frames, one per `read()`.
pub trait Camera {
    /// Width of the frames returned by `read()`.
    fn width(&self) -> u32;

    /// Height of the frames returned by `read()`.
    fn height(&self) -> u32;

    /// Capture backend preference currently in effect.
    fn capture_api_pref(&self) -> CaptureApi;

    /// Read one frame. Blocks until the device delivers it.
    fn read(&mut self) -> Result<Frame, CameraError>;
}

/// A camera backed by a single capture handle.
///
/// Construction opens the device and reads one frame to make sure it is live.
/// The handle is released by [`release`](Self::release) or when the camera is
/// dropped. Changing the backend preference with
/// [`set_capture_api_pref`](Self::set_capture_api_pref) reopens the device.
pub struct UsbCamera<B: CaptureBackend> {
    backend: B,
    settings: CameraSettings,
    cap: Option<B::Handle>,
}

impl<B: CaptureBackend> std::fmt::Debug for UsbCamera<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsbCamera")
            .field("settings", &self.settings)
            .field("is_open", &self.is_open())
            .finish_non_exhaustive()
    }
}

impl<B: CaptureBackend> UsbCamera<B> {
    /// Open a camera with the specified settings.
    ///
    /// # Errors
    /// * `CameraError::InitializationFailed` - If the device can't be opened
    ///   or the first frame can't be read
    pub fn new(backend: B, settings: CameraSettings) -> Result<Self, CameraError> {
        let mut camera = Self {
            backend,
            settings,
            cap: None,
        };
        camera.init_video_capture(camera.settings.capture_api_pref)?;
        Ok(camera)
    }

    /// Get the current camera settings.
    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Whether a capture handle is currently held.
    pub fn is_open(&self) -> bool {
        self.cap.is_some()
    }

    /// Change the capture backend preference.
    ///
    /// Reopens the device if `api` differs from the current preference and
    /// returns whether that happened. The new preference is kept even when
    /// reopening fails.
    pub fn set_capture_api_pref(&mut self, api: CaptureApi) -> Result<bool, CameraError> {
        if api == self.settings.capture_api_pref {
            return Ok(false);
        }
        log::info!(
            "Capture backend for camera {} changed: {} -> {}",
            self.settings.capture_device,
            self.settings.capture_api_pref,
            api
        );
        self.settings.capture_api_pref = api;
        self.init_video_capture(api)?;
        Ok(true)
    }

    /// Change the size of subsequently read frames.
    pub fn set_output_resolution(&mut self, output: Resolution) {
        self.settings.output = output;
    }

    /// Query a property from the open handle, e.g. the negotiated frame rate.
    ///
    /// # Errors
    /// * `CameraError::NotOpen` - If the camera has been released
    /// * `CameraError::PropertyFailed` - If the backend can't report `prop`
    pub fn get_property(&self, prop: CaptureProperty) -> Result<f64, CameraError> {
        let cap = self.cap.as_ref().ok_or(CameraError::NotOpen)?;
        cap.get(prop).map_err(|e| CameraError::PropertyFailed {
            property: prop,
            reason: e.to_string(),
        })
    }

    /// Release the capture handle.
    ///
    /// Errors from the backend are logged, never returned. Calling this on a
    /// released camera does nothing.
    pub fn release(&mut self) {
        if let Some(mut cap) = self.cap.take() {
            log::debug!("Releasing camera {}", self.settings.capture_device);
            if let Err(e) = cap.release() {
                log::warn!(
                    "Could not release camera {}: {}",
                    self.settings.capture_device,
                    e
                );
            }
        }
    }

    fn init_video_capture(&mut self, api: CaptureApi) -> Result<(), CameraError> {
        self.release();

        let device = self.settings.capture_device;
        let fail = |reason: String| {
            log::error!("Could not initialize camera {}: {}", device, reason);
            CameraError::InitializationFailed { device, reason }
        };

        let mut cap = self.video_capture(api).map_err(|e| fail(e.to_string()))?;

        if let Err(reason) = validate(&mut cap) {
            if let Err(e) = cap.release() {
                log::warn!("Could not release camera {} after failed open: {}", device, e);
            }
            return Err(fail(reason));
        }

        log::info!(
            "Opened camera {} ({}, {} @ {} fps)",
            device,
            api,
            self.settings.capture_resolution,
            self.settings.capture_fps
        );
        self.cap = Some(cap);
        Ok(())
    }

    fn video_capture(&self, api: CaptureApi) -> Result<B::Handle, BackendError> {
        if api == CaptureApi::GStreamer {
            let pipeline = pipeline::for_settings(&self.settings);
            log::debug!("Opening pipeline: {}", pipeline);
            return self.backend.open_pipeline(&pipeline, api);
        }

        let mut cap = self.backend.open_index(self.settings.capture_device, api)?;
        let requested = [
            (
                CaptureProperty::FrameWidth,
                self.settings.capture_resolution.width,
            ),
            (
                CaptureProperty::FrameHeight,
                self.settings.capture_resolution.height,
            ),
            (CaptureProperty::Fps, self.settings.capture_fps),
        ];
        for (prop, value) in requested {
            match cap.set(prop, f64::from(value)) {
                Ok(true) => {}
                Ok(false) => log::debug!("Backend ignored {:?} = {}", prop, value),
                Err(e) => log::debug!("Could not set {:?} = {}: {}", prop, value, e),
            }
        }
        Ok(cap)
    }
}

/// Make sure a freshly opened handle delivers frames.
fn validate<H: CaptureHandle>(cap: &mut H) -> Result<(), String> {
    match cap.is_opened() {
        Ok(true) => {}
        Ok(false) => return Err("device not opened".to_string()),
        Err(e) => return Err(e.to_string()),
    }
    match cap.read() {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err("could not read image from camera".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

impl<B: CaptureBackend> Camera for UsbCamera<B> {
    fn width(&self) -> u32 {
        self.settings.output.width
    }

    fn height(&self) -> u32 {
        self.settings.output.height
    }

    fn capture_api_pref(&self) -> CaptureApi {
        self.settings.capture_api_pref
    }

    fn read(&mut self) -> Result<Frame, CameraError> {
        let cap = self.cap.as_mut().ok_or(CameraError::NotOpen)?;
        let frame = match cap.read() {
            Ok(Some(frame)) => frame,
            Ok(None) => return Err(CameraError::ReadFailed("no frame delivered".to_string())),
            Err(e) => return Err(CameraError::ReadFailed(e.to_string())),
        };
        resize_frame(&frame, self.settings.output).ok_or_else(|| {
            CameraError::ReadFailed(format!(
                "cannot resize {} frame to {}",
                frame.resolution(),
                self.settings.output
            ))
        })
    }
}

impl<B: CaptureBackend> Drop for UsbCamera<B> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(feature = "opencv")]
impl UsbCamera<super::opencv_backend::OpenCvBackend> {
    /// Open a camera through OpenCV.
    pub fn open(settings: CameraSettings) -> Result<Self, CameraError> {
        Self::new(super::opencv_backend::OpenCvBackend, settings)
    }
}
