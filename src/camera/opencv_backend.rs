//! OpenCV `VideoCapture` backend.

use opencv::core::{Mat, CV_8UC3};
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use super::backend::{BackendError, CaptureBackend, CaptureHandle, CaptureProperty};
use super::types::{CaptureApi, Frame};

impl From<opencv::Error> for BackendError {
    fn from(err: opencv::Error) -> Self {
        BackendError(err.to_string())
    }
}

/// Opens capture handles through OpenCV.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenCvBackend;

impl CaptureBackend for OpenCvBackend {
    type Handle = OpenCvHandle;

    fn open_index(&self, index: u32, api: CaptureApi) -> Result<OpenCvHandle, BackendError> {
        let index = i32::try_from(index)
            .map_err(|_| BackendError::new(format!("device index {index} out of range")))?;
        let cap = VideoCapture::new(index, api.id())?;
        Ok(OpenCvHandle { cap })
    }

    fn open_pipeline(&self, pipeline: &str, api: CaptureApi) -> Result<OpenCvHandle, BackendError> {
        let cap = VideoCapture::from_file(pipeline, api.id())?;
        Ok(OpenCvHandle { cap })
    }
}

/// An open `VideoCapture`.
pub struct OpenCvHandle {
    cap: VideoCapture,
}

fn prop_id(prop: CaptureProperty) -> i32 {
    match prop {
        CaptureProperty::FrameWidth => videoio::CAP_PROP_FRAME_WIDTH,
        CaptureProperty::FrameHeight => videoio::CAP_PROP_FRAME_HEIGHT,
        CaptureProperty::Fps => videoio::CAP_PROP_FPS,
    }
}

impl CaptureHandle for OpenCvHandle {
    fn is_opened(&self) -> Result<bool, BackendError> {
        Ok(self.cap.is_opened()?)
    }

    fn set(&mut self, prop: CaptureProperty, value: f64) -> Result<bool, BackendError> {
        Ok(self.cap.set(prop_id(prop), value)?)
    }

    fn get(&self, prop: CaptureProperty) -> Result<f64, BackendError> {
        Ok(self.cap.get(prop_id(prop))?)
    }

    fn read(&mut self) -> Result<Option<Frame>, BackendError> {
        let mut mat = Mat::default();
        if !self.cap.read(&mut mat)? || mat.empty() {
            return Ok(None);
        }
        mat_to_frame(&mat).map(Some)
    }

    fn release(&mut self) -> Result<(), BackendError> {
        Ok(self.cap.release()?)
    }
}

/// Copy an 8-bit, 3-channel `Mat` into an owned frame.
fn mat_to_frame(mat: &Mat) -> Result<Frame, BackendError> {
    if mat.typ() != CV_8UC3 {
        return Err(BackendError::new(format!(
            "unsupported frame type {}, expected CV_8UC3",
            mat.typ()
        )));
    }

    let width = u32::try_from(mat.cols()).map_err(|_| BackendError::new("negative frame width"))?;
    let height =
        u32::try_from(mat.rows()).map_err(|_| BackendError::new("negative frame height"))?;

    let data = if mat.is_continuous() {
        mat.data_bytes()?.to_vec()
    } else {
        mat.try_clone()?.data_bytes()?.to_vec()
    };

    Frame::from_bgr(width, height, data)
        .ok_or_else(|| BackendError::new("frame buffer size mismatch"))
}
