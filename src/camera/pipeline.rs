//! GStreamer pipeline descriptions for `appsink` capture.

use super::types::{CameraSettings, CameraSource};

/// Pipeline for a USB camera at `/dev/video<device>`, delivering BGR frames.
pub fn usb_pipeline(device: u32, width: u32, height: u32, fps: u32) -> String {
    format!(
        "v4l2src device=/dev/video{device} ! video/x-raw, width=(int){width}, \
         height=(int){height}, framerate=(fraction){fps}/1 ! videoconvert ! \
         video/x-raw, format=(string)BGR ! appsink"
    )
}

/// Pipeline for a CSI sensor on a Jetson board.
///
/// The sensor is captured at `width`x`height` in NVMM memory and scaled by
/// `nvvidconv` to `out_width`x`out_height` before conversion to BGR.
pub fn csi_pipeline(
    sensor_id: u32,
    width: u32,
    height: u32,
    fps: u32,
    out_width: u32,
    out_height: u32,
) -> String {
    format!(
        "nvarguscamerasrc sensor-id={sensor_id} ! video/x-raw(memory:NVMM), \
         width=(int){width}, height=(int){height}, format=(string)NV12, \
         framerate=(fraction){fps}/1 ! nvvidconv ! video/x-raw, \
         width=(int){out_width}, height=(int){out_height}, format=(string)BGRx ! \
         videoconvert ! video/x-raw, format=(string)BGR ! appsink"
    )
}

/// Pipeline matching the settings' source element.
pub fn for_settings(settings: &CameraSettings) -> String {
    let capture = settings.capture_resolution;
    match settings.source {
        CameraSource::Usb => usb_pipeline(
            settings.capture_device,
            capture.width,
            capture.height,
            settings.capture_fps,
        ),
        CameraSource::Csi => csi_pipeline(
            settings.capture_device,
            capture.width,
            capture.height,
            settings.capture_fps,
            settings.output.width,
            settings.output.height,
        ),
    }
}
