//! Camera device enumeration.

use super::types::{CameraError, CameraInfo};

/// List all available camera devices on the system.
///
/// Returns a vector of `CameraInfo` structs, or an error if querying fails.
/// If no cameras are found, returns an empty vector (not an error).
#[cfg(feature = "discovery")]
pub fn list_devices() -> Result<Vec<CameraInfo>, CameraError> {
    use nokhwa::query;
    use nokhwa::utils::ApiBackend;

    let devices = query(ApiBackend::Auto).map_err(|e| CameraError::QueryFailed(e.to_string()))?;
    log::debug!("Found {} camera device(s)", devices.len());

    let mut devices: Vec<CameraInfo> = devices
        .into_iter()
        .filter_map(|d| match d.index().as_index() {
            Ok(index) => Some(CameraInfo {
                index,
                name: d.human_name(),
                description: d.description().to_string(),
            }),
            Err(e) => {
                log::debug!("Skipping camera {:?} without a numeric index: {}", d.human_name(), e);
                None
            }
        })
        .collect();
    devices.sort_by_key(|d| d.index);
    Ok(devices)
}

/// Device listing needs the `discovery` feature.
#[cfg(not(feature = "discovery"))]
pub fn list_devices() -> Result<Vec<CameraInfo>, CameraError> {
    Err(CameraError::QueryFailed(
        "built without device discovery; enable feature `discovery`".into(),
    ))
}
