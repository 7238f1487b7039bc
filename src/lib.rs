//! jetcam: USB and CSI cameras on embedded Linux as a uniform camera object.
//!
//! ```no_run
//! # #[cfg(feature = "opencv")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use jetcam::camera::{Camera, UsbCamera};
//! use jetcam::config::Config;
//!
//! let settings = Config::load(None)?.camera_settings();
//! let mut camera = UsbCamera::open(settings)?;
//! let frame = camera.read()?;
//! println!("{:?}", frame.shape());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "opencv"))]
//! # fn main() {}
//! ```

pub mod camera;
pub mod config;
