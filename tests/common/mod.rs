//! In-memory capture backend for tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use jetcam::camera::{
    BackendError, CaptureApi, CaptureBackend, CaptureHandle, CaptureProperty, Frame,
};

/// How a fake device behaves.
#[derive(Debug, Clone)]
pub struct FakeDevice {
    /// Native frame size, whatever was requested
    pub native: (u32, u32),
    /// Whether opening succeeds at all
    pub present: bool,
    /// `is_opened()` result after a successful open
    pub opens: bool,
    /// Frames delivered before reads start returning nothing
    pub frames: Option<usize>,
    /// Make `release()` return an error
    pub release_fails: bool,
    /// Make `get()` return an error
    pub get_fails: bool,
}

impl Default for FakeDevice {
    fn default() -> Self {
        Self {
            native: (1280, 720),
            present: true,
            opens: true,
            frames: None,
            release_fails: false,
            get_fails: false,
        }
    }
}

/// One call made on the backend, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    OpenIndex(u32, CaptureApi),
    OpenPipeline(String, CaptureApi),
    Set(CaptureProperty, f64),
    Read,
    Release,
}

/// Everything the camera asked the backend to do.
#[derive(Debug, Default)]
pub struct Log {
    pub events: Vec<Event>,
}

impl Log {
    pub fn opened_index(&self) -> Vec<(u32, CaptureApi)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::OpenIndex(index, api) => Some((*index, *api)),
                _ => None,
            })
            .collect()
    }

    pub fn opened_pipeline(&self) -> Vec<(String, CaptureApi)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::OpenPipeline(pipeline, api) => Some((pipeline.clone(), *api)),
                _ => None,
            })
            .collect()
    }

    pub fn set(&self) -> Vec<(CaptureProperty, f64)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Set(prop, value) => Some((*prop, *value)),
                _ => None,
            })
            .collect()
    }

    pub fn reads(&self) -> usize {
        self.events.iter().filter(|e| **e == Event::Read).count()
    }

    pub fn released(&self) -> usize {
        self.events.iter().filter(|e| **e == Event::Release).count()
    }

    pub fn opens(&self) -> usize {
        self.opened_index().len() + self.opened_pipeline().len()
    }

    /// Events with `Set` calls left out, open calls reduced to `"open"`.
    pub fn lifecycle(&self) -> Vec<&'static str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::OpenIndex(..) | Event::OpenPipeline(..) => Some("open"),
                Event::Read => Some("read"),
                Event::Release => Some("release"),
                Event::Set(..) => None,
            })
            .collect()
    }

    fn push(&mut self, event: Event) {
        self.events.push(event);
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    pub device: Arc<Mutex<FakeDevice>>,
    pub log: Arc<Mutex<Log>>,
}

impl FakeBackend {
    pub fn new(device: FakeDevice) -> Self {
        Self {
            device: Arc::new(Mutex::new(device)),
            log: Arc::default(),
        }
    }

    pub fn log(&self) -> std::sync::MutexGuard<'_, Log> {
        self.log.lock().unwrap()
    }

    fn handle(&self) -> Result<FakeHandle, BackendError> {
        let device = self.device.lock().unwrap().clone();
        if !device.present {
            return Err(BackendError::new("no such device"));
        }
        Ok(FakeHandle {
            remaining: device.frames,
            device,
            log: Arc::clone(&self.log),
            released: false,
        })
    }
}

impl CaptureBackend for FakeBackend {
    type Handle = FakeHandle;

    fn open_index(&self, index: u32, api: CaptureApi) -> Result<FakeHandle, BackendError> {
        self.log.lock().unwrap().push(Event::OpenIndex(index, api));
        self.handle()
    }

    fn open_pipeline(&self, pipeline: &str, api: CaptureApi) -> Result<FakeHandle, BackendError> {
        self.log
            .lock()
            .unwrap()
            .push(Event::OpenPipeline(pipeline.to_string(), api));
        self.handle()
    }
}

pub struct FakeHandle {
    device: FakeDevice,
    remaining: Option<usize>,
    log: Arc<Mutex<Log>>,
    released: bool,
}

impl CaptureHandle for FakeHandle {
    fn is_opened(&self) -> Result<bool, BackendError> {
        Ok(self.device.opens && !self.released)
    }

    fn set(&mut self, prop: CaptureProperty, value: f64) -> Result<bool, BackendError> {
        self.log.lock().unwrap().push(Event::Set(prop, value));
        // Like most UVC cameras: accept the call, keep the native mode.
        Ok(prop == CaptureProperty::Fps)
    }

    fn get(&self, prop: CaptureProperty) -> Result<f64, BackendError> {
        if self.device.get_fails {
            return Err(BackendError::new("property not supported"));
        }
        Ok(match prop {
            CaptureProperty::FrameWidth => f64::from(self.device.native.0),
            CaptureProperty::FrameHeight => f64::from(self.device.native.1),
            CaptureProperty::Fps => 30.0,
        })
    }

    fn read(&mut self) -> Result<Option<Frame>, BackendError> {
        self.log.lock().unwrap().push(Event::Read);
        if self.released {
            return Err(BackendError::new("read on released handle"));
        }
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return Ok(None);
            }
            *remaining -= 1;
        }
        let (width, height) = self.device.native;
        let data = vec![128; width as usize * height as usize * 3];
        Ok(Frame::from_bgr(width, height, data))
    }

    fn release(&mut self) -> Result<(), BackendError> {
        self.log.lock().unwrap().push(Event::Release);
        self.released = true;
        if self.device.release_fails {
            return Err(BackendError::new("device busy"));
        }
        Ok(())
    }
}
