use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};
use thiserror::Error;

use crate::shared::frame::Frame;
use crate::shared::mat_convert;
use crate::video::domain::frame_source::FrameSource;

#[derive(Error, Debug)]
pub enum CameraError {
    #[error("camera {0} could not be opened")]
    DeviceUnavailable(i32),
    #[error(transparent)]
    Backend(#[from] opencv::Error),
}

/// Captures frames from a local camera through OpenCV's videoio backend.
///
/// Frames come out in the device's native BGR channel order.
pub struct OpenCvCamera {
    device_id: i32,
    capture: Option<VideoCapture>,
    next_tick: usize,
}

impl OpenCvCamera {
    pub fn new(device_id: i32) -> Self {
        Self {
            device_id,
            capture: None,
            next_tick: 0,
        }
    }
}

impl FrameSource for OpenCvCamera {
    fn open(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let capture =
            VideoCapture::new(self.device_id, videoio::CAP_ANY).map_err(CameraError::Backend)?;
        if !capture.is_opened().map_err(CameraError::Backend)? {
            return Err(CameraError::DeviceUnavailable(self.device_id).into());
        }
        log::info!("camera {} opened", self.device_id);
        self.capture = Some(capture);
        Ok(())
    }

    fn read_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let Some(capture) = self.capture.as_mut() else {
            return Ok(None);
        };
        let mut mat = Mat::default();
        let grabbed = capture.read(&mut mat).map_err(CameraError::Backend)?;
        if !grabbed || mat.empty() {
            return Ok(None);
        }
        let frame =
            mat_convert::frame_from_mat(&mat, self.next_tick).map_err(CameraError::Backend)?;
        self.next_tick += 1;
        Ok(Some(frame))
    }

    fn release(&mut self) {
        if let Some(mut capture) = self.capture.take() {
            match capture.release() {
                Ok(()) => log::info!("camera {} released", self.device_id),
                Err(e) => log::warn!("camera {} release failed: {e}", self.device_id),
            }
        }
    }
}
