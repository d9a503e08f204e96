use opencv::core::Mat;
use opencv::imgproc;

use crate::filtering::domain::threshold_filter::ThresholdFilter;
use crate::shared::frame::Frame;
use crate::shared::mat_convert;

/// Binary luminance threshold, re-expanded to three channels for display.
pub struct BinaryThresholdFilter;

impl BinaryThresholdFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BinaryThresholdFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl ThresholdFilter for BinaryThresholdFilter {
    fn apply(&self, frame: &Frame, threshold: u8) -> Result<Frame, Box<dyn std::error::Error>> {
        let bgr = mat_convert::mat_from_frame(frame)?;
        let mut gray = Mat::default();
        imgproc::cvt_color_def(&bgr, &mut gray, imgproc::COLOR_BGR2GRAY)?;

        // THRESH_BINARY keeps strictly-greater pixels; shift the cutoff by
        // one so `threshold` itself lands on the high side.
        let mut binary = Mat::default();
        imgproc::threshold(
            &gray,
            &mut binary,
            threshold as f64 - 1.0,
            255.0,
            imgproc::THRESH_BINARY,
        )?;

        let mut expanded = Mat::default();
        imgproc::cvt_color_def(&binary, &mut expanded, imgproc::COLOR_GRAY2BGR)?;
        Ok(mat_convert::frame_from_mat(&expanded, frame.tick())?)
    }
}
