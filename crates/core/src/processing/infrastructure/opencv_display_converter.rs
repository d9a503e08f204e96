use opencv::core::Mat;
use opencv::imgproc;

use crate::processing::domain::display_converter::DisplayConverter;
use crate::shared::frame::Frame;
use crate::shared::mat_convert;

/// OpenCV-backed display conversion: gray frames expand to three equal
/// channels, BGR frames are reordered to RGB.
pub struct OpenCvDisplayConverter;

impl OpenCvDisplayConverter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OpenCvDisplayConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayConverter for OpenCvDisplayConverter {
    fn to_display(&self, frame: &Frame) -> Result<Frame, Box<dyn std::error::Error>> {
        let src = mat_convert::mat_from_frame(frame)?;
        let mut rgb = Mat::default();
        match frame.channels() {
            1 => imgproc::cvt_color_def(&src, &mut rgb, imgproc::COLOR_GRAY2RGB)?,
            3 => imgproc::cvt_color_def(&src, &mut rgb, imgproc::COLOR_BGR2RGB)?,
            other => return Err(format!("cannot display a {other}-channel frame").into()),
        }
        Ok(mat_convert::frame_from_mat(&rgb, frame.tick())?)
    }
}
