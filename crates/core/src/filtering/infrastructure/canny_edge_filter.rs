use opencv::core::Mat;
use opencv::imgproc;

use crate::filtering::domain::edge_filter::EdgeFilter;
use crate::shared::constants::{CANNY_HIGH_THRESHOLD, CANNY_LOW_THRESHOLD};
use crate::shared::frame::Frame;
use crate::shared::mat_convert;

/// Canny edge detection over the luminance image.
pub struct CannyEdgeFilter {
    low: f64,
    high: f64,
}

impl CannyEdgeFilter {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

impl Default for CannyEdgeFilter {
    fn default() -> Self {
        Self::new(CANNY_LOW_THRESHOLD, CANNY_HIGH_THRESHOLD)
    }
}

impl EdgeFilter for CannyEdgeFilter {
    fn apply(&self, frame: &Frame) -> Result<Frame, Box<dyn std::error::Error>> {
        let bgr = mat_convert::mat_from_frame(frame)?;
        let mut gray = Mat::default();
        imgproc::cvt_color_def(&bgr, &mut gray, imgproc::COLOR_BGR2GRAY)?;
        let mut edges = Mat::default();
        imgproc::canny(&gray, &mut edges, self.low, self.high, 3, false)?;
        Ok(mat_convert::frame_from_mat(&edges, frame.tick())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half_and_half_frame(width: u32, height: u32) -> Frame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..height {
            for x in 0..width {
                let v = if x < width / 2 { 0 } else { 255 };
                data.extend_from_slice(&[v, v, v]);
            }
        }
        Frame::new(data, width, height, 3, 0)
    }

    #[test]
    fn test_output_is_single_channel_with_same_dimensions() {
        let frame = half_and_half_frame(16, 16);
        let out = CannyEdgeFilter::default().apply(&frame).unwrap();
        assert_eq!(out.channels(), 1);
        assert_eq!(out.width(), 16);
        assert_eq!(out.height(), 16);
    }

    #[test]
    fn test_sharp_boundary_produces_edges() {
        let frame = half_and_half_frame(16, 16);
        let out = CannyEdgeFilter::default().apply(&frame).unwrap();
        assert!(out.data().iter().any(|&v| v != 0));
    }

    #[test]
    fn test_flat_frame_has_no_edges() {
        let frame = Frame::new(vec![90u8; 16 * 16 * 3], 16, 16, 3, 0);
        let out = CannyEdgeFilter::default().apply(&frame).unwrap();
        assert!(out.data().iter().all(|&v| v == 0));
    }
}
