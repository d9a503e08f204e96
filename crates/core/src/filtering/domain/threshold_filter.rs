use crate::shared::frame::Frame;

/// Binarizes a frame's luminance against a cutoff value.
pub trait ThresholdFilter: Send {
    /// Pixels with luminance at or above `threshold` map to full intensity,
    /// the rest to zero. The result is re-expanded to three equal channels.
    fn apply(&self, frame: &Frame, threshold: u8) -> Result<Frame, Box<dyn std::error::Error>>;
}
