use crate::shared::frame::Frame;

/// Reduces a color frame to an edge map.
pub trait EdgeFilter: Send {
    /// Returns a single-channel frame with edge pixels non-zero.
    fn apply(&self, frame: &Frame) -> Result<Frame, Box<dyn std::error::Error>>;
}
