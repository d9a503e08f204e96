use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Locates instances of a fixed visual pattern (faces, eyes) in a frame.
///
/// Implementations may keep mutable scan state, hence `&mut self`.
pub trait PatternDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}
