use crate::shared::frame::Frame;

/// Converts a processed frame into the display sink's RGB channel order.
///
/// Single-channel frames (the edge-detection path) are expanded to three
/// equal channels; color frames are reordered from the device's BGR layout.
pub trait DisplayConverter: Send {
    fn to_display(&self, frame: &Frame) -> Result<Frame, Box<dyn std::error::Error>>;
}
