use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Domain interface for drawing detection overlays onto a frame in place.
pub trait RegionRenderer: Send {
    fn draw(
        &self,
        frame: &mut Frame,
        regions: &[Region],
        color: [u8; 3],
    ) -> Result<(), Box<dyn std::error::Error>>;
}
