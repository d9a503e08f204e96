use crate::shared::frame::Frame;

/// A live source of frames, typically a camera device.
///
/// A source is exclusively owned by one capture loop; it is never shared
/// between control paths.
pub trait FrameSource: Send {
    /// Acquires the underlying device.
    fn open(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Reads the next frame. `Ok(None)` means the device produced nothing
    /// this tick; the caller retries on the next tick.
    fn read_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Releases the device handle. Safe to call repeatedly, and before
    /// `open` has ever been called.
    fn release(&mut self);
}
