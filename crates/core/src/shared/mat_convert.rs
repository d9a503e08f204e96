use opencv::core::Mat;
use opencv::prelude::*;

use crate::shared::frame::Frame;

/// Copies a frame's pixel buffer into an owned OpenCV `Mat` with the same
/// row/column/channel layout.
pub fn mat_from_frame(frame: &Frame) -> Result<Mat, opencv::Error> {
    let flat = Mat::from_slice(frame.data())?;
    let shaped = flat.reshape(frame.channels() as i32, frame.height() as i32)?;
    shaped.try_clone()
}

/// Copies a `Mat` back into a [`Frame`] stamped with the given tick.
pub fn frame_from_mat(mat: &Mat, tick: usize) -> Result<Frame, opencv::Error> {
    let owned;
    let src = if mat.is_continuous() {
        mat
    } else {
        owned = mat.try_clone()?;
        &owned
    };
    Ok(Frame::new(
        src.data_bytes()?.to_vec(),
        src.cols() as u32,
        src.rows() as u32,
        src.channels() as u8,
        tick,
    ))
}
