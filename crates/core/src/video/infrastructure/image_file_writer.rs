use std::path::Path;

use thiserror::Error;

use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;
use crate::video::domain::image_writer::ImageWriter;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("unsupported image extension: {0:?}")]
    UnsupportedExtension(String),
    #[error("frame has {0} channels, expected 1 or 3")]
    UnsupportedLayout(u8),
    #[error(transparent)]
    Encode(#[from] image::ImageError),
}

/// Writes a single frame to an image file using the `image` crate.
///
/// Expects RGB (or luminance) data, i.e. a frame that already went through
/// display conversion.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            return Err(SaveError::UnsupportedExtension(ext).into());
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        match frame.channels() {
            3 => {
                let img = image::RgbImage::from_raw(
                    frame.width(),
                    frame.height(),
                    frame.data().to_vec(),
                )
                .ok_or("Failed to create image from frame data")?;
                img.save(path).map_err(SaveError::Encode)?;
            }
            1 => {
                let img = image::GrayImage::from_raw(
                    frame.width(),
                    frame.height(),
                    frame.data().to_vec(),
                )
                .ok_or("Failed to create image from frame data")?;
                img.save(path).map_err(SaveError::Encode)?;
            }
            other => return Err(SaveError::UnsupportedLayout(other).into()),
        }

        Ok(())
    }
}
