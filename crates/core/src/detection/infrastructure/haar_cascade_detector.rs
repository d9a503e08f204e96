use std::path::{Path, PathBuf};

use opencv::core::{Mat, Rect, Size, Vector};
use opencv::prelude::*;
use opencv::{imgproc, objdetect};
use thiserror::Error;

use crate::detection::domain::pattern_detector::PatternDetector;
use crate::shared::frame::Frame;
use crate::shared::mat_convert;
use crate::shared::region::Region;

#[derive(Error, Debug)]
pub enum CascadeLoadError {
    #[error("cascade model {path} failed to load: {source}")]
    Load {
        path: PathBuf,
        source: opencv::Error,
    },
    #[error("cascade model {0} is empty")]
    Empty(PathBuf),
}

/// Multi-scale Haar cascade detection over the luminance image.
///
/// Scale factor and neighbor count are fixed per detector instance; the
/// stock frontal-face and eye cascades want different neighbor counts.
pub struct HaarCascadeDetector {
    classifier: objdetect::CascadeClassifier,
    scale_factor: f64,
    min_neighbors: i32,
}

impl HaarCascadeDetector {
    pub fn from_file(
        path: &Path,
        scale_factor: f64,
        min_neighbors: i32,
    ) -> Result<Self, CascadeLoadError> {
        let classifier = objdetect::CascadeClassifier::new(&path.to_string_lossy())
            .map_err(|source| CascadeLoadError::Load {
                path: path.to_path_buf(),
                source,
            })?;
        let empty = classifier.empty().map_err(|source| CascadeLoadError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        if empty {
            return Err(CascadeLoadError::Empty(path.to_path_buf()));
        }
        Ok(Self {
            classifier,
            scale_factor,
            min_neighbors,
        })
    }
}

impl PatternDetector for HaarCascadeDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        let bgr = mat_convert::mat_from_frame(frame)?;
        let mut gray = Mat::default();
        imgproc::cvt_color_def(&bgr, &mut gray, imgproc::COLOR_BGR2GRAY)?;

        let mut rects = Vector::<Rect>::new();
        self.classifier.detect_multi_scale(
            &gray,
            &mut rects,
            self.scale_factor,
            self.min_neighbors,
            objdetect::CASCADE_SCALE_IMAGE,
            Size::new(0, 0),
            Size::new(0, 0),
        )?;

        Ok(rects
            .iter()
            .map(|r| Region {
                x: r.x,
                y: r.y,
                width: r.width,
                height: r.height,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_cascade_file_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_cascade.xml");
        assert!(HaarCascadeDetector::from_file(&path, 1.1, 4).is_err());
    }

    #[test]
    fn test_bogus_cascade_file_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bogus.xml");
        std::fs::write(&path, b"<not-a-cascade/>").unwrap();
        assert!(HaarCascadeDetector::from_file(&path, 1.1, 4).is_err());
    }
}
