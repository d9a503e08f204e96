use std::path::PathBuf;

use crate::detection::domain::pattern_detector::PatternDetector;
use crate::detection::infrastructure::cascade_resolver;
use crate::detection::infrastructure::haar_cascade_detector::HaarCascadeDetector;
use crate::filtering::infrastructure::binary_threshold_filter::BinaryThresholdFilter;
use crate::filtering::infrastructure::canny_edge_filter::CannyEdgeFilter;
use crate::overlay::infrastructure::box_outline_renderer::BoxOutlineRenderer;
use crate::processing::domain::filter_mode::FilterMode;
use crate::processing::domain::frame_processor::FrameProcessor;
use crate::shared::constants::{
    EYE_CASCADE, EYE_MIN_NEIGHBORS, EYE_SCALE_FACTOR, FACE_MIN_NEIGHBORS, FACE_SCALE_FACTOR,
    FRONTAL_FACE_CASCADE,
};

/// A processor plus the modes whose detectors could not be loaded.
pub struct BuiltProcessor {
    pub processor: FrameProcessor,
    pub unavailable: Vec<(FilterMode, String)>,
}

/// Wires a [`FrameProcessor`] from the stock OpenCV-backed implementations.
///
/// A cascade that cannot be loaded disables only its own mode; the rest of
/// the processor is built regardless.
pub struct ProcessorFactory {
    cascade_dir: Option<PathBuf>,
}

impl ProcessorFactory {
    /// `cascade_dir` pins cascade lookup to one directory; `None` uses the
    /// full resolution chain (system dirs, cache, download).
    pub fn new(cascade_dir: Option<PathBuf>) -> Self {
        Self { cascade_dir }
    }

    pub fn create(&self) -> BuiltProcessor {
        let mut unavailable = Vec::new();

        let face = self.detector(
            FilterMode::FaceDetection,
            FRONTAL_FACE_CASCADE,
            FACE_SCALE_FACTOR,
            FACE_MIN_NEIGHBORS,
            &mut unavailable,
        );
        let eye = self.detector(
            FilterMode::EyeDetection,
            EYE_CASCADE,
            EYE_SCALE_FACTOR,
            EYE_MIN_NEIGHBORS,
            &mut unavailable,
        );

        let processor = FrameProcessor::new(
            Box::new(CannyEdgeFilter::default()),
            Box::new(BinaryThresholdFilter::new()),
            face,
            eye,
            Box::new(BoxOutlineRenderer::default()),
        );

        BuiltProcessor {
            processor,
            unavailable,
        }
    }

    fn detector(
        &self,
        mode: FilterMode,
        cascade: &str,
        scale_factor: f64,
        min_neighbors: i32,
        unavailable: &mut Vec<(FilterMode, String)>,
    ) -> Option<Box<dyn PatternDetector>> {
        match self.load(cascade, scale_factor, min_neighbors) {
            Ok(detector) => Some(Box::new(detector)),
            Err(e) => {
                log::warn!("{mode} disabled: {e}");
                unavailable.push((mode, e.to_string()));
                None
            }
        }
    }

    fn load(
        &self,
        cascade: &str,
        scale_factor: f64,
        min_neighbors: i32,
    ) -> Result<HaarCascadeDetector, Box<dyn std::error::Error>> {
        let path = match &self.cascade_dir {
            Some(dir) => {
                let path = dir.join(cascade);
                if !path.exists() {
                    return Err(format!("cascade {cascade} not found in {}", dir.display()).into());
                }
                path
            }
            None => cascade_resolver::resolve(cascade, None)?,
        };
        Ok(HaarCascadeDetector::from_file(
            &path,
            scale_factor,
            min_neighbors,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_cascades_disable_only_detection_modes() {
        let dir = tempfile::tempdir().unwrap();
        let built = ProcessorFactory::new(Some(dir.path().to_path_buf())).create();

        let disabled: Vec<FilterMode> = built.unavailable.iter().map(|(m, _)| *m).collect();
        assert_eq!(
            disabled,
            vec![FilterMode::FaceDetection, FilterMode::EyeDetection]
        );

        let mut processor = built.processor;
        assert!(processor.set_mode(FilterMode::FaceDetection).is_err());
        assert!(processor.set_mode(FilterMode::EyeDetection).is_err());
        assert!(processor.set_mode(FilterMode::EdgeDetection).is_ok());
        assert!(processor.set_mode(FilterMode::GrayThreshold).is_ok());
    }

    #[test]
    fn test_unavailable_reasons_name_the_cascade() {
        let dir = tempfile::tempdir().unwrap();
        let built = ProcessorFactory::new(Some(dir.path().to_path_buf())).create();
        let (_, reason) = &built.unavailable[0];
        assert!(reason.contains(FRONTAL_FACE_CASCADE));
    }
}
