use thiserror::Error;

use crate::detection::domain::pattern_detector::PatternDetector;
use crate::filtering::domain::edge_filter::EdgeFilter;
use crate::filtering::domain::threshold_filter::ThresholdFilter;
use crate::overlay::domain::region_renderer::RegionRenderer;
use crate::processing::domain::filter_mode::FilterMode;
use crate::shared::constants::{DEFAULT_THRESHOLD, EYE_BOX_COLOR, FACE_BOX_COLOR};
use crate::shared::frame::Frame;
use crate::shared::region::Region;

#[derive(Error, Debug)]
#[error("{0} is unavailable because its detector model failed to load")]
pub struct ModeUnavailable(pub FilterMode);

/// Maps `(frame, mode, threshold)` to a processed frame.
///
/// Holds one port per capability; a detection mode whose detector failed to
/// load cannot be selected, leaving every other mode usable.
pub struct FrameProcessor {
    mode: FilterMode,
    threshold: u8,
    edge: Box<dyn EdgeFilter>,
    binarize: Box<dyn ThresholdFilter>,
    face: Option<Box<dyn PatternDetector>>,
    eye: Option<Box<dyn PatternDetector>>,
    renderer: Box<dyn RegionRenderer>,
}

impl FrameProcessor {
    pub fn new(
        edge: Box<dyn EdgeFilter>,
        binarize: Box<dyn ThresholdFilter>,
        face: Option<Box<dyn PatternDetector>>,
        eye: Option<Box<dyn PatternDetector>>,
        renderer: Box<dyn RegionRenderer>,
    ) -> Self {
        Self {
            mode: FilterMode::default(),
            threshold: DEFAULT_THRESHOLD,
            edge,
            binarize,
            face,
            eye,
            renderer,
        }
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn set_threshold(&mut self, value: u8) {
        self.threshold = value;
    }

    pub fn is_available(&self, mode: FilterMode) -> bool {
        match mode {
            FilterMode::FaceDetection => self.face.is_some(),
            FilterMode::EyeDetection => self.eye.is_some(),
            _ => true,
        }
    }

    pub fn available_modes(&self) -> Vec<FilterMode> {
        FilterMode::ALL
            .iter()
            .copied()
            .filter(|&m| self.is_available(m))
            .collect()
    }

    /// Selects `mode`, replacing whatever was active before.
    pub fn set_mode(&mut self, mode: FilterMode) -> Result<(), ModeUnavailable> {
        if !self.is_available(mode) {
            return Err(ModeUnavailable(mode));
        }
        self.mode = mode;
        Ok(())
    }

    pub fn process(&mut self, frame: &Frame) -> Result<Frame, Box<dyn std::error::Error>> {
        match self.mode {
            FilterMode::None => Ok(frame.clone()),
            FilterMode::EdgeDetection => self.edge.apply(frame),
            FilterMode::GrayThreshold => self.binarize.apply(frame, self.threshold),
            FilterMode::FaceDetection => {
                let regions =
                    run_detector(self.face.as_deref_mut(), FilterMode::FaceDetection, frame)?;
                self.outlined(frame, &regions, FACE_BOX_COLOR)
            }
            FilterMode::EyeDetection => {
                let regions =
                    run_detector(self.eye.as_deref_mut(), FilterMode::EyeDetection, frame)?;
                self.outlined(frame, &regions, EYE_BOX_COLOR)
            }
        }
    }

    fn outlined(
        &self,
        frame: &Frame,
        regions: &[Region],
        color: [u8; 3],
    ) -> Result<Frame, Box<dyn std::error::Error>> {
        let mut out = frame.clone();
        if !regions.is_empty() {
            self.renderer.draw(&mut out, regions, color)?;
        }
        Ok(out)
    }
}

fn run_detector(
    detector: Option<&mut dyn PatternDetector>,
    mode: FilterMode,
    frame: &Frame,
) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
    match detector {
        Some(d) => d.detect(frame),
        None => Err(ModeUnavailable(mode).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::{Arc, Mutex};

    use crate::overlay::infrastructure::box_outline_renderer::BoxOutlineRenderer;

    struct NullEdge;

    impl EdgeFilter for NullEdge {
        fn apply(&self, frame: &Frame) -> Result<Frame, Box<dyn std::error::Error>> {
            let len = (frame.width() * frame.height()) as usize;
            Ok(Frame::new(
                vec![0u8; len],
                frame.width(),
                frame.height(),
                1,
                frame.tick(),
            ))
        }
    }

    struct RecordingBinarize {
        seen: Arc<Mutex<Option<u8>>>,
    }

    impl RecordingBinarize {
        fn new() -> Self {
            Self {
                seen: Arc::new(Mutex::new(None)),
            }
        }
    }

    impl ThresholdFilter for RecordingBinarize {
        fn apply(&self, frame: &Frame, threshold: u8) -> Result<Frame, Box<dyn std::error::Error>> {
            *self.seen.lock().unwrap() = Some(threshold);
            Ok(frame.clone())
        }
    }

    struct FixedDetector {
        regions: Vec<Region>,
    }

    impl PatternDetector for FixedDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
            Ok(self.regions.clone())
        }
    }

    fn frame_of(value: u8) -> Frame {
        Frame::new(vec![value; 10 * 10 * 3], 10, 10, 3, 0)
    }

    fn processor_with_detectors(
        face: Option<Vec<Region>>,
        eye: Option<Vec<Region>>,
    ) -> FrameProcessor {
        FrameProcessor::new(
            Box::new(NullEdge),
            Box::new(RecordingBinarize::new()),
            face.map(|regions| Box::new(FixedDetector { regions }) as Box<dyn PatternDetector>),
            eye.map(|regions| Box::new(FixedDetector { regions }) as Box<dyn PatternDetector>),
            Box::new(BoxOutlineRenderer::new(2)),
        )
    }

    #[test]
    fn test_initial_state() {
        let processor = processor_with_detectors(Some(vec![]), Some(vec![]));
        assert_eq!(processor.mode(), FilterMode::None);
        assert_eq!(processor.threshold(), DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_no_filter_is_byte_identical() {
        let mut processor = processor_with_detectors(Some(vec![]), Some(vec![]));
        let frame = frame_of(42);
        let out = processor.process(&frame).unwrap();
        assert_eq!(out.data(), frame.data());
        assert_eq!(out.channels(), frame.channels());
    }

    #[rstest]
    #[case(FilterMode::EdgeDetection, FilterMode::GrayThreshold)]
    #[case(FilterMode::GrayThreshold, FilterMode::FaceDetection)]
    #[case(FilterMode::FaceDetection, FilterMode::EyeDetection)]
    #[case(FilterMode::EyeDetection, FilterMode::None)]
    #[case(FilterMode::None, FilterMode::EdgeDetection)]
    fn test_selecting_a_mode_replaces_the_previous_one(
        #[case] first: FilterMode,
        #[case] second: FilterMode,
    ) {
        let mut processor = processor_with_detectors(Some(vec![]), Some(vec![]));
        processor.set_mode(first).unwrap();
        processor.set_mode(second).unwrap();
        assert_eq!(processor.mode(), second);
    }

    #[test]
    fn test_threshold_value_reaches_the_filter() {
        let binarize = RecordingBinarize::new();
        let seen = binarize.seen.clone();
        let mut processor = FrameProcessor::new(
            Box::new(NullEdge),
            Box::new(binarize),
            None,
            None,
            Box::new(BoxOutlineRenderer::new(2)),
        );
        processor.set_mode(FilterMode::GrayThreshold).unwrap();
        processor.set_threshold(42);
        processor.process(&frame_of(0)).unwrap();
        assert_eq!(*seen.lock().unwrap(), Some(42));
    }

    #[test]
    fn test_edge_mode_produces_single_channel() {
        let mut processor = processor_with_detectors(None, None);
        processor.set_mode(FilterMode::EdgeDetection).unwrap();
        let out = processor.process(&frame_of(8)).unwrap();
        assert_eq!(out.channels(), 1);
    }

    #[test]
    fn test_zero_detections_leave_the_frame_untouched() {
        let mut processor = processor_with_detectors(Some(vec![]), Some(vec![]));
        processor.set_mode(FilterMode::FaceDetection).unwrap();
        let frame = frame_of(90);
        let out = processor.process(&frame).unwrap();
        assert_eq!(out.data(), frame.data());
    }

    #[test]
    fn test_face_detections_are_outlined_in_the_face_color() {
        let region = Region {
            x: 1,
            y: 1,
            width: 6,
            height: 6,
        };
        let mut processor = processor_with_detectors(Some(vec![region]), None);
        processor.set_mode(FilterMode::FaceDetection).unwrap();
        let out = processor.process(&frame_of(0)).unwrap();
        let arr = out.as_ndarray();
        assert_eq!(
            [arr[[1, 1, 0]], arr[[1, 1, 1]], arr[[1, 1, 2]]],
            FACE_BOX_COLOR
        );
        // interior untouched
        assert_eq!(arr[[4, 4, 0]], 0);
    }

    #[test]
    fn test_eye_detections_use_a_distinct_color() {
        let region = Region {
            x: 1,
            y: 1,
            width: 6,
            height: 6,
        };
        let mut processor = processor_with_detectors(None, Some(vec![region]));
        processor.set_mode(FilterMode::EyeDetection).unwrap();
        let out = processor.process(&frame_of(0)).unwrap();
        let arr = out.as_ndarray();
        assert_eq!(
            [arr[[1, 1, 0]], arr[[1, 1, 1]], arr[[1, 1, 2]]],
            EYE_BOX_COLOR
        );
        assert_ne!(FACE_BOX_COLOR, EYE_BOX_COLOR);
    }

    #[test]
    fn test_unavailable_mode_is_rejected_and_state_kept() {
        let mut processor = processor_with_detectors(None, Some(vec![]));
        processor.set_mode(FilterMode::EdgeDetection).unwrap();
        assert!(processor.set_mode(FilterMode::FaceDetection).is_err());
        assert_eq!(processor.mode(), FilterMode::EdgeDetection);
    }

    #[test]
    fn test_available_modes_reflect_loaded_detectors() {
        let processor = processor_with_detectors(Some(vec![]), None);
        let modes = processor.available_modes();
        assert!(modes.contains(&FilterMode::FaceDetection));
        assert!(!modes.contains(&FilterMode::EyeDetection));
        assert!(modes.contains(&FilterMode::GrayThreshold));
    }
}
