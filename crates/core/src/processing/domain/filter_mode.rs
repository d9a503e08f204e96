/// The mutually exclusive per-frame processing modes.
///
/// Selecting a mode replaces the previous selection; there is no way to
/// have two modes active at once. `None` passes frames through untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    None,
    EdgeDetection,
    GrayThreshold,
    FaceDetection,
    EyeDetection,
}

impl FilterMode {
    pub const ALL: &[FilterMode] = &[
        FilterMode::None,
        FilterMode::EdgeDetection,
        FilterMode::GrayThreshold,
        FilterMode::FaceDetection,
        FilterMode::EyeDetection,
    ];

    /// Whether the grayscale cutoff value affects this mode.
    pub fn uses_threshold(self) -> bool {
        matches!(self, FilterMode::GrayThreshold)
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterMode::None => write!(f, "No filter"),
            FilterMode::EdgeDetection => write!(f, "Edge detection"),
            FilterMode::GrayThreshold => write!(f, "Grayscale threshold"),
            FilterMode::FaceDetection => write!(f, "Face detection"),
            FilterMode::EyeDetection => write!(f, "Eye detection"),
        }
    }
}
