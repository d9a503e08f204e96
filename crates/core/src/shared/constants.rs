/// Canny gradient thresholds.
pub const CANNY_LOW_THRESHOLD: f64 = 100.0;
pub const CANNY_HIGH_THRESHOLD: f64 = 200.0;

/// Default grayscale threshold cutoff.
pub const DEFAULT_THRESHOLD: u8 = 127;

pub const FACE_SCALE_FACTOR: f64 = 1.1;
pub const FACE_MIN_NEIGHBORS: i32 = 4;
pub const EYE_SCALE_FACTOR: f64 = 1.1;
pub const EYE_MIN_NEIGHBORS: i32 = 5;

/// Outline colors in the frame's native BGR order.
pub const FACE_BOX_COLOR: [u8; 3] = [255, 0, 0];
pub const EYE_BOX_COLOR: [u8; 3] = [0, 255, 0];
pub const BOX_STROKE_WIDTH: u32 = 2;

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 30;

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

pub const FRONTAL_FACE_CASCADE: &str = "haarcascade_frontalface_default.xml";
pub const EYE_CASCADE: &str = "haarcascade_eye.xml";
pub const CASCADE_BASE_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/4.x/data/haarcascades";
