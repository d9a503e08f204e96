//! Live camera filtering engine.
//!
//! Capture, per-frame filters (edges, grayscale threshold), Haar cascade
//! detection with box overlays, display conversion, and snapshot
//! persistence. Each concern is split into a domain port and an
//! infrastructure implementation; the GUI wires them together.

pub mod detection;
pub mod filtering;
pub mod overlay;
pub mod pipeline;
pub mod processing;
pub mod shared;
pub mod video;
