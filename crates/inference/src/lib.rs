pub mod config;
pub mod detector;
pub mod error;
pub mod hand_landmark;
pub mod smoothing;
pub mod tracker;
pub mod types;

pub use config::DetectorConfig;
pub use detector::LandmarkDetector;
pub use error::DetectionError;
pub use smoothing::{OneEuroFilter, PointFilter};
pub use tracker::HandTracker;
pub use types::{
    FrameResult, HAND_LANDMARK_COUNT, Hand, HandLandmark, Handedness, LandmarkPoint,
    RawDetection,
};

#[cfg(feature = "onnx")]
pub use hand_landmark::OnnxHandLandmarker;
