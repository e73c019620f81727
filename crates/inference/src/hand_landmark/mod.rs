//! MediaPipe hand landmark model.
//!
//! The model takes one 224×224 RGB image (NHWC, values in `[0, 1]`) and
//! returns 21 landmarks in input pixel space, a presence score and a
//! handedness score.

mod postprocess;
mod preprocess;

#[cfg(feature = "onnx")]
mod onnx;

pub use postprocess::{ModelOutput, decode_hand, score_to_probability, split_outputs};
pub use preprocess::{Letterbox, preprocess};

#[cfg(feature = "onnx")]
pub use onnx::OnnxHandLandmarker;

/// Model input edge length in pixels
pub const INPUT_SIZE: usize = 224;

/// Length of the flat landmark output, 21 points × (x, y, z)
pub const LANDMARK_OUTPUT_LEN: usize = crate::HAND_LANDMARK_COUNT * 3;
