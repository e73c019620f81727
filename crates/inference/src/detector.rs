use crate::{DetectionError, RawDetection};
use image::Frame;

/// A hand landmark detection capability.
///
/// Implementations wrap a concrete model runtime. They are assumed stateful
/// and not safe for concurrent use, so every method takes `&mut self` and
/// frames must be submitted in capture order.
pub trait LandmarkDetector {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Acquire model resources. Called once before the first frame.
    fn open(&mut self) -> Result<(), DetectionError> {
        Ok(())
    }

    /// Detect hands in `frame`.
    ///
    /// Finding no hands is `Ok(vec![])`, not an error.
    fn detect(&mut self, frame: &Frame) -> Result<Vec<RawDetection>, DetectionError>;

    /// Release model resources. Must be safe to call more than once.
    fn close(&mut self) {}
}

impl<D: LandmarkDetector + ?Sized> LandmarkDetector for Box<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn open(&mut self) -> Result<(), DetectionError> {
        (**self).open()
    }

    fn detect(&mut self, frame: &Frame) -> Result<Vec<RawDetection>, DetectionError> {
        (**self).detect(frame)
    }

    fn close(&mut self) {
        (**self).close()
    }
}
