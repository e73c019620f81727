use crate::{FrameError, format_text};
use image::{PixelFormat, decode_raw};
use inference::{HandTracker, LandmarkDetector};

/// Reply of [`process_frame`] for a frame without hands.
pub const NO_HANDS_DETECTED: &str = "No hands detected.";

/// Detect hands in one raw BGRA frame and list their landmarks as text.
///
/// Opens the tracker on first use. Useful for hosts that already hold frames
/// in memory and do not need the TCP bridge.
pub fn process_frame<D: LandmarkDetector>(
    tracker: &mut HandTracker<D>,
    pixels: &[u8],
    width: usize,
    height: usize,
) -> Result<String, FrameError> {
    let frame = decode_raw(pixels, width, height, PixelFormat::Bgra8)?;
    if !tracker.is_open() {
        tracker.open()?;
    }

    let result = tracker.detect(&frame)?;
    log::debug!("{}x{} frame: {} hand(s)", width, height, result.len());
    if result.is_empty() {
        return Ok(NO_HANDS_DETECTED.to_string());
    }
    Ok(format_text(&result))
}
