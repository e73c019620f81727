use crate::{EncodeError, Frame};
use crates_image::{ExtendedColorType, ImageEncoder};

/// Encode a frame as JPEG. `quality` is clamped to 1..=100.
pub fn encode_jpeg(frame: &Frame, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Vec::new();
    let encoder = crates_image::codecs::jpeg::JpegEncoder::new_with_quality(
        &mut buffer,
        quality.clamp(1, 100),
    );
    encoder.write_image(
        frame.data(),
        frame.width() as u32,
        frame.height() as u32,
        ExtendedColorType::Rgb8,
    )?;
    Ok(buffer)
}

/// Encode a frame as lossless PNG.
pub fn encode_png(frame: &Frame) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Vec::new();
    crates_image::codecs::png::PngEncoder::new(&mut buffer).write_image(
        frame.data(),
        frame.width() as u32,
        frame.height() as u32,
        ExtendedColorType::Rgb8,
    )?;
    Ok(buffer)
}

/// Pack a frame the way the Kinect color stream delivers it: BGRA, opaque alpha.
pub fn frame_to_bgra(frame: &Frame) -> Vec<u8> {
    frame
        .pixels()
        .flat_map(|[r, g, b]| [b, g, r, 0xFF])
        .collect()
}
