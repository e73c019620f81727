use crate::DecodeError;
use std::fmt;

/// Channels per pixel in a decoded frame (R, G, B).
pub const FRAME_CHANNELS: usize = 3;

/// Immutable RGB8 pixel grid, row-major, HWC layout.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

/// Byte length of a `width × height` buffer with `channels` bytes per pixel.
///
/// Zero-sized and overflowing dimensions are rejected.
pub(crate) fn buffer_len(width: usize, height: usize, channels: usize) -> Result<usize, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(channels))
        .ok_or(DecodeError::InvalidDimensions { width, height })
}

impl Frame {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, DecodeError> {
        let expected = buffer_len(width, height, FRAME_CHANNELS)?;
        if data.len() != expected {
            return Err(DecodeError::LengthMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A frame where every pixel has the same color.
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Result<Self, DecodeError> {
        let len = buffer_len(width, height, FRAME_CHANNELS)?;
        let data = rgb.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `[height, width, channels]`
    pub fn shape(&self) -> [usize; 3] {
        [self.height, self.width, FRAME_CHANNELS]
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * FRAME_CHANNELS;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.data.chunks_exact(FRAME_CHANNELS).map(|c| [c[0], c[1], c[2]])
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_len_rejects_zero() {
        assert_eq!(
            buffer_len(0, 4, 3),
            Err(DecodeError::InvalidDimensions { width: 0, height: 4 })
        );
    }

    #[test]
    fn test_buffer_len_rejects_overflow() {
        assert!(matches!(
            buffer_len(usize::MAX, 2, 4),
            Err(DecodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_buffer_len_kinect_color() {
        assert_eq!(buffer_len(640, 480, 4), Ok(1_228_800));
    }
}
