use crate::frame::buffer_len;
use crate::{DecodeError, Frame, PixelFormat};
use crates_image::{ImageReader, Limits};
use std::io::Cursor;

/// Bounds on what an encoded payload may expand to.
///
/// A few hundred KB of PNG can declare a 10000×10000 image, so the payload
/// size limit alone does not bound decoder memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    pub max_width: u32,
    pub max_height: u32,
    /// Largest single allocation the decoder may make, in bytes
    pub max_alloc: u64,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_width: 4096,
            max_height: 4096,
            max_alloc: 128 * 1024 * 1024,
        }
    }
}

impl DecodeLimits {
    fn to_image_limits(self) -> Limits {
        let mut limits = Limits::default();
        limits.max_image_width = Some(self.max_width);
        limits.max_image_height = Some(self.max_height);
        limits.max_alloc = Some(self.max_alloc);
        limits
    }
}

/// How inbound payloads are interpreted. Fixed per connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSource {
    /// Raw pixels of exactly `width * height * format.channels()` bytes.
    Raw {
        width: usize,
        height: usize,
        format: PixelFormat,
    },
    /// Self-describing image (JPEG, PNG, BMP, ...), format sniffed from magic bytes.
    Encoded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameDecoder {
    source: FrameSource,
    limits: DecodeLimits,
}

impl FrameDecoder {
    pub fn new(source: FrameSource) -> Self {
        Self {
            source,
            limits: DecodeLimits::default(),
        }
    }

    /// Bound the size of decoded encoded images.
    pub fn with_limits(mut self, limits: DecodeLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn raw(width: usize, height: usize, format: PixelFormat) -> Self {
        Self::new(FrameSource::Raw {
            width,
            height,
            format,
        })
    }

    pub fn encoded() -> Self {
        Self::new(FrameSource::Encoded)
    }

    pub fn source(&self) -> FrameSource {
        self.source
    }

    pub fn limits(&self) -> DecodeLimits {
        self.limits
    }

    /// Decode one payload into a [`Frame`].
    pub fn decode(&self, data: &[u8]) -> Result<Frame, DecodeError> {
        match self.source {
            FrameSource::Raw {
                width,
                height,
                format,
            } => decode_raw(data, width, height, format),
            FrameSource::Encoded => decode_encoded_with_limits(data, self.limits),
        }
    }

    /// Decode on tokio's blocking thread pool.
    ///
    /// JPEG/PNG decoding of a full camera frame is CPU-bound and would
    /// otherwise stall the runtime thread serving the connection.
    pub async fn decode_blocking(&self, data: Vec<u8>) -> Result<Frame, DecodeError> {
        let decoder = *self;
        tokio::task::spawn_blocking(move || decoder.decode(&data))
            .await
            .map_err(|e| DecodeError::Image(format!("decode task failed: {e}")))?
    }
}

/// Decode a raw pixel buffer of known dimensions.
///
/// The buffer must hold exactly `width * height * format.channels()` bytes.
pub fn decode_raw(
    data: &[u8],
    width: usize,
    height: usize,
    format: PixelFormat,
) -> Result<Frame, DecodeError> {
    let expected = buffer_len(width, height, format.channels())?;
    if data.is_empty() {
        return Err(DecodeError::Empty);
    }
    if data.len() != expected {
        return Err(DecodeError::LengthMismatch {
            expected,
            got: data.len(),
        });
    }

    Frame::new(width, height, format.to_rgb(data))
}

/// Decode a self-describing encoded image into RGB8 under the default limits.
pub fn decode_encoded(data: &[u8]) -> Result<Frame, DecodeError> {
    decode_encoded_with_limits(data, DecodeLimits::default())
}

/// Decode a self-describing encoded image into RGB8.
///
/// Images whose header declares dimensions above `limits`, or that would
/// need a larger allocation, fail with [`DecodeError::TooLarge`] before the
/// pixel buffer is allocated.
pub fn decode_encoded_with_limits(data: &[u8], limits: DecodeLimits) -> Result<Frame, DecodeError> {
    if data.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| DecodeError::Image(e.to_string()))?;
    reader.limits(limits.to_image_limits());
    let rgb = reader.decode()?.into_rgb8();
    let (width, height) = rgb.dimensions();
    log::trace!("decoded {}x{} encoded frame ({} bytes)", width, height, data.len());

    Frame::new(width as usize, height as usize, rgb.into_raw())
}
