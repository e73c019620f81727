use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    Empty,
    InvalidDimensions { width: usize, height: usize },
    LengthMismatch { expected: usize, got: usize },
    /// The image exceeds the configured decode limits.
    TooLarge(String),
    Image(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Empty => write!(f, "empty frame payload"),
            DecodeError::InvalidDimensions { width, height } => {
                write!(f, "invalid frame dimensions {width}x{height}")
            }
            DecodeError::LengthMismatch { expected, got } => {
                write!(f, "frame length mismatch: expected {expected} bytes, got {got}")
            }
            DecodeError::TooLarge(msg) => write!(f, "image exceeds decode limits: {msg}"),
            DecodeError::Image(msg) => write!(f, "image decode error: {msg}"),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<crates_image::ImageError> for DecodeError {
    fn from(err: crates_image::ImageError) -> Self {
        match err {
            crates_image::ImageError::Limits(limit) => DecodeError::TooLarge(limit.to_string()),
            other => DecodeError::Image(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EncodeError(pub String);

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "encode error: {}", self.0)
    }
}

impl std::error::Error for EncodeError {}

impl From<crates_image::ImageError> for EncodeError {
    fn from(err: crates_image::ImageError) -> Self {
        EncodeError(err.to_string())
    }
}
