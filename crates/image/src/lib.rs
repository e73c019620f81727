//! Frame decoding for the hand landmark bridge.
//!
//! Producers hand us either raw pixel buffers (Kinect BGRA, or any of the
//! layouts in [`PixelFormat`]) or self-describing encoded images. Both paths
//! end in a [`Frame`]: an immutable RGB8 grid in HWC layout, which is what the
//! landmark detectors consume.

pub mod decode;
pub mod encode;
pub mod error;
pub mod frame;
pub mod pixelformat;

pub use decode::{
    DecodeLimits, FrameDecoder, FrameSource, decode_encoded, decode_encoded_with_limits,
    decode_raw,
};
pub use encode::{encode_jpeg, encode_png, frame_to_bgra};
pub use error::{DecodeError, EncodeError};
pub use frame::{FRAME_CHANNELS, Frame};
pub use pixelformat::PixelFormat;
