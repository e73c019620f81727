//! Length-prefixed message framing over async byte streams.
//!
//! Every message on the wire is a 4-byte little-endian length followed by
//! that many payload bytes, in both directions.

pub mod client;
pub mod error;
pub mod framing;

pub use client::Client;
pub use error::ComError;
pub use framing::{DEFAULT_MAX_FRAME_BYTES, read_frame, write_frame};
