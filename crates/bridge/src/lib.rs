//! Frame-to-landmark bridge.
//!
//! A [`FrameBridge`] accepts one producer over TCP, decodes each
//! length-prefixed frame, runs hand landmark detection on it and answers with
//! one length-prefixed JSON reply per frame.

pub mod bridge;
pub mod config;
pub mod encoder;
pub mod error;
pub mod process;

pub use bridge::{BridgeState, BridgeSummary, CloseReason, FrameBridge};
pub use config::{BridgeConfig, FrameMode, WireLayout};
pub use encoder::{ResultEncoder, format_text};
pub use error::{BridgeError, FrameError};
pub use process::{NO_HANDS_DETECTED, process_frame};
