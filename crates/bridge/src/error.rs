use base::ConfigError;
use com::ComError;
use image::DecodeError;
use inference::DetectionError;
use std::fmt;

/// Failure to turn one inbound frame into a result.
///
/// Reported to the producer as an error record.
#[derive(Debug)]
pub enum FrameError {
    Decode(DecodeError),
    Detection(DetectionError),
    Framing(ComError),
}

impl FrameError {
    /// Kind tag used in error records.
    pub fn kind(&self) -> &'static str {
        match self {
            FrameError::Decode(_) => "decode",
            FrameError::Detection(_) => "detection",
            FrameError::Framing(_) => "framing",
        }
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Decode(err) => write!(f, "{err}"),
            FrameError::Detection(err) => write!(f, "{err}"),
            FrameError::Framing(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for FrameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FrameError::Decode(err) => Some(err),
            FrameError::Detection(err) => Some(err),
            FrameError::Framing(err) => Some(err),
        }
    }
}

impl From<DecodeError> for FrameError {
    fn from(err: DecodeError) -> Self {
        FrameError::Decode(err)
    }
}

impl From<DetectionError> for FrameError {
    fn from(err: DetectionError) -> Self {
        FrameError::Detection(err)
    }
}

impl From<ComError> for FrameError {
    fn from(err: ComError) -> Self {
        FrameError::Framing(err)
    }
}

/// Failure that stops the bridge.
#[derive(Debug)]
pub enum BridgeError {
    Com(ComError),
    Detection(DetectionError),
    Config(ConfigError),
    Encode(serde_json::Error),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::Com(err) => write!(f, "connection error: {err}"),
            BridgeError::Detection(err) => write!(f, "detector error: {err}"),
            BridgeError::Config(err) => write!(f, "{err}"),
            BridgeError::Encode(err) => write!(f, "reply encode error: {err}"),
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BridgeError::Com(err) => Some(err),
            BridgeError::Detection(err) => Some(err),
            BridgeError::Config(err) => Some(err),
            BridgeError::Encode(err) => Some(err),
        }
    }
}

impl From<ComError> for BridgeError {
    fn from(err: ComError) -> Self {
        BridgeError::Com(err)
    }
}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Com(ComError::Io(err))
    }
}

impl From<DetectionError> for BridgeError {
    fn from(err: DetectionError) -> Self {
        BridgeError::Detection(err)
    }
}

impl From<ConfigError> for BridgeError {
    fn from(err: ConfigError) -> Self {
        BridgeError::Config(err)
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Encode(err)
    }
}
