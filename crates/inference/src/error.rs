use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum DetectionError {
    /// The detector backend failed while processing a frame.
    Backend(String),
    /// The backend returned data that violates the landmark schema.
    Malformed(String),
    /// The frame cannot be fed to this detector.
    InvalidInput(String),
    ModelLoad(String),
    InvalidConfig(String),
    NotOpen,
}

impl fmt::Display for DetectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionError::Backend(msg) => write!(f, "detector backend error: {msg}"),
            DetectionError::Malformed(msg) => write!(f, "malformed detection: {msg}"),
            DetectionError::InvalidInput(msg) => write!(f, "invalid detector input: {msg}"),
            DetectionError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            DetectionError::InvalidConfig(msg) => write!(f, "invalid detector config: {msg}"),
            DetectionError::NotOpen => write!(f, "detector is not open"),
        }
    }
}

impl std::error::Error for DetectionError {}
