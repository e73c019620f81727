use std::fmt;

#[derive(Debug)]
pub enum ComError {
    Io(std::io::Error),
    /// The peer closed the stream, cleanly or mid-message.
    ConnectionClosed,
    /// A length prefix declared more bytes than the receiver accepts.
    FrameTooLarge { len: u64, max: usize },
    Timeout,
}

impl fmt::Display for ComError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComError::Io(err) => write!(f, "io error: {err}"),
            ComError::ConnectionClosed => write!(f, "connection closed"),
            ComError::FrameTooLarge { len, max } => {
                write!(f, "frame too large: {len} bytes (max {max})")
            }
            ComError::Timeout => write!(f, "timed out waiting for frame"),
        }
    }
}

impl std::error::Error for ComError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ComError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ComError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::BrokenPipe => ComError::ConnectionClosed,
            _ => ComError::Io(err),
        }
    }
}

impl From<tokio::time::error::Elapsed> for ComError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        ComError::Timeout
    }
}
