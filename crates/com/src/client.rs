use crate::{ComError, DEFAULT_MAX_FRAME_BYTES, framing};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpStream, ToSocketAddrs};

/// Producer side of a frame connection.
///
/// Sends one frame, then waits for its reply.
pub struct Client {
    stream: TcpStream,
    max_reply_bytes: usize,
}

impl Client {
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self, ComError> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        log::debug!("connected to {}", stream.peer_addr()?);
        Ok(Self {
            stream,
            max_reply_bytes: DEFAULT_MAX_FRAME_BYTES,
        })
    }

    pub fn with_max_reply_bytes(mut self, max: usize) -> Self {
        self.max_reply_bytes = max;
        self
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ComError> {
        Ok(self.stream.local_addr()?)
    }

    pub fn peer_addr(&self) -> Result<SocketAddr, ComError> {
        Ok(self.stream.peer_addr()?)
    }

    pub async fn send_frame(&mut self, payload: &[u8]) -> Result<(), ComError> {
        framing::write_frame(&mut self.stream, payload).await
    }

    pub async fn recv_reply(&mut self) -> Result<Vec<u8>, ComError> {
        framing::read_frame(&mut self.stream, self.max_reply_bytes).await
    }

    pub async fn recv_reply_timeout(&mut self, timeout: Duration) -> Result<Vec<u8>, ComError> {
        tokio::time::timeout(timeout, self.recv_reply()).await?
    }

    /// Send a frame and wait for the reply.
    pub async fn request(&mut self, payload: &[u8]) -> Result<Vec<u8>, ComError> {
        self.send_frame(payload).await?;
        self.recv_reply().await
    }

    /// Raw stream access, for sending bytes that are not a well-formed frame.
    pub fn stream_mut(&mut self) -> &mut TcpStream {
        &mut self.stream
    }
}
