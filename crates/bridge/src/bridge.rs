use crate::{BridgeConfig, BridgeError, FrameError, ResultEncoder};
use com::{ComError, read_frame, write_frame};
use image::FrameDecoder;
use inference::{FrameResult, HandTracker, LandmarkDetector};
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;

/// Connection lifecycle of a [`FrameBridge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Listening,
    Connected,
    Streaming,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// The producer closed its end.
    PeerClosed,
    /// A length prefix exceeded the frame limit.
    Framing { len: u64, max: usize },
    /// No frame arrived within the receive timeout.
    Timeout,
    /// Reading or writing the socket failed.
    Io(String),
    /// The shutdown future completed.
    Shutdown,
}

/// What happened during one [`FrameBridge::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeSummary {
    /// Complete frames received
    pub frames: u64,
    /// Error records sent
    pub errors: u64,
    pub close_reason: CloseReason,
}

/// Serves one producer: frames in, landmark replies out.
pub struct FrameBridge<D: LandmarkDetector> {
    config: BridgeConfig,
    listener: Option<TcpListener>,
    local_addr: SocketAddr,
    tracker: HandTracker<D>,
    decoder: FrameDecoder,
    encoder: ResultEncoder,
    state: watch::Sender<BridgeState>,
    frames: u64,
    errors: u64,
}

impl<D: LandmarkDetector> FrameBridge<D> {
    /// Validate `config`, wrap `detector` and bind the listener.
    ///
    /// The detector is not opened until [`FrameBridge::run`].
    pub async fn bind(config: BridgeConfig, detector: D) -> Result<Self, BridgeError> {
        config.validate()?;
        let tracker = HandTracker::new(detector, config.detector().clone())?;

        let listener = TcpListener::bind(config.addr()).await?;
        let local_addr = listener.local_addr()?;
        log::info!(
            "listening on {} ({:?} frames, max {} bytes)",
            local_addr,
            config.mode(),
            config.max_frame_bytes()
        );

        let (state, _) = watch::channel(BridgeState::Listening);
        Ok(Self {
            decoder: config.decoder(),
            encoder: ResultEncoder::new(config.layout()),
            config,
            listener: Some(listener),
            local_addr,
            tracker,
            state,
            frames: 0,
            errors: 0,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn state(&self) -> BridgeState {
        *self.state.borrow()
    }

    pub fn state_watch(&self) -> watch::Receiver<BridgeState> {
        self.state.subscribe()
    }

    /// Serve one producer until it disconnects.
    pub async fn run(self) -> Result<BridgeSummary, BridgeError> {
        self.run_until(std::future::pending()).await
    }

    /// Serve one producer until it disconnects or `shutdown` completes.
    ///
    /// The listener is released and the detector closed before this returns,
    /// whatever the outcome.
    pub async fn run_until<F>(mut self, shutdown: F) -> Result<BridgeSummary, BridgeError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let result = self.serve(shutdown.as_mut()).await;

        self.listener = None;
        self.tracker.close();
        self.state.send_replace(BridgeState::Closed);

        match &result {
            Ok(summary) => log::info!(
                "bridge closed ({:?}): {} frames, {} errors",
                summary.close_reason,
                summary.frames,
                summary.errors
            ),
            Err(err) => log::error!("bridge failed: {}", err),
        }
        result
    }

    async fn serve<F>(&mut self, mut shutdown: Pin<&mut F>) -> Result<BridgeSummary, BridgeError>
    where
        F: Future<Output = ()>,
    {
        self.tracker.open()?;

        let Some(listener) = self.listener.take() else {
            return Err(ComError::ConnectionClosed.into());
        };

        let (mut stream, peer) = tokio::select! {
            accepted = listener.accept() => accepted?,
            _ = shutdown.as_mut() => {
                log::info!("shutdown before any producer connected");
                return Ok(self.summary(CloseReason::Shutdown));
            }
        };
        stream.set_nodelay(true)?;
        log::info!("producer connected from {}", peer);
        self.state.send_replace(BridgeState::Connected);

        let rejecter = tokio::spawn(reject_producers(listener));
        let result = self.stream_frames(&mut stream, shutdown).await;
        rejecter.abort();
        // wait for the task to drop the listener
        let _ = rejecter.await;

        result.map(|reason| self.summary(reason))
    }

    async fn stream_frames<F>(
        &mut self,
        stream: &mut TcpStream,
        mut shutdown: Pin<&mut F>,
    ) -> Result<CloseReason, BridgeError>
    where
        F: Future<Output = ()>,
    {
        let max = self.config.max_frame_bytes();
        let timeout = self.config.recv_timeout();

        loop {
            let received = tokio::select! {
                received = receive(stream, max, timeout) => received,
                _ = shutdown.as_mut() => {
                    log::info!("shutdown requested");
                    return Ok(CloseReason::Shutdown);
                }
            };

            let payload = match received {
                Ok(payload) => payload,
                Err(ComError::ConnectionClosed) => {
                    log::info!("producer disconnected");
                    return Ok(CloseReason::PeerClosed);
                }
                Err(ComError::Timeout) => {
                    log::warn!("no frame within {:?}, closing", timeout);
                    return Ok(CloseReason::Timeout);
                }
                Err(ComError::FrameTooLarge { len, max }) => {
                    let err = FrameError::Framing(ComError::FrameTooLarge { len, max });
                    log::warn!("frame {}: {}", self.frames, err);
                    self.errors += 1;
                    let reply = self.encoder.encode_error(self.frames, &err)?;
                    if let Err(err) = write_frame(stream, &reply).await {
                        log::warn!("failed to send framing error: {}", err);
                    }
                    return Ok(CloseReason::Framing { len, max });
                }
                Err(ComError::Io(err)) => {
                    log::warn!("read failed: {}", err);
                    return Ok(CloseReason::Io(err.to_string()));
                }
            };

            if self.frames == 0 {
                self.state.send_replace(BridgeState::Streaming);
            }
            let index = self.frames;
            self.frames += 1;

            let reply = match self.process(payload).await {
                Ok(result) => {
                    log::debug!("frame {}: {} hand(s)", index, result.len());
                    self.encoder.encode(&result)?
                }
                Err(err) => {
                    log::warn!("frame {}: {} error: {}", index, err.kind(), err);
                    self.errors += 1;
                    self.encoder.encode_error(index, &err)?
                }
            };

            match write_frame(stream, &reply).await {
                Ok(()) => {}
                Err(ComError::ConnectionClosed) => {
                    log::info!("producer disconnected before reply {}", index);
                    return Ok(CloseReason::PeerClosed);
                }
                Err(err) => {
                    log::warn!("write failed: {}", err);
                    return Ok(CloseReason::Io(err.to_string()));
                }
            }
        }
    }

    async fn process(&mut self, payload: Vec<u8>) -> Result<FrameResult, FrameError> {
        let frame = self.decoder.decode_blocking(payload).await?;
        Ok(self.tracker.detect(&frame)?)
    }

    fn summary(&self, close_reason: CloseReason) -> BridgeSummary {
        BridgeSummary {
            frames: self.frames,
            errors: self.errors,
            close_reason,
        }
    }
}

async fn receive(
    stream: &mut TcpStream,
    max: usize,
    timeout: Option<Duration>,
) -> Result<Vec<u8>, ComError> {
    match timeout {
        Some(timeout) => tokio::time::timeout(timeout, read_frame(stream, max)).await?,
        None => read_frame(stream, max).await,
    }
}

/// Accept and immediately drop every further producer.
async fn reject_producers(listener: TcpListener) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                log::warn!("rejecting producer {}: already serving one", peer);
                drop(stream);
            }
            Err(err) => {
                log::warn!("accept failed: {}", err);
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        }
    }
}
