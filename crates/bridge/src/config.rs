use base::{ConfigError, load_toml};
use image::{DecodeLimits, FrameDecoder, PixelFormat};
use inference::DetectorConfig;
use log::LevelFilter;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// How inbound payloads are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FrameMode {
    /// Self-describing images (JPEG, PNG, ...)
    #[default]
    Encoded,
    /// Raw pixels of fixed dimensions
    Raw {
        width: usize,
        height: usize,
        format: PixelFormat,
    },
}

/// Shape of the JSON success reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireLayout {
    /// One inner array of points per hand
    #[default]
    Nested,
    /// All points of all hands in one array
    Flat,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    host: String,
    port: u16,
    max_frame_bytes: usize,
    /// 0 waits forever
    recv_timeout_ms: u64,
    mode: FrameMode,
    /// Bounds on decoded encoded images
    max_image_width: u32,
    max_image_height: u32,
    max_decode_bytes: u64,
    layout: WireLayout,
    log_level: Option<String>,
    detector: DetectorConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 12345,
            max_frame_bytes: com::DEFAULT_MAX_FRAME_BYTES,
            recv_timeout_ms: 30_000,
            mode: FrameMode::default(),
            max_image_width: DecodeLimits::default().max_width,
            max_image_height: DecodeLimits::default().max_height,
            max_decode_bytes: DecodeLimits::default().max_alloc,
            layout: WireLayout::default(),
            log_level: None,
            detector: DetectorConfig::default(),
        }
    }
}

impl BridgeConfig {
    /// Load and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = load_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_max_frame_bytes(mut self, max: usize) -> Self {
        self.max_frame_bytes = max;
        self
    }

    /// `None` waits forever.
    pub fn with_recv_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.recv_timeout_ms = timeout.map_or(0, |t| t.as_millis().max(1) as u64);
        self
    }

    pub fn with_mode(mut self, mode: FrameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_decode_limits(mut self, limits: DecodeLimits) -> Self {
        self.max_image_width = limits.max_width;
        self.max_image_height = limits.max_height;
        self.max_decode_bytes = limits.max_alloc;
        self
    }

    pub fn with_layout(mut self, layout: WireLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn with_detector(mut self, detector: DetectorConfig) -> Self {
        self.detector = detector;
        self
    }

    // Getters
    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn max_frame_bytes(&self) -> usize {
        self.max_frame_bytes
    }

    pub fn recv_timeout(&self) -> Option<Duration> {
        match self.recv_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    pub fn mode(&self) -> FrameMode {
        self.mode
    }

    pub fn decode_limits(&self) -> DecodeLimits {
        DecodeLimits {
            max_width: self.max_image_width,
            max_height: self.max_image_height,
            max_alloc: self.max_decode_bytes,
        }
    }

    /// Decoder for the configured frame mode and decode limits.
    pub fn decoder(&self) -> FrameDecoder {
        let decoder = match self.mode {
            FrameMode::Encoded => FrameDecoder::encoded(),
            FrameMode::Raw {
                width,
                height,
                format,
            } => FrameDecoder::raw(width, height, format),
        };
        decoder.with_limits(self.decode_limits())
    }

    pub fn layout(&self) -> WireLayout {
        self.layout
    }

    pub fn detector(&self) -> &DetectorConfig {
        &self.detector
    }

    pub fn detector_mut(&mut self) -> &mut DetectorConfig {
        &mut self.detector
    }

    /// Configured log level, or the build default.
    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        match &self.log_level {
            Some(level) => LevelFilter::from_str(level)
                .map_err(|_| ConfigError::Invalid(format!("unknown log level '{level}'"))),
            None => Ok(base::default_level()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        if self.max_frame_bytes == 0 || self.max_frame_bytes > u32::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "max_frame_bytes must be in 1..={}, got {}",
                u32::MAX,
                self.max_frame_bytes
            )));
        }
        if let FrameMode::Raw {
            width,
            height,
            format,
        } = self.mode
        {
            let len = width
                .checked_mul(height)
                .and_then(|pixels| pixels.checked_mul(format.channels()))
                .filter(|len| *len > 0)
                .ok_or_else(|| {
                    ConfigError::Invalid(format!("invalid raw frame dimensions {width}x{height}"))
                })?;
            if len > self.max_frame_bytes {
                return Err(ConfigError::Invalid(format!(
                    "raw {width}x{height} {format} frames need {len} bytes, above max_frame_bytes {}",
                    self.max_frame_bytes
                )));
            }
        }
        if self.max_image_width == 0 || self.max_image_height == 0 || self.max_decode_bytes == 0 {
            return Err(ConfigError::Invalid(format!(
                "decode limits must be nonzero, got {}x{} and {} bytes",
                self.max_image_width, self.max_image_height, self.max_decode_bytes
            )));
        }
        self.log_level()?;
        self.detector
            .validate()
            .map_err(|err| ConfigError::Invalid(err.to_string()))
    }
}
