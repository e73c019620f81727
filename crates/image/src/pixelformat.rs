use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Byte layout of a raw (unencoded) pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// Kinect color stream layout
    Bgra8,
    Bgr8,
    Rgba8,
    Rgb8,
}

impl PixelFormat {
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Bgra8 | PixelFormat::Rgba8 => 4,
            PixelFormat::Bgr8 | PixelFormat::Rgb8 => 3,
        }
    }

    /// Reorder `data` into packed RGB8, dropping alpha.
    ///
    /// Trailing bytes that do not form a whole pixel are ignored; callers
    /// validate the length first.
    pub fn to_rgb(&self, data: &[u8]) -> Vec<u8> {
        let channels = self.channels();
        let mut rgb = Vec::with_capacity(data.len() / channels * 3);

        match self {
            PixelFormat::Rgb8 => rgb.extend_from_slice(&data[..data.len() / 3 * 3]),
            PixelFormat::Rgba8 => {
                for px in data.chunks_exact(4) {
                    rgb.extend_from_slice(&px[..3]);
                }
            }
            PixelFormat::Bgr8 | PixelFormat::Bgra8 => {
                for px in data.chunks_exact(channels) {
                    rgb.extend_from_slice(&[px[2], px[1], px[0]]);
                }
            }
        }

        rgb
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PixelFormat::Bgra8 => "bgra8",
            PixelFormat::Bgr8 => "bgr8",
            PixelFormat::Rgba8 => "rgba8",
            PixelFormat::Rgb8 => "rgb8",
        };
        f.write_str(name)
    }
}

impl FromStr for PixelFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bgra8" => Ok(PixelFormat::Bgra8),
            "bgr8" => Ok(PixelFormat::Bgr8),
            "rgba8" => Ok(PixelFormat::Rgba8),
            "rgb8" => Ok(PixelFormat::Rgb8),
            other => Err(format!("unsupported pixel format: {other}")),
        }
    }
}
