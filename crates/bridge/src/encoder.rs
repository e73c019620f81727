use crate::{FrameError, WireLayout};
use inference::FrameResult;
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// Serializes detection results and per-frame errors into reply payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultEncoder {
    layout: WireLayout,
}

struct Nested<'a>(&'a FrameResult);

impl Serialize for Nested<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for hand in self.0.hands() {
            seq.serialize_element(&hand.points[..])?;
        }
        seq.end()
    }
}

struct Flat<'a>(&'a FrameResult);

impl Serialize for Flat<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.points())
    }
}

#[derive(serde::Serialize)]
struct ErrorRecord<'a> {
    frame: u64,
    error: &'a str,
    message: String,
}

impl ResultEncoder {
    pub fn new(layout: WireLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> WireLayout {
        self.layout
    }

    /// JSON array of `{"x","y","z"}` points, `[]` when no hands were found.
    pub fn encode(&self, result: &FrameResult) -> Result<Vec<u8>, serde_json::Error> {
        match self.layout {
            WireLayout::Nested => serde_json::to_vec(&Nested(result)),
            WireLayout::Flat => serde_json::to_vec(&Flat(result)),
        }
    }

    /// `{"frame":N,"error":"<kind>","message":"..."}` for the frame at
    /// `frame_index` (0-based).
    pub fn encode_error(
        &self,
        frame_index: u64,
        err: &FrameError,
    ) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&ErrorRecord {
            frame: frame_index,
            error: err.kind(),
            message: err.to_string(),
        })
    }
}

/// One `(x, y, z)` line per point, two decimals, empty when there are no hands.
pub fn format_text(result: &FrameResult) -> String {
    result
        .points()
        .map(|p| format!("({:.2}, {:.2}, {:.2})", p.x, p.y, p.z))
        .collect::<Vec<_>>()
        .join("\n")
}
