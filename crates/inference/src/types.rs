use serde::Serialize;

/// Number of landmarks in the hand schema
pub const HAND_LANDMARK_COUNT: usize = 21;

/// One landmark coordinate.
///
/// `x` and `y` are normalized to `[0, 1]` image space, `z` is depth relative
/// to the wrist with roughly the same scale as `x`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl LandmarkPoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Distance in the image plane, ignoring depth.
    pub fn planar_distance(&self, other: &LandmarkPoint) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Hand landmark indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandLandmark {
    pub const ALL: [HandLandmark; HAND_LANDMARK_COUNT] = [
        HandLandmark::Wrist,
        HandLandmark::ThumbCmc,
        HandLandmark::ThumbMcp,
        HandLandmark::ThumbIp,
        HandLandmark::ThumbTip,
        HandLandmark::IndexMcp,
        HandLandmark::IndexPip,
        HandLandmark::IndexDip,
        HandLandmark::IndexTip,
        HandLandmark::MiddleMcp,
        HandLandmark::MiddlePip,
        HandLandmark::MiddleDip,
        HandLandmark::MiddleTip,
        HandLandmark::RingMcp,
        HandLandmark::RingPip,
        HandLandmark::RingDip,
        HandLandmark::RingTip,
        HandLandmark::PinkyMcp,
        HandLandmark::PinkyPip,
        HandLandmark::PinkyDip,
        HandLandmark::PinkyTip,
    ];
}

impl From<HandLandmark> for usize {
    fn from(landmark: HandLandmark) -> usize {
        landmark as usize
    }
}

impl TryFrom<usize> for HandLandmark {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        HandLandmark::ALL.get(value).copied().ok_or_else(|| {
            format!(
                "Invalid hand landmark index: {}. Must be in range 0-{}.",
                value,
                HAND_LANDMARK_COUNT - 1
            )
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    Right,
}

/// One detected hand
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    /// Landmarks in schema order, index `i` is `HandLandmark::ALL[i]`
    pub points: [LandmarkPoint; HAND_LANDMARK_COUNT],
    /// Detection (or presence) score in `[0, 1]`
    pub score: f32,
    pub handedness: Option<Handedness>,
}

impl Hand {
    pub fn new(points: [LandmarkPoint; HAND_LANDMARK_COUNT], score: f32) -> Self {
        Self {
            points,
            score,
            handedness: None,
        }
    }

    pub fn with_handedness(mut self, handedness: Handedness) -> Self {
        self.handedness = Some(handedness);
        self
    }

    pub fn landmark(&self, landmark: HandLandmark) -> &LandmarkPoint {
        &self.points[usize::from(landmark)]
    }

    pub fn wrist(&self) -> &LandmarkPoint {
        self.landmark(HandLandmark::Wrist)
    }
}

/// What a detector backend reports, before thresholds and smoothing.
///
/// The fixed-size point array makes a wrong point count unrepresentable.
pub type RawDetection = Hand;

/// All hands found in one frame, best score first
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameResult {
    hands: Vec<Hand>,
}

impl FrameResult {
    pub fn new(hands: Vec<Hand>) -> Self {
        Self { hands }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    /// Every point of every hand, hand by hand, in schema order.
    pub fn points(&self) -> impl Iterator<Item = &LandmarkPoint> {
        self.hands.iter().flat_map(|hand| hand.points.iter())
    }
}
