use crate::{
    DetectionError, DetectorConfig, FrameResult, HAND_LANDMARK_COUNT, Hand, Handedness,
    LandmarkDetector, LandmarkPoint, PointFilter,
};
use image::Frame;
use std::time::Instant;

/// Maximum wrist displacement (normalized units) between frames for a hand to
/// keep its track.
const TRACK_RADIUS: f32 = 0.2;

struct Track {
    wrist: LandmarkPoint,
    handedness: Option<Handedness>,
    filters: Vec<PointFilter>,
}

impl Track {
    fn new(config: &DetectorConfig) -> Self {
        Self {
            wrist: LandmarkPoint::default(),
            handedness: None,
            filters: (0..HAND_LANDMARK_COUNT)
                .map(|_| PointFilter::new(config.smoothing_min_cutoff(), config.smoothing_beta()))
                .collect(),
        }
    }

    fn accepts(&self, hand: &Hand) -> bool {
        match (self.handedness, hand.handedness) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }
}

/// Runs a [`LandmarkDetector`] over a frame sequence and applies the
/// configured confidence thresholds, hand limit and temporal smoothing.
///
/// A hand that continues a track from the previous frame only needs
/// `min_tracking_confidence`; a new hand needs `min_detection_confidence`.
pub struct HandTracker<D: LandmarkDetector> {
    detector: D,
    config: DetectorConfig,
    tracks: Vec<Track>,
    is_open: bool,
    epoch: Instant,
}

impl<D: LandmarkDetector> HandTracker<D> {
    pub fn new(detector: D, config: DetectorConfig) -> Result<Self, DetectionError> {
        config.validate()?;
        Ok(Self {
            detector,
            config,
            tracks: Vec::new(),
            is_open: false,
            epoch: Instant::now(),
        })
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn open(&mut self) -> Result<(), DetectionError> {
        if self.is_open {
            return Ok(());
        }
        self.detector.open()?;
        self.is_open = true;
        log::info!("detector '{}' opened", self.detector.name());
        Ok(())
    }

    pub fn close(&mut self) {
        if !self.is_open {
            return;
        }
        self.detector.close();
        self.tracks.clear();
        self.is_open = false;
        log::info!("detector '{}' closed", self.detector.name());
    }

    /// Detect hands in the next frame of the sequence, timestamped now.
    pub fn detect(&mut self, frame: &Frame) -> Result<FrameResult, DetectionError> {
        let t = self.epoch.elapsed().as_secs_f64();
        self.detect_at(frame, t)
    }

    /// Detect hands in the next frame of the sequence, captured at `t` seconds.
    pub fn detect_at(&mut self, frame: &Frame, t: f64) -> Result<FrameResult, DetectionError> {
        if !self.is_open {
            return Err(DetectionError::NotOpen);
        }

        let mut raw = self.detector.detect(frame)?;
        for hand in &raw {
            validate_hand(hand)?;
        }
        raw.sort_by(|a, b| b.score.total_cmp(&a.score));

        let matches = match_tracks(&self.tracks, &raw);
        let mut previous: Vec<Option<Track>> =
            std::mem::take(&mut self.tracks).into_iter().map(Some).collect();
        let mut hands = Vec::with_capacity(self.config.max_hands());
        let mut tracks = Vec::with_capacity(self.config.max_hands());

        for (mut hand, matched) in raw.into_iter().zip(matches) {
            if hands.len() == self.config.max_hands() {
                break;
            }

            let threshold = if matched.is_some() {
                self.config.min_tracking_confidence()
            } else {
                self.config.min_detection_confidence()
            };
            if hand.score < threshold {
                continue;
            }

            let mut track = matched
                .and_then(|index| previous[index].take())
                .unwrap_or_else(|| Track::new(&self.config));

            if self.config.smoothing() {
                for (point, filter) in hand.points.iter_mut().zip(track.filters.iter_mut()) {
                    *point = filter.filter(t, *point);
                }
            }

            track.wrist = *hand.wrist();
            if hand.handedness.is_some() {
                track.handedness = hand.handedness;
            }
            tracks.push(track);
            hands.push(hand);
        }

        let lost = previous.iter().filter(|track| track.is_some()).count();
        if lost > 0 {
            log::debug!("{} hand track(s) lost", lost);
        }
        self.tracks = tracks;
        Ok(FrameResult::new(hands))
    }
}

impl<D: LandmarkDetector> Drop for HandTracker<D> {
    fn drop(&mut self) {
        self.close();
    }
}

fn validate_hand(hand: &Hand) -> Result<(), DetectionError> {
    if !hand.score.is_finite() || !(0.0..=1.0).contains(&hand.score) {
        return Err(DetectionError::Malformed(format!(
            "hand score {} outside [0, 1]",
            hand.score
        )));
    }
    if let Some(index) = hand.points.iter().position(|point| !point.is_finite()) {
        return Err(DetectionError::Malformed(format!(
            "landmark {} is not finite",
            index
        )));
    }
    Ok(())
}

/// Pair each hand with at most one previous track, closest wrists first.
///
/// Returns the matched track index per hand. Ties keep score order, since
/// `hands` is sorted best first.
fn match_tracks(tracks: &[Track], hands: &[Hand]) -> Vec<Option<usize>> {
    let mut pairs = Vec::new();
    for (hand_index, hand) in hands.iter().enumerate() {
        for (track_index, track) in tracks.iter().enumerate() {
            if !track.accepts(hand) {
                continue;
            }
            let distance = track.wrist.planar_distance(hand.wrist());
            if distance <= TRACK_RADIUS {
                pairs.push((hand_index, track_index, distance));
            }
        }
    }
    pairs.sort_by(|a, b| a.2.total_cmp(&b.2));

    let mut matches = vec![None; hands.len()];
    let mut taken = vec![false; tracks.len()];
    for (hand_index, track_index, _) in pairs {
        if matches[hand_index].is_none() && !taken[track_index] {
            matches[hand_index] = Some(track_index);
            taken[track_index] = true;
        }
    }
    matches
}
