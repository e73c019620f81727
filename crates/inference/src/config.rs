use crate::DetectionError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Detector settings, fixed for the lifetime of a [`crate::HandTracker`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    max_hands: usize,
    min_detection_confidence: f32,
    min_tracking_confidence: f32,
    smoothing: bool,
    smoothing_min_cutoff: f32,
    smoothing_beta: f32,
    model_path: Option<PathBuf>,
    logit_scores: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_hands: 2,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
            smoothing: true,
            smoothing_min_cutoff: 1.0,
            smoothing_beta: 0.15,
            model_path: None,
            logit_scores: true,
        }
    }
}

impl DetectorConfig {
    /// Set the maximum number of hands reported per frame.
    pub fn with_max_hands(mut self, max_hands: usize) -> Self {
        self.max_hands = max_hands;
        self
    }

    /// Set the score a hand needs to start a new track.
    pub fn with_min_detection_confidence(mut self, confidence: f32) -> Self {
        self.min_detection_confidence = confidence;
        self
    }

    /// Set the score a hand needs to continue an existing track.
    pub fn with_min_tracking_confidence(mut self, confidence: f32) -> Self {
        self.min_tracking_confidence = confidence;
        self
    }

    /// Enable or disable temporal smoothing of tracked landmarks.
    pub fn with_smoothing(mut self, smoothing: bool) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Set the One-Euro filter parameters used for smoothing.
    pub fn with_smoothing_params(mut self, min_cutoff: f32, beta: f32) -> Self {
        self.smoothing_min_cutoff = min_cutoff;
        self.smoothing_beta = beta;
        self
    }

    /// Set the model file used by model-backed detectors.
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    /// Declare whether model score outputs are logits or probabilities.
    pub fn with_logit_scores(mut self, logit_scores: bool) -> Self {
        self.logit_scores = logit_scores;
        self
    }

    // Getters
    pub fn max_hands(&self) -> usize {
        self.max_hands
    }

    pub fn min_detection_confidence(&self) -> f32 {
        self.min_detection_confidence
    }

    pub fn min_tracking_confidence(&self) -> f32 {
        self.min_tracking_confidence
    }

    pub fn smoothing(&self) -> bool {
        self.smoothing
    }

    pub fn smoothing_min_cutoff(&self) -> f32 {
        self.smoothing_min_cutoff
    }

    pub fn smoothing_beta(&self) -> f32 {
        self.smoothing_beta
    }

    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }

    pub fn logit_scores(&self) -> bool {
        self.logit_scores
    }

    pub fn validate(&self) -> Result<(), DetectionError> {
        if self.max_hands == 0 {
            return Err(DetectionError::InvalidConfig(
                "max_hands must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("min_detection_confidence", self.min_detection_confidence),
            ("min_tracking_confidence", self.min_tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(DetectionError::InvalidConfig(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }
        let min_cutoff = self.smoothing_min_cutoff;
        let beta = self.smoothing_beta;
        if self.smoothing
            && (!min_cutoff.is_finite() || !beta.is_finite() || min_cutoff <= 0.0 || beta < 0.0)
        {
            return Err(DetectionError::InvalidConfig(format!(
                "smoothing needs finite min_cutoff > 0 and beta >= 0, got {} and {}",
                min_cutoff, beta
            )));
        }
        Ok(())
    }
}
