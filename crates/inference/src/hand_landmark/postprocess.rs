use super::{LANDMARK_OUTPUT_LEN, Letterbox};
use crate::{DetectionError, HAND_LANDMARK_COUNT, Hand, Handedness, LandmarkPoint};

/// Raw model outputs for one inference
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOutput {
    /// 21 × (x, y, z) in model input pixels
    pub landmarks: Vec<f32>,
    pub presence: f32,
    pub handedness: Option<f32>,
}

/// Pick the screen landmarks, presence and handedness out of the model
/// outputs, given in session order.
///
/// The first 63-float output holds the screen landmarks (a second one, world
/// landmarks, is ignored). Scalar outputs are presence then handedness.
pub fn split_outputs(outputs: &[Vec<f32>]) -> Result<ModelOutput, DetectionError> {
    let landmarks = outputs
        .iter()
        .find(|output| output.len() == LANDMARK_OUTPUT_LEN)
        .ok_or_else(|| {
            DetectionError::Malformed(format!(
                "no output with {} landmark values",
                LANDMARK_OUTPUT_LEN
            ))
        })?;
    let mut scalars = outputs.iter().filter(|output| output.len() == 1).map(|o| o[0]);
    let presence = scalars
        .next()
        .ok_or_else(|| DetectionError::Malformed("no presence score output".to_string()))?;

    Ok(ModelOutput {
        landmarks: landmarks.clone(),
        presence,
        handedness: scalars.next(),
    })
}

/// Map a raw score output to `[0, 1]`.
///
/// Logits always go through a sigmoid; probabilities are only clamped.
pub fn score_to_probability(value: f32, logits: bool) -> f32 {
    if logits {
        1.0 / (1.0 + (-value).exp())
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Convert model output to a hand in frame-normalized coordinates.
///
/// `z` is scaled by the same factor as `x`. `logits` says whether the
/// presence and handedness outputs are logits or already probabilities.
pub fn decode_hand(
    output: &ModelOutput,
    letterbox: &Letterbox,
    width: usize,
    height: usize,
    logits: bool,
) -> Result<Hand, DetectionError> {
    if output.landmarks.len() != LANDMARK_OUTPUT_LEN {
        return Err(DetectionError::Malformed(format!(
            "expected {} landmark values, got {}",
            LANDMARK_OUTPUT_LEN,
            output.landmarks.len()
        )));
    }

    let mut points = [LandmarkPoint::default(); HAND_LANDMARK_COUNT];
    for (point, chunk) in points.iter_mut().zip(output.landmarks.chunks_exact(3)) {
        let (x, y) = letterbox.to_frame(chunk[0], chunk[1]);
        *point = LandmarkPoint {
            x: x / width as f32,
            y: y / height as f32,
            z: chunk[2] / letterbox.scale / width as f32,
        };
    }

    let mut hand = Hand::new(points, score_to_probability(output.presence, logits));
    if let Some(score) = output.handedness {
        hand = hand.with_handedness(if score_to_probability(score, logits) > 0.5 {
            Handedness::Right
        } else {
            Handedness::Left
        });
    }
    Ok(hand)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landmarks(x: f32, y: f32, z: f32) -> Vec<f32> {
        (0..HAND_LANDMARK_COUNT).flat_map(|_| [x, y, z]).collect()
    }

    #[test]
    fn test_split_outputs_in_session_order() {
        let outputs = vec![landmarks(1.0, 2.0, 3.0), vec![0.9], vec![0.2], landmarks(0.0, 0.0, 0.0)];
        let output = split_outputs(&outputs).unwrap();
        assert_eq!(output.landmarks[0], 1.0);
        assert_eq!(output.presence, 0.9);
        assert_eq!(output.handedness, Some(0.2));
    }

    #[test]
    fn test_split_outputs_missing_landmarks() {
        let outputs = vec![vec![0.9], vec![0.2]];
        assert!(matches!(split_outputs(&outputs), Err(DetectionError::Malformed(_))));
    }

    #[test]
    fn test_decode_hand_maps_through_letterbox() {
        let letterbox = Letterbox::new(448, 224);
        let output = ModelOutput {
            landmarks: landmarks(112.0, 112.0, 11.2),
            presence: 0.8,
            handedness: Some(0.9),
        };
        let hand = decode_hand(&output, &letterbox, 448, 224, false).unwrap();
        let wrist = hand.wrist();
        assert!((wrist.x - 0.5).abs() < 1e-6);
        assert!((wrist.y - 0.5).abs() < 1e-6);
        assert!((wrist.z - 0.05).abs() < 1e-6);
        assert_eq!(hand.score, 0.8);
        assert_eq!(hand.handedness, Some(Handedness::Right));
    }

    #[test]
    fn test_decode_hand_applies_sigmoid_to_logits() {
        let letterbox = Letterbox::new(224, 224);
        let output = ModelOutput {
            landmarks: landmarks(0.0, 0.0, 0.0),
            presence: 4.0,
            handedness: Some(-3.0),
        };
        let hand = decode_hand(&output, &letterbox, 224, 224, true).unwrap();
        assert!(hand.score > 0.98 && hand.score < 1.0);
        assert_eq!(hand.handedness, Some(Handedness::Left));
    }

    #[test]
    fn test_decode_hand_sigmoid_applies_inside_unit_range() {
        let letterbox = Letterbox::new(224, 224);
        let output = ModelOutput {
            landmarks: landmarks(0.0, 0.0, 0.0),
            presence: 0.0,
            handedness: Some(0.4),
        };
        let hand = decode_hand(&output, &letterbox, 224, 224, true).unwrap();
        assert_eq!(hand.score, 0.5);
        assert_eq!(hand.handedness, Some(Handedness::Right));
    }

    #[test]
    fn test_score_is_monotonic_across_unit_boundaries() {
        let raw = [-5.0, -1.0, -0.01, 0.0, 0.01, 0.5, 0.99, 1.0, 1.01, 2.0, 5.0];
        for logits in [true, false] {
            let scores: Vec<f32> = raw.iter().map(|&v| score_to_probability(v, logits)).collect();
            for pair in scores.windows(2) {
                assert!(pair[0] <= pair[1], "logits={logits}: {:?}", scores);
            }
            assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
        }
    }
}
