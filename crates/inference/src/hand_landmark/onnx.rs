use super::{INPUT_SIZE, decode_hand, preprocess, split_outputs};
use crate::{DetectionError, Hand, LandmarkDetector};
use image::Frame;
use ndarray::{ArrayD, IxDyn};
use ort::{inputs, session::Session as OrtSession, value::TensorRef};
use std::path::{Path, PathBuf};

/// Hand landmark detector backed by an ONNX Runtime session.
///
/// Runs the landmark model on the whole letterboxed frame, so it reports at
/// most one hand per frame.
pub struct OnnxHandLandmarker {
    model_path: PathBuf,
    session: Option<OrtSession>,
    input_name: String,
    output_names: Vec<String>,
    logit_scores: bool,
}

impl OnnxHandLandmarker {
    pub fn new(model_path: impl AsRef<Path>) -> Self {
        Self {
            model_path: model_path.as_ref().to_path_buf(),
            session: None,
            input_name: String::new(),
            output_names: Vec::new(),
            logit_scores: true,
        }
    }

    /// Declare whether the presence and handedness outputs are logits
    /// (the default) or already probabilities.
    pub fn with_logit_scores(mut self, logit_scores: bool) -> Self {
        self.logit_scores = logit_scores;
        self
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl LandmarkDetector for OnnxHandLandmarker {
    fn name(&self) -> &str {
        "onnx-hand-landmark"
    }

    fn open(&mut self) -> Result<(), DetectionError> {
        if self.session.is_some() {
            return Ok(());
        }
        let session = OrtSession::builder()
            .map_err(|e| {
                DetectionError::Backend(format!("failed to create session builder: {}", e))
            })?
            .commit_from_file(&self.model_path)
            .map_err(|e| {
                DetectionError::ModelLoad(format!(
                    "failed to load model from {}: {}",
                    self.model_path.display(),
                    e
                ))
            })?;

        self.input_name = session
            .inputs()
            .first()
            .map(|input| input.name().to_string())
            .ok_or_else(|| DetectionError::ModelLoad("model has no inputs".to_string()))?;
        self.output_names = session
            .outputs()
            .iter()
            .map(|output| output.name().to_string())
            .collect();
        log::debug!(
            "loaded {} (input '{}', outputs {:?})",
            self.model_path.display(),
            self.input_name,
            self.output_names
        );
        self.session = Some(session);
        Ok(())
    }

    fn detect(&mut self, frame: &Frame) -> Result<Vec<Hand>, DetectionError> {
        let session = self.session.as_mut().ok_or(DetectionError::NotOpen)?;

        let (data, letterbox) = preprocess(frame);
        let array = ArrayD::from_shape_vec(IxDyn(&[1, INPUT_SIZE, INPUT_SIZE, 3]), data)
            .map_err(|e| DetectionError::InvalidInput(format!("bad input shape: {}", e)))?;
        let tensor = TensorRef::from_array_view(array.view())
            .map_err(|e| DetectionError::Backend(format!("failed to create tensor ref: {}", e)))?;

        let outputs = session
            .run(inputs![self.input_name.as_str() => tensor])
            .map_err(|e| DetectionError::Backend(format!("inference failed: {}", e)))?;

        let mut values = Vec::with_capacity(self.output_names.len());
        for name in &self.output_names {
            let array = outputs[name.as_str()].try_extract_array::<f32>().map_err(|e| {
                DetectionError::Malformed(format!("output '{}' is not f32: {}", name, e))
            })?;
            values.push(array.iter().copied().collect::<Vec<f32>>());
        }

        let output = split_outputs(&values)?;
        let hand = decode_hand(
            &output,
            &letterbox,
            frame.width(),
            frame.height(),
            self.logit_scores,
        )?;
        Ok(vec![hand])
    }

    fn close(&mut self) {
        self.session = None;
    }
}
