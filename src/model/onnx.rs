//! ONNX Runtime classifier. Input: [1, FEATURE_DIM] f32. Output: class id,
//! read from an i64 label tensor or as the arg-max of an f32 score tensor.
//! A missing model file is not an error; the caller runs without a classifier.

use super::{Classifier, ClassifierError, ModelError};
use crate::features::{FeatureVector, FEATURE_DIM};
use ndarray::Array2;
use ort::session::Session;
use ort::value::Tensor;
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::{info, warn};

pub struct OnnxClassifier {
    session: Session,
    input_name: String,
    fingerprint: String,
}

fn ort_err(e: ort::Error) -> ClassifierError {
    ClassifierError(e.to_string())
}

impl OnnxClassifier {
    /// Load model from path. `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, ModelError> {
        if !path.exists() {
            warn!(path = %path.display(), "ONNX model not found; classification disabled");
            return Ok(None);
        }
        let bytes = std::fs::read(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let fingerprint = sha256_hex(&bytes);

        ort::init().with_name("urlsentry").commit()?;
        let session = Session::builder()?.commit_from_memory(&bytes)?;
        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "input".to_string());

        info!(path = %path.display(), sha256 = %fingerprint, input = %input_name, "ONNX model loaded");
        Ok(Some(Self {
            session,
            input_name,
            fingerprint,
        }))
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<i64, ClassifierError> {
        let arr = Array2::from_shape_vec((1, FEATURE_DIM), features.as_slice().to_vec())
            .map_err(|e| ClassifierError(e.to_string()))?;
        let input = Tensor::from_array(arr).map_err(ort_err)?;
        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => input].map_err(ort_err)?)
            .map_err(ort_err)?;
        if outputs.len() == 0 {
            return Err(ClassifierError("model produced no outputs".to_string()));
        }
        let out = &outputs[0];

        if let Ok((_, labels)) = out.try_extract_raw_tensor::<i64>() {
            return labels
                .first()
                .copied()
                .ok_or_else(|| ClassifierError("empty label tensor".to_string()));
        }
        let (_, scores) = out.try_extract_raw_tensor::<f32>().map_err(ort_err)?;
        argmax(scores).ok_or_else(|| ClassifierError("empty score tensor".to_string()))
    }

    fn fingerprint(&self) -> Option<&str> {
        Some(&self.fingerprint)
    }
}

fn argmax(scores: &[f32]) -> Option<i64> {
    scores
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_nan())
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i as i64)
}

fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
