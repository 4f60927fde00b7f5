//! Classifier seam and label mapping.

mod label;
mod onnx;

pub use label::Label;
pub use onnx::OnnxClassifier;

use crate::features::FeatureVector;
use thiserror::Error;

/// Invocation failure of a loaded classifier.
#[derive(Debug, Error)]
#[error("classifier failed: {0}")]
pub struct ClassifierError(pub String);

/// Failure while loading a classifier artifact.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("onnx runtime: {0}")]
    Ort(#[from] ort::Error),
}

/// Pre-trained decision function. Shared read-only across requests.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<i64, ClassifierError>;

    /// Hex digest of the loaded artifact, if known.
    fn fingerprint(&self) -> Option<&str> {
        None
    }
}
