//! Classification service: validate → vectorize → classify → label.

use crate::config::ServiceConfig;
use crate::features::{FeatureAssembler, FeatureVector, Lexicon};
use crate::model::{Classifier, ClassifierError, Label};
use crate::probe::{self, ProbeError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors that cross the service boundary. Probe and parse failures never
/// reach this type; they are absorbed into feature values.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("Model is not loaded, check server logs.")]
    ModelUnavailable,
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    pub url: String,
}

impl PredictRequest {
    /// Parse a raw request body; content type is not consulted.
    pub fn from_body(body: &[u8]) -> Result<Self, ServiceError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ServiceError::Validation("request body is empty".to_string()));
        }
        serde_json::from_slice(body)
            .map_err(|e| ServiceError::Validation(format!("invalid request body: {e}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub url: String,
    pub prediction: Label,
}

pub struct ClassificationService {
    assembler: FeatureAssembler,
    classifier: Option<Arc<dyn Classifier>>,
}

impl ClassificationService {
    pub fn new(assembler: FeatureAssembler, classifier: Option<Arc<dyn Classifier>>) -> Self {
        Self {
            assembler,
            classifier,
        }
    }

    /// Wire the lexicon and probe from config around an already loaded classifier.
    pub fn from_config(
        config: &ServiceConfig,
        classifier: Option<Arc<dyn Classifier>>,
    ) -> Result<Self, ProbeError> {
        let probe = probe::from_config(&config.probe)?;
        let assembler = FeatureAssembler::new(
            Lexicon::from_config(&config.lexicon),
            probe,
            Duration::from_millis(config.probe.timeout_ms),
        );
        Ok(Self::new(assembler, classifier))
    }

    pub fn classifier_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn model_fingerprint(&self) -> Option<&str> {
        self.classifier.as_deref().and_then(|c| c.fingerprint())
    }

    /// Full request path for a raw body. Validation failures reject before
    /// any feature work happens.
    pub async fn handle_predict(&self, body: &[u8]) -> Result<ClassificationResult, ServiceError> {
        let request = PredictRequest::from_body(body)?;
        self.classify(&request.url).await
    }

    /// Classifier availability is checked before vectorizing so an unloaded
    /// service spends no probe call on a request it must reject anyway.
    pub async fn classify(&self, url: &str) -> Result<ClassificationResult, ServiceError> {
        let classifier = self
            .classifier
            .as_ref()
            .ok_or(ServiceError::ModelUnavailable)?;
        let features = self.assembler.extract(url).await;
        let class_id = classifier.predict(&features)?;
        let label = Label::from_class_id(class_id);
        debug!(url, class_id, %label, "classified");
        Ok(ClassificationResult {
            url: url.to_string(),
            prediction: label,
        })
    }

    pub async fn features(&self, url: &str) -> FeatureVector {
        self.assembler.extract(url).await
    }
}
