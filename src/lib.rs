//! urlsentry: URL risk classification service.
//!
//! Modular structure:
//! - [`features`]: Lexical URL features and fixed-order vector assembly
//! - [`probe`]: Search-index reputation probe (the only network feature)
//! - [`model`]: Classifier seam, ONNX inference, label mapping
//! - [`service`]: Request validation and classification flow
//! - [`server`]: axum HTTP surface
//! - [`logging`]: Structured JSON logging

pub mod config;
pub mod features;
pub mod logging;
pub mod model;
pub mod probe;
pub mod server;
pub mod service;

pub use config::ServiceConfig;
pub use features::{FeatureAssembler, FeatureVector, FEATURE_DIM, FEATURE_NAMES};
pub use logging::StructuredLogger;
pub use model::{Classifier, Label, OnnxClassifier};
pub use probe::ReputationProbe;
pub use service::{ClassificationResult, ClassificationService, ServiceError};
