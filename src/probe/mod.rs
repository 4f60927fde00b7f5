//! Reputation probe: the only network-dependent feature source.
//! Callers collapse every error to "not indexed".

mod search;

pub use search::SearchIndexProbe;

use crate::config::{ProbeConfig, ProbeMode};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("probe request timed out")]
    Timeout,
    #[error("probe connection failed: {0}")]
    Connection(String),
    #[error("rate limited by probe endpoint")]
    RateLimited,
    #[error("probe endpoint returned HTTP {0}")]
    Status(u16),
    #[error("malformed probe response: {0}")]
    Malformed(String),
    #[error("invalid probe configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout
        } else if err.is_connect() {
            ProbeError::Connection(err.to_string())
        } else if err.is_decode() || err.is_body() {
            ProbeError::Malformed(err.to_string())
        } else {
            ProbeError::Connection(err.to_string())
        }
    }
}

#[async_trait]
pub trait ReputationProbe: Send + Sync {
    /// Whether an external discovery service knows the URL.
    async fn is_indexed(&self, url: &str) -> Result<bool, ProbeError>;

    fn name(&self) -> &'static str;
}

/// Answers a constant; used when probing is disabled and in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub bool);

#[async_trait]
impl ReputationProbe for FixedProbe {
    async fn is_indexed(&self, _url: &str) -> Result<bool, ProbeError> {
        Ok(self.0)
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

pub fn from_config(config: &ProbeConfig) -> Result<Arc<dyn ReputationProbe>, ProbeError> {
    match config.mode {
        ProbeMode::Fixed => Ok(Arc::new(FixedProbe(config.fixed_value))),
        ProbeMode::Search => Ok(Arc::new(SearchIndexProbe::new(config)?)),
    }
}
