//! Feature assembly: URL → {lexical features, reputation probe} → vector.

use super::lexical::*;
use super::{FeatureVector, Lexicon, FEATURE_DIM};
use crate::probe::ReputationProbe;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

pub struct FeatureAssembler {
    lexicon: Lexicon,
    probe: Arc<dyn ReputationProbe>,
    probe_timeout: Duration,
}

impl FeatureAssembler {
    pub fn new(lexicon: Lexicon, probe: Arc<dyn ReputationProbe>, probe_timeout: Duration) -> Self {
        Self {
            lexicon,
            probe,
            probe_timeout,
        }
    }

    /// Build the full vector, consulting the probe once. Never fails.
    pub async fn extract(&self, url: &str) -> FeatureVector {
        let indexed = self.probe_indexed(url).await;
        self.lexical(url, indexed)
    }

    /// Build the vector from an already known probe answer.
    pub fn lexical(&self, url: &str, indexed: bool) -> FeatureVector {
        let lex = &self.lexicon;
        let values: [i64; FEATURE_DIM] = [
            has_ip_literal(url),
            has_abnormal_host(url),
            i64::from(indexed),
            dot_count(url),
            www_count(url),
            at_count(url),
            dir_count(url),
            double_slash_in_path_count(url),
            is_shortened(url, lex),
            https_count(url),
            http_count(url),
            percent_count(url),
            question_count(url),
            hyphen_count(url),
            equals_count(url),
            url_length(url),
            hostname_length(url),
            has_suspicious_word(url, lex),
            digit_count(url),
            letter_count(url),
            first_dir_length(url),
            tld_length(url),
        ];
        FeatureVector::new(values.map(|v| v as f32))
    }

    async fn probe_indexed(&self, url: &str) -> bool {
        match tokio::time::timeout(self.probe_timeout, self.probe.is_indexed(url)).await {
            Ok(Ok(indexed)) => indexed,
            Ok(Err(e)) => {
                warn!(url, probe = self.probe.name(), error = %e, "reputation probe failed; treating as not indexed");
                false
            }
            Err(_) => {
                warn!(
                    url,
                    probe = self.probe.name(),
                    timeout_ms = self.probe_timeout.as_millis() as u64,
                    "reputation probe timed out; treating as not indexed"
                );
                false
            }
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}
