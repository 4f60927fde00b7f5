//! Lexical feature extraction from raw URL strings.

mod lexicon;
mod pipeline;
pub mod lexical;
pub mod url;

pub use lexical::SuffixError;
pub use lexicon::{Lexicon, DEFAULT_SHORTENERS, DEFAULT_SUSPICIOUS_WORDS};
pub use pipeline::FeatureAssembler;
pub use url::{UrlParseError, UrlParts};

use serde::{Deserialize, Serialize};

/// Number of features the classifier expects.
pub const FEATURE_DIM: usize = 22;

/// Positional schema shared with the classifier. Changing order or count
/// requires a retrained model.
pub const FEATURE_NAMES: [&str; FEATURE_DIM] = [
    "has_ip_literal",
    "has_abnormal_host",
    "is_indexed",
    "dot_count",
    "www_count",
    "at_count",
    "dir_count",
    "double_slash_in_path_count",
    "is_shortened",
    "https_count",
    "http_count",
    "percent_count",
    "question_count",
    "hyphen_count",
    "equals_count",
    "url_length",
    "hostname_length",
    "has_suspicious_word",
    "digit_count",
    "letter_count",
    "first_dir_length",
    "tld_length",
];

/// Fixed-size feature vector for model input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f32; FEATURE_DIM],
}

/// One named slot, for diagnostics output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NamedFeature {
    pub name: &'static str,
    pub value: f32,
}

impl FeatureVector {
    pub fn new(values: [f32; FEATURE_DIM]) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i])
    }

    pub fn named(&self) -> Vec<NamedFeature> {
        FEATURE_NAMES
            .iter()
            .zip(self.values.iter())
            .map(|(name, value)| NamedFeature {
                name: *name,
                value: *value,
            })
            .collect()
    }
}
