//! Service configuration. Loaded once at startup from JSON; every section
//! falls back to defaults so partial files work.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Env var naming the config file.
pub const CONFIG_PATH_ENV: &str = "URLSENTRY_CONFIG_PATH";
/// Env var overriding `bind_addr`.
pub const BIND_ENV: &str = "URLSENTRY_BIND";
/// Env var overriding `model_path`.
pub const MODEL_PATH_ENV: &str = "URLSENTRY_MODEL_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value for {var}: {value}")]
    Env { var: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// Path to the ONNX classifier artifact
    pub model_path: PathBuf,
    /// Reputation probe (search-index lookup)
    pub probe: ProbeConfig,
    /// Shortener denylist and suspicious-word list
    pub lexicon: LexiconConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeMode {
    /// Query the search endpoint
    Search,
    /// Answer `fixed_value` without any network access
    Fixed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub mode: ProbeMode,
    /// Answer used in `fixed` mode
    pub fixed_value: bool,
    /// Search endpoint; queried as `{endpoint}?q=<url>&num=1`
    pub endpoint: String,
    /// Upper bound for one probe call, connect included
    pub timeout_ms: u64,
    pub user_agent: String,
    /// A match of this pattern in the response body counts as "indexed"
    pub result_pattern: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Host substrings of known URL shorteners (compared lowercased)
    pub shorteners: Vec<String>,
    /// Brand/credential terms (matched case-insensitively)
    pub suspicious_words: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            model_path: PathBuf::from("model.onnx"),
            probe: ProbeConfig::default(),
            lexicon: LexiconConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            mode: ProbeMode::Fixed,
            fixed_value: true,
            endpoint: "https://www.google.com/search".to_string(),
            timeout_ms: 3000,
            user_agent: concat!("urlsentry/", env!("CARGO_PKG_VERSION")).to_string(),
            result_pattern: r#"<a href="/url\?q=|<div class="g""#.to_string(),
        }
    }
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            shorteners: crate::features::DEFAULT_SHORTENERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            suspicious_words: crate::features::DEFAULT_SUSPICIOUS_WORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl ServiceConfig {
    /// Load from JSON file if present; otherwise return default.
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the config path from the environment, load it, then apply
    /// `URLSENTRY_BIND` / `URLSENTRY_MODEL_PATH` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.json"));
        let mut config = Self::load(&path)?;
        if let Ok(bind) = std::env::var(BIND_ENV) {
            config.bind_addr = bind.parse().map_err(|_| ConfigError::Env {
                var: BIND_ENV,
                value: bind.clone(),
            })?;
        }
        if let Ok(model) = std::env::var(MODEL_PATH_ENV) {
            config.model_path = PathBuf::from(model);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let c = ServiceConfig::load(Path::new("nonexistent-urlsentry.json")).unwrap();
        assert_eq!(c.bind_addr.port(), 5000);
        assert_eq!(c.probe.mode, ProbeMode::Fixed);
        assert!(c.probe.fixed_value);
        assert!(c.lexicon.shorteners.iter().any(|s| s == "bit.ly"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"probe": {{"mode": "search", "timeout_ms": 250}}, "log": {{"json": false}}}}"#
        )
        .unwrap();
        let c = ServiceConfig::load(f.path()).unwrap();
        assert_eq!(c.probe.mode, ProbeMode::Search);
        assert_eq!(c.probe.timeout_ms, 250);
        assert_eq!(c.probe.endpoint, ProbeConfig::default().endpoint);
        assert!(!c.log.json);
        assert_eq!(c.log.level, "info");
        assert_eq!(c.model_path, PathBuf::from("model.onnx"));
    }

    #[test]
    fn lexicon_can_be_replaced() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"lexicon": {{"shorteners": ["sho.rt"], "suspicious_words": ["wallet"]}}}}"#
        )
        .unwrap();
        let c = ServiceConfig::load(f.path()).unwrap();
        assert_eq!(c.lexicon.shorteners, vec!["sho.rt".to_string()]);
        assert_eq!(c.lexicon.suspicious_words, vec!["wallet".to_string()]);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{{ not json").unwrap();
        let err = ServiceConfig::load(f.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
