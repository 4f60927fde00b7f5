//! Lenient URL splitter. Follows the generic-syntax split so any string,
//! scheme-less or not, yields a path; only an unbalanced IPv6 bracket fails.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

static SPLIT_RE: OnceLock<Regex> = OnceLock::new();

fn split_re() -> &'static Regex {
    SPLIT_RE.get_or_init(|| {
        Regex::new(
            r"(?s)^(?:([A-Za-z][A-Za-z0-9+.\-]*):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$",
        )
        .expect("static URL split pattern")
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlParseError {
    #[error("invalid IPv6 literal in authority '{0}'")]
    InvalidIpv6(String),
}

/// Components of a raw URL string. Tab, CR and LF are removed before
/// splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts {
    scheme: Option<String>,
    authority: Option<String>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
    host: Option<String>,
}

impl UrlParts {
    pub fn parse(raw: &str) -> Result<Self, UrlParseError> {
        let cleaned: String = raw.chars().filter(|c| !matches!(c, '\t' | '\r' | '\n')).collect();
        let Some(caps) = split_re().captures(&cleaned) else {
            return Ok(Self {
                scheme: None,
                authority: None,
                path: cleaned,
                query: None,
                fragment: None,
                host: None,
            });
        };
        let owned = |i: usize| caps.get(i).map(|m| m.as_str().to_string());
        let authority = owned(2);
        let host = match authority.as_deref() {
            Some(a) => hostname(a)?,
            None => None,
        };
        Ok(Self {
            scheme: owned(1),
            authority,
            path: owned(3).unwrap_or_default(),
            query: owned(4),
            fragment: owned(5),
            host,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Lowercased hostname without userinfo, port, or IPv6 brackets.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }
}

fn hostname(authority: &str) -> Result<Option<String>, UrlParseError> {
    if authority.contains('[') != authority.contains(']') {
        return Err(UrlParseError::InvalidIpv6(authority.to_string()));
    }
    let host_port = authority.rsplit('@').next().unwrap_or(authority);
    let host = match host_port.split_once('[') {
        Some((_, bracketed)) => bracketed.split(']').next().unwrap_or(""),
        None => host_port.split(':').next().unwrap_or(""),
    };
    if host.is_empty() {
        Ok(None)
    } else {
        Ok(Some(host.to_lowercase()))
    }
}
