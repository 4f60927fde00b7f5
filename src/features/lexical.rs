//! Lexical URL features. Every function is total: malformed input degrades
//! to 0 (or -1 for `tld_length`) instead of failing.

use super::lexicon::Lexicon;
use super::url::{UrlParseError, UrlParts};
use regex::Regex;
use std::net::Ipv6Addr;
use std::sync::OnceLock;
use thiserror::Error;

static DOTTED_QUAD_RE: OnceLock<Regex> = OnceLock::new();
static HEX_QUAD_RE: OnceLock<Regex> = OnceLock::new();

fn dotted_quad_re() -> &'static Regex {
    DOTTED_QUAD_RE.get_or_init(|| {
        Regex::new(r"^(?:[01]?[0-9][0-9]?|2[0-4][0-9]|25[0-5])(?:\.(?:[01]?[0-9][0-9]?|2[0-4][0-9]|25[0-5])){3}$")
            .expect("static dotted-quad pattern")
    })
}

fn hex_quad_re() -> &'static Regex {
    HEX_QUAD_RE.get_or_init(|| {
        Regex::new(r"^0x[0-9a-fA-F]{1,2}(?:\.0x[0-9a-fA-F]{1,2}){3}$")
            .expect("static hex-quad pattern")
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuffixError {
    #[error(transparent)]
    Url(#[from] UrlParseError),
    #[error("URL has no host")]
    NoHost,
    #[error("no known public suffix for '{0}'")]
    Unknown(String),
}

fn flag(b: bool) -> i64 {
    i64::from(b)
}

fn count(url: &str, needle: &str) -> i64 {
    url.matches(needle).count() as i64
}

fn is_ip_host(host: &str) -> bool {
    dotted_quad_re().is_match(host) || hex_quad_re().is_match(host) || host.parse::<Ipv6Addr>().is_ok()
}

pub fn has_ip_literal(url: &str) -> i64 {
    let ip = UrlParts::parse(url)
        .ok()
        .and_then(|p| p.host().map(is_ip_host))
        .unwrap_or(false);
    flag(ip)
}

/// 1 when the parsed hostname is not a literal substring of the raw URL.
/// A URL without a parseable hostname counts as abnormal.
pub fn has_abnormal_host(url: &str) -> i64 {
    match UrlParts::parse(url) {
        Ok(parts) => match parts.host() {
            Some(host) => flag(!url.contains(host)),
            None => 1,
        },
        Err(_) => 1,
    }
}

pub fn dot_count(url: &str) -> i64 {
    count(url, ".")
}

pub fn www_count(url: &str) -> i64 {
    count(url, "www")
}

pub fn at_count(url: &str) -> i64 {
    count(url, "@")
}

pub fn dir_count(url: &str) -> i64 {
    UrlParts::parse(url).map_or(0, |p| count(p.path(), "/"))
}

pub fn double_slash_in_path_count(url: &str) -> i64 {
    UrlParts::parse(url).map_or(0, |p| count(p.path(), "//"))
}

pub fn is_shortened(url: &str, lexicon: &Lexicon) -> i64 {
    let short = UrlParts::parse(url)
        .ok()
        .and_then(|p| p.host().map(|h| lexicon.is_shortener_host(h)))
        .unwrap_or(false);
    flag(short)
}

pub fn https_count(url: &str) -> i64 {
    count(url, "https")
}

pub fn http_count(url: &str) -> i64 {
    count(url, "http")
}

pub fn percent_count(url: &str) -> i64 {
    count(url, "%")
}

pub fn question_count(url: &str) -> i64 {
    count(url, "?")
}

pub fn hyphen_count(url: &str) -> i64 {
    count(url, "-")
}

pub fn equals_count(url: &str) -> i64 {
    count(url, "=")
}

pub fn url_length(url: &str) -> i64 {
    url.chars().count() as i64
}

pub fn hostname_length(url: &str) -> i64 {
    UrlParts::parse(url)
        .ok()
        .and_then(|p| p.host().map(|h| h.chars().count() as i64))
        .unwrap_or(0)
}

pub fn has_suspicious_word(url: &str, lexicon: &Lexicon) -> i64 {
    flag(lexicon.contains_suspicious_word(url))
}

pub fn digit_count(url: &str) -> i64 {
    url.chars().filter(char::is_ascii_digit).count() as i64
}

pub fn letter_count(url: &str) -> i64 {
    url.chars().filter(|c| c.is_alphabetic()).count() as i64
}

/// Length of the segment between the first and second `/` of the path.
pub fn first_dir_length(url: &str) -> i64 {
    UrlParts::parse(url)
        .ok()
        .and_then(|p| p.path().split('/').nth(1).map(|s| s.chars().count() as i64))
        .unwrap_or(0)
}

/// Public suffix of the URL's host per the Public Suffix List.
pub fn tld_suffix(url: &str) -> Result<String, SuffixError> {
    let parts = UrlParts::parse(url)?;
    let host = parts.host().ok_or(SuffixError::NoHost)?;
    let host = host.trim_end_matches('.');
    let unknown = || SuffixError::Unknown(host.to_string());
    let suffix = psl::suffix(host.as_bytes())
        .filter(|s| s.is_known())
        .ok_or_else(unknown)?;
    std::str::from_utf8(suffix.as_bytes())
        .map(str::to_owned)
        .map_err(|_| unknown())
}

/// -1 when the suffix cannot be resolved; never 0 for a resolved host.
pub fn tld_length(url: &str) -> i64 {
    tld_suffix(url).map_or(-1, |s| s.chars().count() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_counts() {
        assert_eq!(dot_count("http://a.b.c.com"), 3);
        assert_eq!(hyphen_count("a-b-c"), 2);
        assert_eq!(digit_count("abc123"), 3);
        assert_eq!(letter_count("abc123"), 3);
        assert_eq!(www_count("http://www.wwww.com"), 2);
        assert_eq!(at_count("http://a@b@c"), 2);
        assert_eq!(https_count("https://x.com/?r=https://y"), 2);
        assert_eq!(http_count("https://x.com/?r=http://y"), 2);
        assert_eq!(percent_count("a%20b%2F"), 2);
        assert_eq!(question_count("a?b?"), 2);
        assert_eq!(equals_count("a=1&b=2"), 2);
    }

    #[test]
    fn ip_literals() {
        assert_eq!(has_ip_literal("http://192.168.0.1/path"), 1);
        assert_eq!(has_ip_literal("http://example.com"), 0);
        assert_eq!(has_ip_literal("http://0x7f.0x0.0x0.0x1/x"), 1);
        assert_eq!(has_ip_literal("http://[2001:db8::1]/"), 1);
        assert_eq!(has_ip_literal("http://256.1.1.1/"), 0);
        assert_eq!(has_ip_literal("192.168.0.1/path"), 0);
        assert_eq!(has_ip_literal("http://[bad/"), 0);
    }

    #[test]
    fn abnormal_host() {
        assert_eq!(has_abnormal_host("http://example.com/a"), 0);
        assert_eq!(has_abnormal_host("http://Example.com/a"), 1);
        assert_eq!(has_abnormal_host("example.com/a"), 1);
        assert_eq!(has_abnormal_host("http://[::1/"), 1);
    }

    #[test]
    fn path_counts() {
        assert_eq!(dir_count("http://x.com/a/b/c"), 3);
        assert_eq!(dir_count("http://x.com"), 0);
        assert_eq!(dir_count("x.com/a/b"), 2);
        assert_eq!(double_slash_in_path_count("http://x.com//evil.com//x"), 2);
        assert_eq!(double_slash_in_path_count("http://x.com/a?u=http://y"), 0);
    }

    #[test]
    fn control_whitespace_does_not_split_path() {
        assert_eq!(dir_count("http://x.com/a\n/b"), 2);
        assert_eq!(double_slash_in_path_count("http://x.com/\t/evil.com"), 1);
        assert_eq!(first_dir_length("http://x.com/log\r\nin/x"), 5);
    }

    #[test]
    fn shorteners() {
        let lex = Lexicon::default();
        assert_eq!(is_shortened("http://bit.ly/xyz", &lex), 1);
        assert_eq!(is_shortened("http://example.com", &lex), 0);
        assert_eq!(is_shortened("bit.ly/xyz", &lex), 0);
    }

    #[test]
    fn mixed_case_shortener_entries_match() {
        let lex = Lexicon::default();
        assert_eq!(is_shortened("http://BudURL.com/x", &lex), 1);
        assert_eq!(is_shortened("http://budurl.com/x", &lex), 1);
        assert_eq!(is_shortened("http://Just.as/x", &lex), 1);
        assert_eq!(is_shortened("http://BIT.LY/x", &lex), 1);
    }

    #[test]
    fn lengths() {
        assert_eq!(url_length("http://é.com"), 12);
        assert_eq!(hostname_length("http://user@www.example.com:8080/x"), 15);
        assert_eq!(hostname_length("not a url"), 0);
        assert_eq!(hostname_length("http://[::1/"), 0);
        assert_eq!(first_dir_length("http://x.com/login/verify"), 5);
        assert_eq!(first_dir_length("http://x.com/"), 0);
        assert_eq!(first_dir_length("http://x.com"), 0);
        assert_eq!(first_dir_length("x.com/abc"), 3);
    }

    #[test]
    fn suspicious_words() {
        let lex = Lexicon::default();
        assert_eq!(has_suspicious_word("http://secure-PayPal.com.evil.ru", &lex), 1);
        assert_eq!(has_suspicious_word("http://example.com/docs", &lex), 0);
    }

    #[test]
    fn tld_resolution() {
        assert_eq!(tld_length("http://example.com/x"), 3);
        assert_eq!(tld_length("https://shop.example.co.uk"), 5);
        assert_eq!(tld_suffix("http://example.com."), Ok("com".to_string()));
        assert_eq!(tld_length("example.com"), -1);
        assert_eq!(tld_suffix("example.com"), Err(SuffixError::NoHost));
        assert_eq!(tld_length("http://host.notarealtld"), -1);
        assert_eq!(tld_length("http://[::1/"), -1);
    }

    #[test]
    fn every_feature_is_total() {
        let lex = Lexicon::default();
        let inputs = [
            "",
            "no scheme here",
            "::::",
            "http://",
            "http://[",
            "//@@//",
            "ftp://ünïcødé.例え/パス?q=✓#frag",
            "\u{0}\t\n",
        ];
        for s in inputs {
            let values = [
                has_ip_literal(s),
                has_abnormal_host(s),
                dot_count(s),
                www_count(s),
                at_count(s),
                dir_count(s),
                double_slash_in_path_count(s),
                is_shortened(s, &lex),
                https_count(s),
                http_count(s),
                percent_count(s),
                question_count(s),
                hyphen_count(s),
                equals_count(s),
                url_length(s),
                hostname_length(s),
                has_suspicious_word(s, &lex),
                digit_count(s),
                letter_count(s),
                first_dir_length(s),
                tld_length(s),
            ];
            assert!(values.iter().all(|v| *v >= -1), "{s:?} -> {values:?}");
        }
    }
}
