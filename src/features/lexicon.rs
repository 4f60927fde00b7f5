//! Static word lists consumed by the lexical features.

use crate::config::LexiconConfig;

/// Known URL-shortener host fragments.
pub const DEFAULT_SHORTENERS: &[&str] = &[
    "bit.ly", "goo.gl", "shorte.st", "go2l.ink", "x.co", "ow.ly", "t.co", "tinyurl", "tr.im",
    "is.gd", "cli.gs", "yfrog.com", "migre.me", "ff.im", "tiny.cc", "url4.eu", "twit.ac",
    "su.pr", "twurl.nl", "snipurl.com", "short.to", "BudURL.com", "ping.fm", "post.ly",
    "Just.as", "bkite.com", "snipr.com", "fic.kr", "loopt.us", "doiop.com", "short.ie",
    "kl.am", "wp.me", "rubyurl.com", "om.ly", "to.ly", "bit.do", "lnkd.in", "db.tt", "qr.ae",
    "adf.ly", "bitly.com", "cur.lv", "tinyurl.com", "ity.im", "q.gs", "po.st", "bc.vc",
    "twitthis.com", "u.to", "j.mp", "buzurl.com", "cutt.us", "u.bb", "yourls.org",
    "prettylinkpro.com", "scrnch.me", "filoops.info", "vzturl.com", "qr.net", "1url.com",
    "tweez.me", "v.gd", "link.zip.net",
];

/// Brand and credential-phishing terms.
pub const DEFAULT_SUSPICIOUS_WORDS: &[&str] = &[
    "PayPal", "login", "signin", "bank", "account", "update", "free", "lucky", "service",
    "bonus", "ebayisapi", "webscr",
];

#[derive(Debug, Clone)]
pub struct Lexicon {
    /// Both lists stored lowercased; hosts arrive lowercased from the splitter
    shorteners: Vec<String>,
    suspicious_words: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(
            DEFAULT_SHORTENERS.iter().copied(),
            DEFAULT_SUSPICIOUS_WORDS.iter().copied(),
        )
    }
}

impl Lexicon {
    /// Empty entries are dropped; they would match every input.
    pub fn new<S, W>(shorteners: S, suspicious_words: W) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        W: IntoIterator,
        W::Item: AsRef<str>,
    {
        Self {
            shorteners: shorteners
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
            suspicious_words: suspicious_words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn from_config(config: &LexiconConfig) -> Self {
        Self::new(&config.shorteners, &config.suspicious_words)
    }

    /// Substring match of any shortener entry in an already lowercased `host`.
    pub fn is_shortener_host(&self, host: &str) -> bool {
        self.shorteners.iter().any(|s| host.contains(s.as_str()))
    }

    pub fn contains_suspicious_word(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.suspicious_words.iter().any(|w| lower.contains(w.as_str()))
    }
}
