//! Maps classifier class ids onto the closed label set.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Label {
    Safe,
    Defacement,
    Malware,
    Phishing,
    /// Class id outside the trained mapping. Never treated as safe.
    Unknown,
}

impl Label {
    pub fn from_class_id(id: i64) -> Self {
        match id {
            0 => Label::Safe,
            1 => Label::Defacement,
            2 => Label::Malware,
            3 => Label::Phishing,
            _ => Label::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Safe => "SAFE",
            Label::Defacement => "DEFACEMENT",
            Label::Malware => "MALWARE",
            Label::Phishing => "PHISHING",
            Label::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
