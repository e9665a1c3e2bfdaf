use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::tone::fold;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMethod {
    #[default]
    Telex,
    Vni,
    Viqr,
}

impl InputMethod {
    pub const ALL: [InputMethod; 3] = [InputMethod::Telex, InputMethod::Vni, InputMethod::Viqr];

    pub fn as_str(self) -> &'static str {
        match self {
            InputMethod::Telex => "telex",
            InputMethod::Vni => "vni",
            InputMethod::Viqr => "viqr",
        }
    }

    #[inline]
    pub fn rules(self) -> &'static RuleTable {
        rules_for(self)
    }
}

impl fmt::Display for InputMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownInputMethod(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneRule {
    pub key: char,
    pub tone: u8,
}

/// `key` is stored lowercase and matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkRule {
    pub key: &'static str,
    pub lower: char,
    pub upper: char,
}

impl MarkRule {
    #[inline]
    pub fn result(&self, upper: bool) -> char {
        if upper { self.upper } else { self.lower }
    }
}

#[derive(Debug)]
pub struct RuleTable {
    pub method: InputMethod,
    pub tones: &'static [ToneRule],
    /// Longest key first.
    pub marks: &'static [MarkRule],
    /// Tone keys that spell an initial consonant cluster after these letters.
    pub onset_clusters: &'static [(char, &'static str)],
}

impl RuleTable {
    pub fn tone_for(&self, c: char) -> Option<u8> {
        let c = fold(c);
        self.tones.iter().find(|r| r.key == c).map(|r| r.tone)
    }

    pub fn is_onset_cluster(&self, prev: char, key: char) -> bool {
        let (prev, key) = (fold(prev), fold(key));
        self.onset_clusters
            .iter()
            .any(|&(k, before)| k == key && before.contains(prev))
    }

    /// Whether `c` is a tone key or completes a mark key.
    pub fn is_trigger(&self, c: char) -> bool {
        let c = fold(c);
        self.tone_for(c).is_some() || self.marks.iter().any(|m| m.key.ends_with(c))
    }
}

pub fn rules_for(method: InputMethod) -> &'static RuleTable {
    match method {
        InputMethod::Telex => &TELEX,
        InputMethod::Vni => &VNI,
        InputMethod::Viqr => &VIQR,
    }
}

const fn tone(key: char, tone: u8) -> ToneRule {
    ToneRule { key, tone }
}

const fn mark(key: &'static str, lower: char, upper: char) -> MarkRule {
    MarkRule { key, lower, upper }
}

static TELEX: RuleTable = RuleTable {
    method: InputMethod::Telex,
    tones: &[
        tone('z', 0),
        tone('s', 1),
        tone('f', 2),
        tone('r', 3),
        tone('x', 4),
        tone('j', 5),
    ],
    marks: &[
        mark("aa", 'â', 'Â'),
        mark("aw", 'ă', 'Ă'),
        mark("ee", 'ê', 'Ê'),
        mark("oo", 'ô', 'Ô'),
        mark("ow", 'ơ', 'Ơ'),
        mark("uw", 'ư', 'Ư'),
        mark("dd", 'đ', 'Đ'),
    ],
    // tr, pr, br, ...
    onset_clusters: &[('r', "tpfcbdgk")],
};

static VNI: RuleTable = RuleTable {
    method: InputMethod::Vni,
    tones: &[
        tone('0', 0),
        tone('1', 1),
        tone('2', 2),
        tone('3', 3),
        tone('4', 4),
        tone('5', 5),
    ],
    marks: &[
        mark("a6", 'â', 'Â'),
        mark("a8", 'ă', 'Ă'),
        mark("e6", 'ê', 'Ê'),
        mark("o6", 'ô', 'Ô'),
        mark("o7", 'ơ', 'Ơ'),
        mark("u7", 'ư', 'Ư'),
        mark("d9", 'đ', 'Đ'),
    ],
    onset_clusters: &[],
};

static VIQR: RuleTable = RuleTable {
    method: InputMethod::Viqr,
    tones: &[
        tone('\'', 1),
        tone('`', 2),
        tone('?', 3),
        tone('~', 4),
        tone('.', 5),
    ],
    marks: &[
        mark("a^", 'â', 'Â'),
        mark("a(", 'ă', 'Ă'),
        mark("e^", 'ê', 'Ê'),
        mark("o^", 'ô', 'Ô'),
        mark("o+", 'ơ', 'Ơ'),
        mark("u+", 'ư', 'Ư'),
        mark("dd", 'đ', 'Đ'),
    ],
    onset_clusters: &[],
};
