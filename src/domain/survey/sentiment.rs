//! Keyword-count sentiment labelling for survey answers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

pub static POSITIVE_WORDS: [&str; 8] = [
    "good",
    "great",
    "excellent",
    "happy",
    "satisfied",
    "love",
    "helpful",
    "amazing",
];

pub static NEGATIVE_WORDS: [&str; 8] = [
    "bad",
    "poor",
    "terrible",
    "unhappy",
    "disappointed",
    "slow",
    "rude",
    "awful",
];

/// Sentiment label of an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            "negative" => Ok(Sentiment::Negative),
            other => Err(ValidationError::invalid_format(
                "sentiment",
                format!("unknown sentiment '{}'", other),
            )),
        }
    }
}

/// Positive and negative keyword hits in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeywordCounts {
    pub positive: usize,
    pub negative: usize,
}

impl KeywordCounts {
    pub fn sentiment(&self) -> Sentiment {
        use std::cmp::Ordering;
        match self.positive.cmp(&self.negative) {
            Ordering::Greater => Sentiment::Positive,
            Ordering::Less => Sentiment::Negative,
            Ordering::Equal => Sentiment::Neutral,
        }
    }
}

/// Counts keyword occurrences in the lower-cased text.
///
/// Words are split on anything that is not a letter, digit or apostrophe,
/// so "unhappy" only counts as negative and never as "happy".
pub fn count_keywords(text: &str) -> KeywordCounts {
    let lowered = text.to_lowercase();
    let mut counts = KeywordCounts::default();

    for word in lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|w| !w.is_empty())
    {
        if POSITIVE_WORDS.contains(&word) {
            counts.positive += 1;
        } else if NEGATIVE_WORDS.contains(&word) {
            counts.negative += 1;
        }
    }

    counts
}

/// Majority of keyword hits wins; ties are neutral.
pub fn analyze(text: &str) -> Sentiment {
    count_keywords(text).sentiment()
}
