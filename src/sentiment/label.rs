use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::warn;

/// The three canonical labels. Serialized case-exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Self::Positive, Self::Negative, Self::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| Error::validation(format!("unknown sentiment label: {}", s)))
    }
}

/// Coerces raw model output into a canonical label.
///
/// Only the first whitespace-delimited token counts. Anything that is not a label
/// after capitalization is corrected to `Neutral`; empty output is an error.
pub fn normalize_label(raw: &str) -> Result<Sentiment> {
    let token = raw.split_whitespace().next().ok_or(Error::EmptyModelOutput)?;
    let candidate = capitalize(token);

    match candidate.parse::<Sentiment>() {
        Ok(sentiment) => Ok(sentiment),
        Err(_) => {
            warn!("Model returned invalid sentiment: {}", candidate);
            Ok(Sentiment::Neutral)
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}
