//! Locale selection for the language-bound models

use crate::error::AnalyzerError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Language whose readability coefficients and sentiment lexicon are used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "de")]
    German,
}

impl Locale {
    /// Canonical tag ("de")
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::German => "de",
        }
    }
}

impl FromStr for Locale {
    type Err = AnalyzerError;

    /// Accepts the bare language tag or a regional variant (`de-DE`, `de_AT`, ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let language = normalized
            .split(['-', '_'])
            .next()
            .unwrap_or_default();
        match language {
            "de" => Ok(Locale::German),
            _ => Err(AnalyzerError::UnsupportedLocale(s.trim().to_string())),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}
