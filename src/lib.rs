//! review-lens: readability and sentiment metrics for German product reviews
//!
//! This library computes word count, reading ease and sentiment of review
//! text while it is being written, plus the experience score of the person
//! writing it.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod locale;
pub mod participant;
pub mod reporter;
pub mod review;
pub mod watcher;

pub use error::{AnalyzerError, AnalyzerResult};
pub use locale::Locale;

use review::ProductCategory;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metrics of one review text. A pure function of text and locale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMetrics {
    /// Runs of non-whitespace characters
    pub word_count: usize,
    /// Flesch reading ease for the locale; higher is easier. Not clamped.
    pub readability_score: f64,
    /// -1.0 (negative) to 1.0 (positive), three decimals
    pub sentiment_polarity: f64,
    /// 0.0 (objective) to 1.0 (subjective)
    pub sentiment_subjectivity: f64,
}

impl TextMetrics {
    /// Metrics of an empty German text
    pub const EMPTY: TextMetrics = TextMetrics {
        word_count: 0,
        readability_score: 180.0,
        sentiment_polarity: 0.0,
        sentiment_subjectivity: 0.0,
    };

    pub fn band(&self) -> ReadabilityBand {
        ReadabilityBand::from_score(self.readability_score)
    }

    pub fn tone(&self) -> SentimentTone {
        SentimentTone::from_polarity(self.sentiment_polarity)
    }
}

/// Reading-ease band (Amstad scale)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadabilityBand {
    VeryEasy,
    Easy,
    FairlyEasy,
    Standard,
    FairlyDifficult,
    Difficult,
    VeryDifficult,
}

impl ReadabilityBand {
    pub const ALL: [ReadabilityBand; 7] = [
        ReadabilityBand::VeryEasy,
        ReadabilityBand::Easy,
        ReadabilityBand::FairlyEasy,
        ReadabilityBand::Standard,
        ReadabilityBand::FairlyDifficult,
        ReadabilityBand::Difficult,
        ReadabilityBand::VeryDifficult,
    ];

    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => ReadabilityBand::VeryEasy,
            s if s >= 80.0 => ReadabilityBand::Easy,
            s if s >= 70.0 => ReadabilityBand::FairlyEasy,
            s if s >= 60.0 => ReadabilityBand::Standard,
            s if s >= 50.0 => ReadabilityBand::FairlyDifficult,
            s if s >= 30.0 => ReadabilityBand::Difficult,
            _ => ReadabilityBand::VeryDifficult,
        }
    }
}

impl std::fmt::Display for ReadabilityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadabilityBand::VeryEasy => write!(f, "very easy"),
            ReadabilityBand::Easy => write!(f, "easy"),
            ReadabilityBand::FairlyEasy => write!(f, "fairly easy"),
            ReadabilityBand::Standard => write!(f, "standard"),
            ReadabilityBand::FairlyDifficult => write!(f, "fairly difficult"),
            ReadabilityBand::Difficult => write!(f, "difficult"),
            ReadabilityBand::VeryDifficult => write!(f, "very difficult"),
        }
    }
}

/// Overall tone derived from polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentTone {
    Negative,
    Neutral,
    Positive,
}

impl SentimentTone {
    /// Polarity beyond this distance from zero is no longer neutral
    pub const NEUTRAL_BAND: f64 = 0.1;

    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > Self::NEUTRAL_BAND {
            SentimentTone::Positive
        } else if polarity < -Self::NEUTRAL_BAND {
            SentimentTone::Negative
        } else {
            SentimentTone::Neutral
        }
    }
}

impl std::fmt::Display for SentimentTone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentTone::Negative => write!(f, "negative"),
            SentimentTone::Neutral => write!(f, "neutral"),
            SentimentTone::Positive => write!(f, "positive"),
        }
    }
}

/// Result of analyzing one review file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAnalysis {
    /// Path to the analyzed review
    pub file_path: PathBuf,
    pub metrics: TextMetrics,
    pub readability_band: ReadabilityBand,
    pub tone: SentimentTone,
    /// Writing hints, most important first
    pub hints: Vec<String>,
    /// Product category (JSON review records only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
    /// Reviewed product (JSON review records only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    /// Whether the record was finalized (JSON review records only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalized: Option<bool>,
}

/// Public API: metrics for a text in the given locale.
pub fn analyze_text(text: &str, locale: Locale) -> AnalyzerResult<TextMetrics> {
    let engine = analyzer::AnalysisEngine::new(locale)?;
    Ok(engine.analyze_text(text))
}

/// Public API: analyze a single review file. Used by editors and other programmatic consumers.
///
/// * `path` - path to the review file (`.txt`, `.md`, `.review` or a JSON review record)
/// * `work_dir` - directory where the config search starts
/// * `config_path` - optional path to .reviewlensrc.json; if None, searches from work_dir
pub fn analyze_file(
    path: &std::path::Path,
    work_dir: &std::path::Path,
    config_path: Option<&std::path::Path>,
) -> anyhow::Result<ReviewAnalysis> {
    let config = crate::config::load_config(work_dir, config_path)?;
    let engine = analyzer::AnalysisEngine::new(config.locale()?)?;
    engine.analyze(path, Some(&config))
}
