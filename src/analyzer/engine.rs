//! Analysis engine - holds the locale-bound models and runs them over review text

use crate::config::Config;
use crate::error::AnalyzerResult;
use crate::review::ReviewRecord;
use crate::{Locale, ReviewAnalysis, TextMetrics};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::feedback::{Feedback, DEFAULT_MIN_WORDS};
use super::readability::{self, round_to, ReadabilityCoefficients};
use super::sentiment::SentimentLexicon;
use super::words;

/// Decimal places kept for reported polarity
const POLARITY_DECIMALS: i32 = 3;

/// Immutable analyzer configuration: locale, readability coefficients and
/// sentiment lexicon. Build once and share; every method is a pure function
/// of its input.
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    locale: Locale,
    coefficients: ReadabilityCoefficients,
    lexicon: SentimentLexicon,
}

impl AnalysisEngine {
    /// Create an engine for a supported locale
    pub fn new(locale: Locale) -> AnalyzerResult<Self> {
        Ok(Self {
            locale,
            coefficients: ReadabilityCoefficients::for_locale(locale),
            lexicon: SentimentLexicon::for_locale(locale)?,
        })
    }

    /// Create an engine from a locale tag such as "de" or "de-DE".
    /// Fails with `UnsupportedLocale` for any other language.
    pub fn for_locale_tag(tag: &str) -> AnalyzerResult<Self> {
        Self::new(tag.parse()?)
    }

    /// Replace the built-in sentiment lexicon
    pub fn with_lexicon(mut self, lexicon: SentimentLexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn count_words(&self, text: &str) -> usize {
        words::count_words(text)
    }

    /// Reading ease for the engine's locale (180.0 for German text without words)
    pub fn readability(&self, text: &str) -> f64 {
        readability::readability(text, &self.coefficients)
    }

    /// `(polarity, subjectivity)`; polarity rounded to three decimals
    pub fn sentiment(&self, text: &str) -> (f64, f64) {
        let raw = self.lexicon.score(text);
        (round_to(raw.polarity, POLARITY_DECIMALS), raw.subjectivity)
    }

    /// All metrics for a review text
    pub fn analyze_text(&self, text: &str) -> TextMetrics {
        let (sentiment_polarity, sentiment_subjectivity) = self.sentiment(text);
        TextMetrics {
            word_count: self.count_words(text),
            readability_score: self.readability(text),
            sentiment_polarity,
            sentiment_subjectivity,
        }
    }

    /// Analyze a review file: plain text, or a JSON review record whose
    /// `content` is analyzed
    pub fn analyze(&self, review_path: &Path, config: Option<&Config>) -> Result<ReviewAnalysis> {
        let source = fs::read_to_string(review_path)
            .with_context(|| format!("Failed to read review file: {}", review_path.display()))?;
        let source = source.strip_prefix('\u{feff}').unwrap_or(&source);

        let record = if is_json(review_path) {
            let record: ReviewRecord = serde_json::from_str(source).with_context(|| {
                format!("Invalid review record: {}", review_path.display())
            })?;
            Some(record)
        } else {
            None
        };
        let text = record.as_ref().map(ReviewRecord::content).unwrap_or(source);

        let metrics = self.analyze_text(text);
        let min_words = config
            .and_then(|cfg| cfg.effective_for_file(review_path).min_words)
            .unwrap_or(DEFAULT_MIN_WORDS);

        Ok(ReviewAnalysis {
            file_path: review_path.to_path_buf(),
            readability_band: metrics.band(),
            tone: metrics.tone(),
            hints: Feedback::hints(&metrics, min_words),
            category: record.as_ref().map(ReviewRecord::category),
            product: record
                .as_ref()
                .map(|r| r.product().to_string())
                .filter(|p| !p.is_empty()),
            finalized: record.as_ref().map(ReviewRecord::is_finalized),
            metrics,
        })
    }

    /// Analyze multiple review files sequentially
    pub fn analyze_many(
        &self,
        paths: &[&Path],
        config: Option<&Config>,
    ) -> Vec<Result<ReviewAnalysis>> {
        paths.iter().map(|p| self.analyze(p, config)).collect()
    }

    /// Analyze multiple review files in parallel using rayon
    pub fn analyze_parallel(
        &self,
        paths: &[PathBuf],
        config: Option<&Config>,
    ) -> Vec<Result<ReviewAnalysis>> {
        use rayon::prelude::*;

        paths.par_iter().map(|p| self.analyze(p, config)).collect()
    }

    /// Get aggregate stats from multiple results
    pub fn aggregate_stats(results: &[ReviewAnalysis]) -> AggregateStats {
        if results.is_empty() {
            return AggregateStats::default();
        }

        let n = results.len() as f64;
        let total_words: usize = results.iter().map(|r| r.metrics.word_count).sum();
        let readability_sum: f64 = results.iter().map(|r| r.metrics.readability_score).sum();
        let polarity_sum: f64 = results.iter().map(|r| r.metrics.sentiment_polarity).sum();

        AggregateStats {
            files_analyzed: results.len(),
            total_words,
            average_readability: round_to(readability_sum / n, 2),
            average_polarity: round_to(polarity_sum / n, POLARITY_DECIMALS),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Aggregate statistics from multiple file analyses
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AggregateStats {
    /// Number of files analyzed
    pub files_analyzed: usize,
    /// Words across all reviews
    pub total_words: usize,
    /// Mean readability score
    pub average_readability: f64,
    /// Mean sentiment polarity
    pub average_polarity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::{ProductCategory, ReviewDraft};
    use crate::{AnalyzerError, ReadabilityBand, SentimentTone};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn engine() -> AnalysisEngine {
        AnalysisEngine::new(Locale::German).unwrap()
    }

    fn make_review_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(suffix).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn empty_text_yields_defaults() {
        let metrics = engine().analyze_text("");
        assert_eq!(metrics.word_count, 0);
        assert_eq!(metrics.sentiment_polarity, 0.0);
        assert_eq!(metrics.sentiment_subjectivity, 0.0);
        assert_eq!(metrics.readability_score, 180.0);
        assert_eq!(metrics, TextMetrics::EMPTY);
    }

    #[test]
    fn unsupported_locale_fails_loudly() {
        let err = AnalysisEngine::for_locale_tag("en").unwrap_err();
        assert_eq!(err, AnalyzerError::UnsupportedLocale("en".to_string()));
        assert!(AnalysisEngine::for_locale_tag("de-DE").is_ok());
    }

    #[test]
    fn polarity_is_rounded_to_three_decimals() {
        // (0.7 + 0.8 + -0.6) / 3 = 0.3
        let (p, _) = engine().sentiment("gut, toll und langweilig");
        assert_eq!(p, 0.3);

        // 0.7 * 1.3 / ... -> raw polarity with more than three decimals
        let e = engine();
        let raw = e.lexicon.score("sehr gut, eher schlecht");
        let (p, s) = e.sentiment("sehr gut, eher schlecht");
        assert_eq!(p, (raw.polarity * 1000.0).round() / 1000.0);
        assert_eq!(s, raw.subjectivity);
    }

    #[test]
    fn analyze_text_is_idempotent() {
        let e = engine();
        let text = "Die Reise war wunderbar, aber das Hotel war leider etwas laut.";
        let first = e.analyze_text(text);
        let second = e.analyze_text(text);
        assert_eq!(first, second);
        assert_eq!(first.word_count, 11);
        assert_eq!(first.tone(), SentimentTone::Positive);
    }

    #[test]
    fn analyze_plain_text_file() {
        let file = make_review_file(
            ".txt",
            "Das Buch ist spannend und sehr gut geschrieben. Ich kann es empfehlen.",
        );
        let result = engine().analyze(file.path(), None).unwrap();
        assert_eq!(result.metrics.word_count, 12);
        assert!(result.metrics.sentiment_polarity > 0.0);
        assert_eq!(result.category, None);
        assert_eq!(result.finalized, None);
        assert_eq!(result.readability_band, ReadabilityBand::from_score(result.metrics.readability_score));
        assert!(result.hints.iter().any(|h| h.contains("Mehr Details")));
    }

    #[test]
    fn analyze_json_review_record() {
        let mut draft = ReviewDraft::new(ProductCategory::FoodDelivery).with_product("Pizza Roma");
        draft.set_content("Die Pizza kam kalt und viel zu spät.");
        let review = draft.finalize("Nicht empfehlenswert.");
        let file = make_review_file(".json", &serde_json::to_string(&review).unwrap());

        let result = engine().analyze(file.path(), None).unwrap();
        assert_eq!(result.category, Some(ProductCategory::FoodDelivery));
        assert_eq!(result.product.as_deref(), Some("Pizza Roma"));
        assert_eq!(result.finalized, Some(true));
        // body plus conclusion
        assert_eq!(result.metrics.word_count, 10);
        assert_eq!(result.tone, SentimentTone::Negative);
    }

    #[test]
    fn analyze_invalid_json_is_error() {
        let file = make_review_file(".json", "{ not json");
        let err = engine().analyze(file.path(), None).unwrap_err();
        assert!(err.to_string().contains("Invalid review record"));
    }

    #[test]
    fn analyze_missing_file_is_error() {
        let err = engine()
            .analyze(Path::new("does/not/exist.txt"), None)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read review file"));
    }

    #[test]
    fn bom_is_ignored() {
        let file = make_review_file(".txt", "\u{feff}gut");
        let result = engine().analyze(file.path(), None).unwrap();
        assert_eq!(result.metrics.word_count, 1);
        assert_eq!(result.metrics.sentiment_polarity, 0.7);
    }

    #[test]
    fn config_min_words_changes_hints() {
        let file = make_review_file(".txt", "Kurz und gut.");
        let config: Config = serde_json::from_str(r#"{ "minWords": 3 }"#).unwrap();
        let result = engine().analyze(file.path(), Some(&config)).unwrap();
        assert!(!result.hints.iter().any(|h| h.contains("Mehr Details")));
    }

    #[test]
    fn parallel_matches_sequential() {
        let a = make_review_file(".txt", "Toll!");
        let b = make_review_file(".txt", "Schlecht und langweilig.");
        let e = engine();
        let paths = vec![a.path().to_path_buf(), b.path().to_path_buf()];
        let parallel: Vec<_> = e
            .analyze_parallel(&paths, None)
            .into_iter()
            .map(|r| r.unwrap().metrics)
            .collect();
        let sequential: Vec<_> = e
            .analyze_many(&[a.path(), b.path()], None)
            .into_iter()
            .map(|r| r.unwrap().metrics)
            .collect();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn aggregate_stats_means() {
        let a = make_review_file(".txt", "gut");
        let b = make_review_file(".txt", "schlecht");
        let e = engine();
        let results = vec![
            e.analyze(a.path(), None).unwrap(),
            e.analyze(b.path(), None).unwrap(),
        ];
        let stats = AnalysisEngine::aggregate_stats(&results);
        assert_eq!(stats.files_analyzed, 2);
        assert_eq!(stats.total_words, 2);
        assert_eq!(stats.average_polarity, 0.0);
        assert_eq!(AnalysisEngine::aggregate_stats(&[]), AggregateStats::default());
    }
}
