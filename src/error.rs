//! Error types for the analyzer core

use thiserror::Error;

/// Errors raised while building or configuring an analyzer.
///
/// Degenerate text (empty, whitespace, punctuation only) is never an error;
/// it resolves to default metrics instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    /// No readability or sentiment model exists for this locale tag
    #[error("unsupported locale '{0}' (supported: de)")]
    UnsupportedLocale(String),

    /// A sentiment lexicon line could not be parsed
    #[error("invalid sentiment lexicon entry on line {line}: {reason}")]
    Lexicon { line: usize, reason: String },
}

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
