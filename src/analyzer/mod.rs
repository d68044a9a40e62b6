//! Analyzer module - review text metrics

pub mod engine;
pub mod experience;
pub mod feedback;
pub mod readability;
pub mod sentiment;
pub mod syllables;
pub mod words;

pub use engine::{AggregateStats, AnalysisEngine};
pub use experience::{aggregate, ExperienceProfile};
pub use feedback::Feedback;
pub use readability::ReadabilityCoefficients;
pub use sentiment::{Sentiment, SentimentLexicon};
pub use words::count_words;
