//! Writing feedback derived from text metrics
//!
//! Hints and descriptions are German, like the reviews they refer to.

use crate::{ReadabilityBand, SentimentTone, TextMetrics};

/// Reviews shorter than this get a "more detail" hint unless configured otherwise
pub const DEFAULT_MIN_WORDS: usize = 50;

/// Readability below this suggests shorter sentences and words
const HARD_TO_READ_BELOW: f64 = 50.0;
/// Subjectivity above this suggests adding concrete observations
const VERY_SUBJECTIVE_ABOVE: f64 = 0.8;
/// Subjectivity below this (with enough text) suggests stating an opinion
const VERY_OBJECTIVE_BELOW: f64 = 0.2;

/// Generates hints shown next to the metrics while a review is edited
pub struct Feedback;

impl Feedback {
    /// Describe a readability band
    pub fn band_description(band: ReadabilityBand) -> &'static str {
        match band {
            ReadabilityBand::VeryEasy => "Sehr leicht: kurze Sätze und kurze Wörter",
            ReadabilityBand::Easy => "Leicht: auf einen Blick verständlich",
            ReadabilityBand::FairlyEasy => "Eher leicht: für die meisten gut lesbar",
            ReadabilityBand::Standard => "Mittel: typisch für Alltagstexte",
            ReadabilityBand::FairlyDifficult => "Eher schwer: erfordert etwas Konzentration",
            ReadabilityBand::Difficult => "Schwer: lange Sätze oder viele lange Wörter",
            ReadabilityBand::VeryDifficult => "Sehr schwer: wissenschaftlicher oder juristischer Stil",
        }
    }

    /// Describe a sentiment tone
    pub fn tone_description(tone: SentimentTone) -> &'static str {
        match tone {
            SentimentTone::Positive => "Die Rezension klingt positiv",
            SentimentTone::Neutral => "Die Rezension klingt neutral oder gemischt",
            SentimentTone::Negative => "Die Rezension klingt negativ",
        }
    }

    /// Hints for improving the review, most important first
    pub fn hints(metrics: &TextMetrics, min_words: usize) -> Vec<String> {
        let mut hints = Vec::new();

        if metrics.word_count == 0 {
            hints.push("Die Rezension ist noch leer. Beginne mit deinem Gesamteindruck.".to_string());
            return hints;
        }

        if metrics.word_count < min_words {
            hints.push(format!(
                "Mehr Details: bisher {} Wörter, mindestens {} sind das Ziel",
                metrics.word_count, min_words
            ));
        }

        if metrics.readability_score < HARD_TO_READ_BELOW {
            hints.push(
                "Teile lange Sätze und wähle kürzere Wörter, damit sich die Rezension leichter liest"
                    .to_string(),
            );
        }

        if metrics.sentiment_subjectivity > VERY_SUBJECTIVE_ABOVE {
            hints.push(
                "Belege deine Meinung mit konkreten Beobachtungen (was genau war gut oder schlecht?)"
                    .to_string(),
            );
        } else if metrics.sentiment_subjectivity < VERY_OBJECTIVE_BELOW
            && metrics.word_count >= min_words
        {
            hints.push("Sag, wie es dir gefallen hat. Die Rezension klingt rein sachlich.".to_string());
        }

        hints
    }
}
