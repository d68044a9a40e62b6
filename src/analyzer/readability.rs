//! Flesch Reading Ease with per-locale coefficients

use super::syllables::count_syllables;
use super::words::letters_only;
use crate::Locale;

/// Sentence fragments with this many words or fewer are not counted as
/// sentences (abbreviations such as "z. B." or "d. h." split on periods).
const MIN_WORDS_PER_SENTENCE: usize = 3;

/// Coefficients of `base - sentence_length * ASL - syllables_per_word * ASW`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadabilityCoefficients {
    pub base: f64,
    pub sentence_length: f64,
    pub syllables_per_word: f64,
}

impl ReadabilityCoefficients {
    /// Amstad's adaptation of Flesch Reading Ease for German
    pub const GERMAN: Self = Self {
        base: 180.0,
        sentence_length: 1.0,
        syllables_per_word: 58.5,
    };

    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::German => Self::GERMAN,
        }
    }

    /// Score for a text with zero words: both averages are zero, leaving the base
    pub fn empty_text_score(&self) -> f64 {
        self.base
    }
}

/// Word, sentence and syllable counts feeding the formula
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextCounts {
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
}

impl TextCounts {
    pub fn of(text: &str) -> Self {
        let mut words = 0;
        let mut syllables = 0;
        for word in text.split_whitespace().filter_map(letters_only) {
            words += 1;
            syllables += count_syllables(word);
        }
        Self {
            words,
            sentences: count_sentences(text),
            syllables,
        }
    }

    /// Average sentence length (words per sentence), 0 without sentences
    pub fn avg_sentence_length(&self) -> f64 {
        if self.sentences == 0 {
            0.0
        } else {
            self.words as f64 / self.sentences as f64
        }
    }

    /// Average syllables per word, 0 without words
    pub fn avg_syllables_per_word(&self) -> f64 {
        if self.words == 0 {
            0.0
        } else {
            self.syllables as f64 / self.words as f64
        }
    }
}

/// Count sentences: fragments between `.`, `!` and `?` that carry at least
/// `MIN_WORDS_PER_SENTENCE` words. Always at least 1, so text without
/// terminal punctuation is a single sentence.
pub fn count_sentences(text: &str) -> usize {
    let counted = text
        .split(['.', '!', '?'])
        .filter(|fragment| {
            fragment.split_whitespace().filter_map(letters_only).count() >= MIN_WORDS_PER_SENTENCE
        })
        .count();
    counted.max(1)
}

/// Reading ease of `text`, rounded to two decimals. Not clamped: very long
/// sentences go below 0 and very short words can exceed 100.
pub fn readability(text: &str, coefficients: &ReadabilityCoefficients) -> f64 {
    let counts = TextCounts::of(text);
    if counts.words == 0 {
        return coefficients.empty_text_score();
    }
    let score = coefficients.base
        - coefficients.sentence_length * counts.avg_sentence_length()
        - coefficients.syllables_per_word * counts.avg_syllables_per_word();
    round_to(score, 2)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    const DE: ReadabilityCoefficients = ReadabilityCoefficients::GERMAN;

    #[test]
    fn empty_text_returns_base_sentinel() {
        assert_eq!(readability("", &DE), 180.0);
        assert_eq!(readability("   \n", &DE), 180.0);
        assert_eq!(readability("?!.", &DE), 180.0);
    }

    #[test]
    fn single_character_does_not_panic() {
        // 1 word, 1 sentence, 1 syllable: 180 - 1 - 58.5
        assert_eq!(readability("a", &DE), 120.5);
    }

    #[test]
    fn text_without_terminal_punctuation_is_one_sentence() {
        assert_eq!(count_sentences("das Buch war gut"), 1);
        // 4 words, 1 sentence, 4 syllables: 180 - 4 - 58.5 = 117.5
        assert_eq!(readability("das Buch war gut", &DE), 117.5);
    }

    #[test]
    fn counts_sentences_and_skips_abbreviations() {
        let text = "Das Buch war spannend. Die Figuren sind z. B. sehr lebendig! Lohnt es sich?";
        // "B" and "sehr lebendig" are too short to count; "Lohnt es sich" has three words
        assert_eq!(count_sentences(text), 3);
    }

    #[test]
    fn known_german_score() {
        // 8 words, 2 sentences, syllables: Die(1) Reise(2) war(1) schön(1) Das(1) Essen(2) war(1) gut(1) = 10
        let text = "Die Reise war schön. Das Essen war gut.";
        let counts = TextCounts::of(text);
        assert_eq!(counts, TextCounts { words: 8, sentences: 2, syllables: 10 });
        // 180 - 4 - 58.5 * 1.25 = 102.875 -> 102.88
        assert_eq!(readability(text, &DE), 102.88);
    }

    #[test]
    fn long_sentences_score_below_zero_unclamped() {
        let text = format!("{}.", vec!["Verantwortungsbewusstsein"; 60].join(" "));
        let score = readability(&text, &DE);
        assert!(score < 0.0, "expected negative score, got {}", score);
    }

    #[test]
    fn long_word_without_spaces() {
        let text = "x".repeat(50_000);
        assert_eq!(readability(&text, &DE), 120.5);
    }
}
