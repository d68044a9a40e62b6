//! Lexicon-based sentiment model
//!
//! Each opinion word found in the text contributes a polarity and a
//! subjectivity value. A preceding intensifier scales both values; a
//! preceding negation flips the polarity and halves it. The text's polarity
//! and subjectivity are the means over all opinion words.
//!
//! Set phrases such as greetings ("Guten Tag", "Beste Grüße") carry no
//! opinion even though their first word would. They are matched as exact
//! two-word sequences and scored like unknown words.

use crate::error::{AnalyzerError, AnalyzerResult};
use crate::Locale;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

const GERMAN_LEXICON: &str = include_str!("../../data/sentiment_de.tsv");

/// Polarity factor applied to an opinion word after a negation
const NEGATION_FACTOR: f64 = -0.5;

/// Modifiers apply to an opinion word at most this many tokens later
const MAX_MODIFIER_GAP: usize = 2;

/// Inflection endings tried, in order, when a token has no exact entry
const INFLECTION_SUFFIXES: &[&str] = &["en", "er", "es", "em", "e", "n", "s"];

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[\p{L}\p{M}]+").expect("word pattern is a valid regex"))
}

/// A single lexicon entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LexiconEntry {
    /// Opinion word with its own polarity and subjectivity
    Opinion { polarity: f64, subjectivity: f64 },
    /// Scales the next opinion word (> 1 intensifies, < 1 softens)
    Intensifier(f64),
    /// Negates the next opinion word
    Negation,
}

/// Word list backing the sentiment model
#[derive(Debug, Clone, Default)]
pub struct SentimentLexicon {
    entries: HashMap<String, LexiconEntry>,
    phrases: HashSet<(String, String)>,
}

impl SentimentLexicon {
    /// Built-in lexicon for a locale
    pub fn for_locale(locale: Locale) -> AnalyzerResult<Self> {
        match locale {
            Locale::German => Self::parse(GERMAN_LEXICON),
        }
    }

    /// Parse the whitespace-separated lexicon format (`w`, `i`, `n`, `p` lines; `#` comments)
    pub fn parse(source: &str) -> AnalyzerResult<Self> {
        let mut entries = HashMap::new();
        let mut phrases = HashSet::new();
        for (index, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            let invalid = |reason: &str| AnalyzerError::Lexicon {
                line: index + 1,
                reason: reason.to_string(),
            };
            let (word, entry) = match fields.as_slice() {
                ["w", word, polarity, subjectivity] => {
                    let polarity = parse_number(polarity).ok_or_else(|| invalid("polarity is not a number"))?;
                    let subjectivity = parse_number(subjectivity)
                        .ok_or_else(|| invalid("subjectivity is not a number"))?;
                    if !(-1.0..=1.0).contains(&polarity) {
                        return Err(invalid("polarity outside [-1, 1]"));
                    }
                    if !(0.0..=1.0).contains(&subjectivity) {
                        return Err(invalid("subjectivity outside [0, 1]"));
                    }
                    (*word, LexiconEntry::Opinion { polarity, subjectivity })
                }
                ["i", word, intensity] => {
                    let intensity =
                        parse_number(intensity).ok_or_else(|| invalid("intensity is not a number"))?;
                    if intensity <= 0.0 {
                        return Err(invalid("intensity must be positive"));
                    }
                    (*word, LexiconEntry::Intensifier(intensity))
                }
                ["n", word] => (*word, LexiconEntry::Negation),
                ["p", first, second] => {
                    phrases.insert((first.to_lowercase(), second.to_lowercase()));
                    continue;
                }
                _ => return Err(invalid(
                    "expected `w <word> <polarity> <subjectivity>`, `i <word> <intensity>`, `n <word>` or `p <word> <word>`",
                )),
            };
            entries.insert(word.to_lowercase(), entry);
        }
        Ok(Self { entries, phrases })
    }

    /// Number of word entries; set phrases are not counted
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether two lowercase tokens form a set phrase
    pub fn is_phrase(&self, first: &str, second: &str) -> bool {
        self.phrases
            .contains(&(first.to_string(), second.to_string()))
    }

    /// Look up a lowercase token, falling back to its stem for inflected forms
    pub fn lookup(&self, token: &str) -> Option<LexiconEntry> {
        if let Some(entry) = self.entries.get(token) {
            return Some(*entry);
        }
        INFLECTION_SUFFIXES.iter().find_map(|suffix| {
            let stem = token.strip_suffix(suffix)?;
            if stem.chars().count() < 2 {
                return None;
            }
            self.entries.get(stem).copied()
        })
    }

    /// Polarity and subjectivity of `text`, unrounded. No opinion words gives (0, 0).
    pub fn score(&self, text: &str) -> Sentiment {
        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut hits = 0usize;

        let mut intensity = 1.0;
        let mut negated = false;
        let mut gap = 0usize;

        let tokens: Vec<String> = word_pattern()
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect();
        // tokens still to be skipped as part of a set phrase
        let mut in_phrase = 0usize;

        for (i, token) in tokens.iter().enumerate() {
            if in_phrase == 0
                && tokens
                    .get(i + 1)
                    .is_some_and(|next| self.is_phrase(token, next))
            {
                in_phrase = 2;
            }
            let entry = if in_phrase > 0 {
                in_phrase -= 1;
                None
            } else {
                self.lookup(token)
            };
            match entry {
                Some(LexiconEntry::Negation) => {
                    negated = !negated;
                    gap = 0;
                }
                Some(LexiconEntry::Intensifier(factor)) => {
                    intensity *= factor;
                    gap = 0;
                }
                Some(LexiconEntry::Opinion { polarity, subjectivity }) => {
                    let mut p = polarity * intensity;
                    if negated {
                        p *= NEGATION_FACTOR;
                    }
                    polarity_sum += p.clamp(-1.0, 1.0);
                    subjectivity_sum += (subjectivity * intensity).clamp(0.0, 1.0);
                    hits += 1;
                    intensity = 1.0;
                    negated = false;
                    gap = 0;
                }
                None => {
                    gap += 1;
                    if gap > MAX_MODIFIER_GAP {
                        intensity = 1.0;
                        negated = false;
                    }
                }
            }
        }

        if hits == 0 {
            return Sentiment::NEUTRAL;
        }
        Sentiment {
            polarity: (polarity_sum / hits as f64).clamp(-1.0, 1.0),
            subjectivity: (subjectivity_sum / hits as f64).clamp(0.0, 1.0),
        }
    }
}

fn parse_number(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Raw sentiment of a text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentiment {
    /// -1.0 (negative) to 1.0 (positive)
    pub polarity: f64,
    /// 0.0 (objective) to 1.0 (subjective)
    pub subjectivity: f64,
}

impl Sentiment {
    pub const NEUTRAL: Self = Self {
        polarity: 0.0,
        subjectivity: 0.0,
    };
}
