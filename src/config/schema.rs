//! Config schema and deserialization

use crate::error::AnalyzerResult;
use crate::Locale;
use serde::Deserialize;
use std::path::Path;

/// File name endings treated as reviews when no `reviewPatterns` are configured
pub const DEFAULT_REVIEW_PATTERNS: &[&str] = &[".txt", ".md", ".review", ".review.json"];

/// Per-path override configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverride {
    /// Glob patterns this override applies to
    pub files: Vec<String>,

    /// Optional minimum word count for matched files
    #[serde(default)]
    pub min_words: Option<usize>,
}

/// Root config structure for .reviewlensrc.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default)]
    pub extends: Option<String>,

    /// Locale tag for readability and sentiment models. Default: "de"
    #[serde(default)]
    pub locale: Option<String>,

    /// Minimum word count per review (exit 1 if a review is shorter)
    #[serde(default)]
    pub min_words: Option<usize>,

    /// Glob patterns for files/directories to exclude from analysis
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Custom review file endings (default: .txt, .md, .review, .review.json)
    #[serde(default)]
    pub review_patterns: Vec<String>,

    /// Directory to search for reviews recursively (relative to the path given on the command line)
    #[serde(default)]
    pub review_root: Option<String>,

    /// Per-path configuration overrides
    #[serde(default)]
    pub overrides: Vec<ConfigOverride>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli_min_words: Option<usize>, cli_locale: Option<&str>) -> Self {
        if cli_min_words.is_some() {
            self.min_words = cli_min_words;
        }
        if let Some(locale) = cli_locale {
            self.locale = Some(locale.to_string());
        }
        self
    }

    /// Configured locale, German when unset. Unknown tags are an error.
    pub fn locale(&self) -> AnalyzerResult<Locale> {
        match self.locale.as_deref() {
            Some(tag) => tag.parse(),
            None => Ok(Locale::default()),
        }
    }

    /// Get effective config for a specific file path, applying overrides
    pub fn effective_for_file(&self, file_path: &Path) -> EffectiveConfig {
        let mut effective = EffectiveConfig {
            min_words: self.min_words,
        };

        // Apply matching overrides in order
        for override_cfg in &self.overrides {
            if Self::matches_override(file_path, &override_cfg.files) {
                if let Some(min_words) = override_cfg.min_words {
                    effective.min_words = Some(min_words);
                }
            }
        }

        effective
    }

    /// Check if a file path matches any of the override patterns
    fn matches_override(file_path: &Path, patterns: &[String]) -> bool {
        let path_str = file_path.to_string_lossy();
        for pattern in patterns {
            if let Ok(glob) = globset::Glob::new(pattern) {
                let matcher = glob.compile_matcher();
                if matcher.is_match(file_path)
                    || path_str.contains(pattern.trim_start_matches("**/"))
                {
                    return true;
                }
            }
        }
        false
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        // Base values are overridden by this config's values
        if self.locale.is_none() {
            self.locale = base.locale;
        }
        if self.min_words.is_none() {
            self.min_words = base.min_words;
        }
        if self.extends.is_none() {
            self.extends = base.extends;
        }

        // Merge ignore patterns
        let mut all_ignores = base.ignore;
        all_ignores.append(&mut self.ignore);
        self.ignore = all_ignores;

        if self.review_patterns.is_empty() {
            self.review_patterns = base.review_patterns;
        }
        if self.review_root.is_none() {
            self.review_root = base.review_root;
        }

        // Prepend base overrides
        let mut all_overrides = base.overrides;
        all_overrides.append(&mut self.overrides);
        self.overrides = all_overrides;
    }

    /// Review file endings to collect
    pub fn get_review_patterns(&self) -> Vec<&str> {
        if self.review_patterns.is_empty() {
            DEFAULT_REVIEW_PATTERNS.to_vec()
        } else {
            self.review_patterns.iter().map(|s| s.as_str()).collect()
        }
    }
}

/// Effective configuration for a specific file (after applying overrides)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub min_words: Option<usize>,
}
