//! Console reporter with colored output

use crate::analyzer::engine::AggregateStats;
use crate::analyzer::Feedback;
use crate::{ReadabilityBand, ReviewAnalysis, SentimentTone};
use colored::Colorize;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single analysis result
    pub fn report(&self, result: &ReviewAnalysis) {
        println!("{}", self.render(result));
    }

    /// Report multiple results with summary
    pub fn report_many(&self, results: &[ReviewAnalysis], stats: &AggregateStats) {
        for result in results {
            self.report(result);
            println!("{}", "─".repeat(60));
        }

        println!("{}", self.render_summary(stats));
    }

    /// Report in quiet mode (one line per file)
    pub fn report_quiet(&self, result: &ReviewAnalysis) {
        println!("{}", self.render_quiet(result));
    }

    pub fn render_quiet(&self, result: &ReviewAnalysis) -> String {
        let m = &result.metrics;
        format!(
            "{}: {} words, readability {:.2} ({}), polarity {:.3}, subjectivity {:.2}",
            result.file_path.display(),
            m.word_count,
            m.readability_score,
            self.paint_band(result.readability_band),
            m.sentiment_polarity,
            m.sentiment_subjectivity
        )
    }

    /// Full report for one review as a string
    pub fn render(&self, result: &ReviewAnalysis) -> String {
        let m = &result.metrics;
        let mut out = Vec::new();

        out.push(String::new());
        out.push(self.bold(&format!("📝 Review Analysis: {}", result.file_path.display())));
        if let Some(category) = result.category {
            let product = result.product.as_deref().unwrap_or("-");
            let state = match result.finalized {
                Some(true) => "finalized",
                _ => "draft",
            };
            out.push(format!("   Category: {} | Product: {} | {}", category, product, state));
        }
        out.push(String::new());

        out.push(format!("   Words:        {}", m.word_count));
        out.push(format!(
            "   Readability:  {} {:>7.2} {}",
            self.readability_bar(m.readability_score),
            m.readability_score,
            self.paint_band(result.readability_band)
        ));
        if self.verbose {
            out.push(format!(
                "                 {}",
                self.dim(Feedback::band_description(result.readability_band))
            ));
        }
        out.push(format!(
            "   Polarity:     {} {:>7.3} {}",
            self.polarity_bar(m.sentiment_polarity),
            m.sentiment_polarity,
            self.paint_tone(result.tone)
        ));
        out.push(format!(
            "   Subjectivity: {} {:>7.2}",
            self.unit_bar(m.sentiment_subjectivity),
            m.sentiment_subjectivity
        ));
        if self.verbose {
            out.push(format!(
                "                 {}",
                self.dim(Feedback::tone_description(result.tone))
            ));
        }

        if !result.hints.is_empty() {
            out.push(String::new());
            out.push(format!("   {}", self.bold("Hints:")));
            let shown = if self.verbose { result.hints.len() } else { 3 };
            for hint in result.hints.iter().take(shown) {
                let arrow = if self.use_colors {
                    "→".cyan().to_string()
                } else {
                    "→".to_string()
                };
                out.push(format!("   {} {}", arrow, hint));
            }
        }

        out.join("\n")
    }

    pub fn render_summary(&self, stats: &AggregateStats) -> String {
        let rule = "═".repeat(60);
        [
            String::new(),
            rule.clone(),
            self.bold("Summary"),
            rule,
            format!("   Files analyzed:      {}", stats.files_analyzed),
            format!("   Total words:         {}", stats.total_words),
            format!("   Average readability: {:.2}", stats.average_readability),
            format!("   Average polarity:    {:.3}", stats.average_polarity),
            String::new(),
        ]
        .join("\n")
    }

    fn bold(&self, s: &str) -> String {
        if self.use_colors {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn dim(&self, s: &str) -> String {
        if self.use_colors {
            s.dimmed().to_string()
        } else {
            s.to_string()
        }
    }

    fn paint_band(&self, band: ReadabilityBand) -> String {
        let s = band.to_string();
        if !self.use_colors {
            return s;
        }
        match band {
            ReadabilityBand::VeryEasy | ReadabilityBand::Easy => s.green().bold().to_string(),
            ReadabilityBand::FairlyEasy | ReadabilityBand::Standard => s.green().to_string(),
            ReadabilityBand::FairlyDifficult => s.yellow().to_string(),
            ReadabilityBand::Difficult => s.red().to_string(),
            ReadabilityBand::VeryDifficult => s.red().bold().to_string(),
        }
    }

    fn paint_tone(&self, tone: SentimentTone) -> String {
        let s = tone.to_string();
        if !self.use_colors {
            return s;
        }
        match tone {
            SentimentTone::Positive => s.green().to_string(),
            SentimentTone::Neutral => s.normal().to_string(),
            SentimentTone::Negative => s.red().to_string(),
        }
    }

    /// 20-cell bar over [0, 100]; scores outside are shown as empty or full
    fn readability_bar(&self, score: f64) -> String {
        let filled = ((score.clamp(0.0, 100.0) / 100.0) * 20.0).round() as usize;
        format!("[{}{}]", "█".repeat(filled), "░".repeat(20 - filled))
    }

    /// 20-cell bar over [-1, 1]
    fn polarity_bar(&self, polarity: f64) -> String {
        self.unit_bar((polarity.clamp(-1.0, 1.0) + 1.0) / 2.0)
    }

    /// 20-cell bar over [0, 1]
    fn unit_bar(&self, value: f64) -> String {
        let filled = (value.clamp(0.0, 1.0) * 20.0).round() as usize;
        format!("[{}{}]", "▓".repeat(filled), "░".repeat(20 - filled))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::ProductCategory;
    use crate::TextMetrics;
    use std::path::PathBuf;

    fn make_result(hints: Vec<&str>) -> ReviewAnalysis {
        let metrics = TextMetrics {
            word_count: 42,
            readability_score: 64.5,
            sentiment_polarity: -0.25,
            sentiment_subjectivity: 0.6,
        };
        ReviewAnalysis {
            file_path: PathBuf::from("reviews/pizza.txt"),
            readability_band: metrics.band(),
            tone: metrics.tone(),
            hints: hints.into_iter().map(String::from).collect(),
            category: None,
            product: None,
            finalized: None,
            metrics,
        }
    }

    #[test]
    fn quiet_line_has_all_metrics() {
        let line = ConsoleReporter::new()
            .without_colors()
            .render_quiet(&make_result(vec![]));
        assert_eq!(
            line,
            "reviews/pizza.txt: 42 words, readability 64.50 (standard), polarity -0.250, subjectivity 0.60"
        );
    }

    #[test]
    fn render_shows_metrics_and_hints() {
        let out = ConsoleReporter::new()
            .without_colors()
            .render(&make_result(vec!["a", "b", "c", "d"]));
        assert!(out.contains("Words:        42"));
        assert!(out.contains("negative"));
        assert!(out.contains("→ c"));
        assert!(!out.contains("→ d"), "only three hints without --verbose");
    }

    #[test]
    fn verbose_shows_all_hints_and_descriptions() {
        let out = ConsoleReporter::new()
            .without_colors()
            .verbose()
            .render(&make_result(vec!["a", "b", "c", "d"]));
        assert!(out.contains("→ d"));
        assert!(out.contains(Feedback::band_description(ReadabilityBand::Standard)));
    }

    #[test]
    fn render_shows_record_details() {
        let mut result = make_result(vec![]);
        result.category = Some(ProductCategory::Book);
        result.product = Some("Der Schwarm".to_string());
        result.finalized = Some(true);
        let out = ConsoleReporter::new().without_colors().render(&result);
        assert!(out.contains("Category: Buch | Product: Der Schwarm | finalized"));
    }

    #[test]
    fn bars_handle_out_of_range_scores() {
        let r = ConsoleReporter::new().without_colors();
        assert_eq!(r.readability_bar(180.0), format!("[{}]", "█".repeat(20)));
        assert_eq!(r.readability_bar(-40.0), format!("[{}]", "░".repeat(20)));
        assert_eq!(r.polarity_bar(0.0), format!("[{}{}]", "▓".repeat(10), "░".repeat(10)));
    }

    #[test]
    fn summary_lists_stats() {
        let stats = AggregateStats {
            files_analyzed: 3,
            total_words: 250,
            average_readability: 61.234,
            average_polarity: 0.125,
        };
        let out = ConsoleReporter::new().without_colors().render_summary(&stats);
        assert!(out.contains("Files analyzed:      3"));
        assert!(out.contains("Average readability: 61.23"));
        assert!(out.contains("Average polarity:    0.125"));
    }
}
