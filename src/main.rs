//! review-lens: review text analyzer CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use review_lens::analyzer::{AnalysisEngine, ExperienceProfile};
use review_lens::config::{build_ignore_set, is_ignored, is_review_file, load_config, Config, CONFIG_FILENAME};
use review_lens::participant::Participant;
use review_lens::reporter::{ConsoleReporter, JsonReporter};
use review_lens::watcher::ReviewWatcher;
use review_lens::ReviewAnalysis;
use globset::GlobSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

/// review-lens: readability and sentiment of German product reviews
#[derive(Parser, Debug)]
#[command(name = "review-lens")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Review file or directory to analyze (omit when using a subcommand)
    #[arg(required = true)]
    path: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Quiet mode (one line per review)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (all hints, band descriptions)
    #[arg(long, short)]
    verbose: bool,

    /// Locale of the reviews (default: config value, then "de")
    #[arg(long, value_name = "TAG")]
    locale: Option<String>,

    /// Minimum words per review (exit 1 if a review is shorter)
    #[arg(long, value_name = "N")]
    min_words: Option<usize>,

    /// Path to config file (default: search .reviewlensrc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Watch for file changes and re-analyze
    #[arg(long)]
    watch: bool,

    /// Run analysis in parallel (default for directories with many reviews)
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .reviewlensrc.json with sensible defaults
    Init {
        /// Minimum words per review (e.g. 50)
        #[arg(long)]
        min_words: Option<usize>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Compute the experience score of a reviewer from self-reported counters
    Experience {
        /// Online orders placed
        #[arg(long)]
        orders: Option<i64>,

        /// Reviews read before buying
        #[arg(long)]
        reviews_read: Option<i64>,

        /// Product reviews written
        #[arg(long)]
        product_reviews: Option<i64>,

        /// Book reviews written
        #[arg(long)]
        book_reviews: Option<i64>,

        /// Trip reviews written
        #[arg(long)]
        trip_reviews: Option<i64>,

        /// Series reviews written
        #[arg(long)]
        series_reviews: Option<i64>,

        /// Food delivery reviews written
        #[arg(long)]
        food_reviews: Option<i64>,

        /// Self-rated expertise
        #[arg(long)]
        expertise: Option<i64>,

        /// Participant record (JSON) to read counters from; flags given here win
        #[arg(long, value_name = "PATH")]
        participant: Option<PathBuf>,

        /// Output format as JSON
        #[arg(long, short)]
        json: bool,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if let Some(cmd) = args.command {
        return match cmd {
            Commands::Init { min_words, dir } => run_init(min_words, dir.as_deref()),
            Commands::Experience {
                orders,
                reviews_read,
                product_reviews,
                book_reviews,
                trip_reviews,
                series_reviews,
                food_reviews,
                expertise,
                participant,
                json,
            } => {
                let flags = ExperienceProfile {
                    online_orders: orders,
                    reviews_read,
                    product_reviews,
                    book_reviews,
                    trip_reviews,
                    series_reviews,
                    food_reviews,
                    self_rated_expertise: expertise,
                };
                let participant = participant.as_deref().map(Participant::load).transpose()?;
                run_experience(flags, participant.as_ref(), json)
            }
        };
    }

    let Some(path) = args.path.clone() else {
        anyhow::bail!("a review file or directory is required");
    };

    let work_dir = work_dir_of(&path);
    let config = load_config(work_dir, args.config.as_deref())?
        .merge_with_cli(args.min_words, args.locale.as_deref());
    let engine = AnalysisEngine::new(config.locale()?)?;
    let ignore_set = build_optional_ignore_set(&config)?;

    let search_path = search_path_for(&path, &config);

    if args.watch {
        return run_watch(&args, &search_path, &engine, &config, ignore_set.as_ref());
    }

    let review_files =
        collect_review_files(&search_path, ignore_set.as_ref(), &config.get_review_patterns())?;

    if review_files.is_empty() {
        eprintln!("{}: No review files found", "Warning".yellow());
        return Ok(ExitCode::from(2));
    }

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    let use_parallel = args.parallel || review_files.len() > 10;
    let outcomes = if use_parallel {
        engine.analyze_parallel(&review_files, Some(&config))
    } else {
        let paths: Vec<&Path> = review_files.iter().map(PathBuf::as_path).collect();
        engine.analyze_many(&paths, Some(&config))
    };

    let mut results = Vec::with_capacity(outcomes.len());
    let mut had_errors = false;
    for (file, outcome) in review_files.iter().zip(outcomes) {
        match outcome {
            Ok(result) => results.push(result),
            Err(e) => {
                had_errors = true;
                eprintln!("{}: Failed to analyze {}: {:#}", "Error".red(), file.display(), e);
            }
        }
    }

    if results.is_empty() {
        eprintln!("{}: All files failed to analyze", "Error".red());
        return Ok(ExitCode::from(2));
    }

    let stats = AnalysisEngine::aggregate_stats(&results);

    if args.json {
        let reporter = JsonReporter::new().pretty();
        if results.len() == 1 {
            println!("{}", reporter.report(&results[0]));
        } else {
            println!("{}", reporter.report_with_summary(&results, &stats));
        }
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        for result in &results {
            reporter.report_quiet(result);
        }
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }

        if results.len() == 1 {
            reporter.report(&results[0]);
        } else {
            reporter.report_many(&results, &stats);
        }
    }

    let too_short = reviews_below_min_words(&results, &config);
    if !too_short.is_empty() {
        if !args.quiet && !args.json {
            for (result, min_words) in &too_short {
                eprintln!(
                    "{}: {} has {} words, minimum is {}",
                    "Failed".red().bold(),
                    result.file_path.display(),
                    result.metrics.word_count,
                    min_words
                );
            }
        }
        return Ok(ExitCode::from(1));
    }

    if had_errors {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Directory where the config search starts
fn work_dir_of(path: &Path) -> &Path {
    if path.is_file() {
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
    } else {
        path
    }
}

/// Where to look for reviews: a named file as is, a directory joined with `reviewRoot` if set
fn search_path_for(path: &Path, config: &Config) -> PathBuf {
    match config.review_root {
        Some(ref review_root) if path.is_dir() => path.join(review_root),
        _ => path.to_path_buf(),
    }
}

fn build_optional_ignore_set(config: &Config) -> Result<Option<GlobSet>> {
    if config.ignore.is_empty() {
        Ok(None)
    } else {
        Ok(Some(build_ignore_set(&config.ignore)?))
    }
}

/// Reviews shorter than their effective minimum word count (only when a minimum is configured)
fn reviews_below_min_words<'a>(
    results: &'a [ReviewAnalysis],
    config: &Config,
) -> Vec<(&'a ReviewAnalysis, usize)> {
    results
        .iter()
        .filter_map(|result| {
            let min_words = config.effective_for_file(&result.file_path).min_words?;
            (result.metrics.word_count < min_words).then_some((result, min_words))
        })
        .collect()
}

fn run_init(min_words: Option<usize>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let min_words_value = min_words.unwrap_or(review_lens::analyzer::feedback::DEFAULT_MIN_WORDS);

    let json = format!(
        r#"{{
  "locale": "de",
  "minWords": {},
  "ignore": [
    "**/drafts/**",
    "**/archive/**"
  ],
  "overrides": [
    {{
      "files": ["**/food/**"],
      "minWords": 20
    }}
  ]
}}
"#,
        min_words_value
    );

    std::fs::write(&config_path, json)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!(
        "{}: Created {} with locale=de, minWords={}",
        "Done".green().bold(),
        config_path.display(),
        min_words_value
    );
    Ok(ExitCode::SUCCESS)
}

fn run_experience(
    flags: ExperienceProfile,
    participant: Option<&Participant>,
    json: bool,
) -> Result<ExitCode> {
    let profile = match participant {
        Some(p) => flags.or(p.experience.clone()),
        None => flags,
    };
    let score = profile.score();
    let feedback = participant.map(|p| p.feedback.as_str()).filter(|f| !f.is_empty());

    if json {
        let mut output = serde_json::json!({
            "profile": profile,
            "score": score,
        });
        if let Some(feedback) = feedback {
            output["feedback"] = serde_json::Value::from(feedback);
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}: {}", "Experience score".bold(), score);
        if let Some(feedback) = feedback {
            println!("{}: {}", "Feedback".bold(), feedback);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_watch(
    args: &Args,
    path: &Path,
    engine: &AnalysisEngine,
    config: &Config,
    ignore_set: Option<&GlobSet>,
) -> Result<ExitCode> {
    let watcher = ReviewWatcher::watch(path, &config.get_review_patterns())
        .context("Failed to create file watcher")?;
    eprintln!("{}: Watching for changes... (Ctrl+C to stop)", "Info".blue());

    let mut reporter = ConsoleReporter::new();
    if args.verbose {
        reporter = reporter.verbose();
    }
    let json_reporter = JsonReporter::new();

    loop {
        let changed = watcher.next_changes();
        for file in changed {
            if ignore_set.is_some_and(|set| is_ignored(&file, set)) {
                continue;
            }
            match engine.analyze(&file, Some(config)) {
                Ok(result) if args.json => println!("{}", json_reporter.report(&result)),
                Ok(result) if args.quiet => reporter.report_quiet(&result),
                Ok(result) => reporter.report(&result),
                Err(e) => eprintln!("{}: {}: {:#}", "Error".red(), file.display(), e),
            }
        }
    }
}

fn collect_review_files(
    path: &Path,
    ignore_set: Option<&GlobSet>,
    review_patterns: &[&str],
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if ignore_set.is_some_and(|set| is_ignored(path, set)) {
            return Ok(vec![]);
        }
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_review_file(p, review_patterns))
        .filter(|p| !ignore_set.is_some_and(|set| is_ignored(p, set)))
        .collect();

    // Sort for consistent output
    files.sort();

    Ok(files)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|n| n.starts_with('.'))
}
