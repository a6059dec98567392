//! Process command implementation

use crate::config::KamerConfig;
use crate::error::CliError;
use crate::input::{discover_transcripts, load_adverbs, load_sentiment, FileReader};
use crate::output::{create_formatter, open_destination, OutputFormat};
use crate::progress::ProgressReporter;
use crate::report::RunSummary;
use anyhow::{Context, Result};
use clap::Args;
use kamer_core::{
    CountMode, Diagnostic, DocumentReport, ExtractOptions, Extractor, Retention, SentimentScorer,
    Stage, TimeoutScorer,
};
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Transcript directories or glob patterns
    #[arg(short, long, value_name = "DIR/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Intensifier lexicon (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub adverbs: Option<PathBuf>,

    /// Output file or directory (default: stdout)
    #[arg(short, long, value_name = "FILE/DIR")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Counting mode: compact (per category) or full (per word form)
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<CountMode>,

    /// Retention: "all" keeps every sentence, anything else only matches
    #[arg(short, long, value_name = "POLICY")]
    pub retention: Option<String>,

    /// Sentiment lexicon (XML); enables sentiment scoring
    #[arg(short, long, value_name = "FILE")]
    pub sentiment_lexicon: Option<PathBuf>,

    /// Per-sentence sentiment timeout in milliseconds (0 = none)
    #[arg(long, value_name = "MS")]
    pub sentiment_timeout_ms: Option<u64>,

    /// Process transcripts in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of worker threads for parallel processing
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Effective settings of one run after merging flags over the config file
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    /// Intensifier lexicon path
    pub adverbs: PathBuf,
    /// Extraction options
    pub options: ExtractOptions,
    /// Output format
    pub format: OutputFormat,
    /// Sentiment lexicon path, `None` disables scoring
    pub sentiment_lexicon: Option<PathBuf>,
    /// Per-sentence sentiment timeout
    pub sentiment_timeout: Option<Duration>,
    /// Whether to use the worker pool
    pub parallel: bool,
    /// Worker pool size
    pub threads: usize,
}

impl RunSettings {
    /// Build the sentiment scorer, if scoring is enabled and its lexicon loads
    pub fn sentiment_scorer(&self) -> Option<Arc<dyn SentimentScorer>> {
        let lexicon = load_sentiment(self.sentiment_lexicon.as_deref()?)?;
        let scorer: Arc<dyn SentimentScorer> = Arc::new(lexicon);
        let Some(timeout) = self.sentiment_timeout else {
            return Some(scorer);
        };

        let workers = if self.parallel { self.threads } else { 1 };
        match TimeoutScorer::with_workers(scorer, timeout, workers) {
            Ok(bounded) => Some(Arc::new(bounded)),
            Err(e) => {
                log::warn!("Sentiment scoring disabled: {e}");
                None
            }
        }
    }
}

type TranscriptOutcome = std::result::Result<DocumentReport, Diagnostic>;

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::info!("Starting transcript processing");
        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => KamerConfig::from_file(path)?,
            None => KamerConfig::default(),
        };
        let settings = self.resolve(&config)?;
        log::debug!("Settings: {:?}", settings);

        let files = discover_transcripts(&self.input)?;
        log::info!("Found {} transcripts", files.len());

        let mut summary = RunSummary::default();
        let (lexicon, diagnostic) = load_adverbs(&settings.adverbs)?;
        if let Some(diagnostic) = diagnostic {
            summary.note(diagnostic);
        }

        let scorer = settings.sentiment_scorer();
        let mut extractor = Extractor::new(&lexicon, settings.options.clone());
        if let Some(scorer) = &scorer {
            extractor = extractor.with_scorer(scorer.as_ref());
        }

        let writer = open_destination(self.output.as_deref(), settings.format)?;
        let mut formatter = create_formatter(
            settings.format,
            writer,
            lexicon.ordered_output_labels(settings.options.mode),
            scorer.is_some(),
        )?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.start(files.len() as u64);

        let outcomes = process_all(&files, &extractor, &progress, &settings)?;
        for (path, outcome) in files.iter().zip(&outcomes) {
            match outcome {
                Ok(report) => {
                    for record in &report.records {
                        formatter.write_record(record)?;
                    }
                    summary.add_report(path, report);
                }
                Err(diagnostic) => {
                    summary.add_failure(path, diagnostic.stage, diagnostic.message.clone())
                }
            }
        }
        formatter.finish()?;

        progress.finish(summary.records);
        summary.log();
        Ok(())
    }

    /// Merge command-line flags over `config`
    pub fn resolve(&self, config: &KamerConfig) -> Result<RunSettings> {
        let adverbs = self
            .adverbs
            .clone()
            .or_else(|| config.extraction.adverbs.clone())
            .ok_or_else(|| {
                CliError::ConfigError(
                    "no intensifier lexicon given (use --adverbs or extraction.adverbs)"
                        .to_string(),
                )
            })?;

        let mode = match self.mode {
            Some(mode) => mode,
            None => config
                .extraction
                .mode
                .parse::<CountMode>()
                .map_err(CliError::ConfigError)?,
        };
        let retention =
            Retention::parse(self.retention.as_deref().unwrap_or(&config.extraction.retention));

        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::parse(&config.output.format).ok_or_else(|| {
                CliError::ConfigError(format!(
                    "unknown output format '{}' (expected 'csv' or 'json')",
                    config.output.format
                ))
            })?,
        };

        let sentiment_lexicon = match &self.sentiment_lexicon {
            Some(path) => Some(path.clone()),
            None if config.sentiment.enabled => {
                if config.sentiment.lexicon.is_none() {
                    log::warn!("Sentiment is enabled but no sentiment lexicon is configured");
                }
                config.sentiment.lexicon.clone()
            }
            None => None,
        };
        let timeout_ms = self
            .sentiment_timeout_ms
            .unwrap_or(config.sentiment.timeout_ms);

        let threads = self
            .threads
            .or(Some(config.performance.worker_threads).filter(|&n| n > 0))
            .unwrap_or_else(num_cpus::get)
            .max(1);

        Ok(RunSettings {
            adverbs,
            options: ExtractOptions::builder()
                .mode(mode)
                .retention(retention)
                .build(),
            format,
            sentiment_lexicon,
            sentiment_timeout: (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms)),
            parallel: self.parallel || config.performance.parallel,
            threads,
        })
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger installed by an earlier command in the same process wins
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }

        Ok(())
    }
}

/// Process every transcript, keeping input order in the result
fn process_all(
    files: &[PathBuf],
    extractor: &Extractor<'_>,
    progress: &ProgressReporter,
    settings: &RunSettings,
) -> Result<Vec<TranscriptOutcome>> {
    let process = |path: &PathBuf| {
        let outcome = process_transcript(path, extractor);
        let name = FileReader::display_name(path);
        match &outcome {
            Ok(_) => progress.transcript_done(&name),
            Err(_) => progress.transcript_skipped(&name),
        }
        outcome
    };

    if settings.parallel && files.len() > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(settings.threads)
            .build()
            .context("Failed to build worker pool")?;
        log::info!("Processing in parallel on {} threads", settings.threads);
        Ok(pool.install(|| files.par_iter().map(process).collect()))
    } else {
        Ok(files.iter().map(process).collect())
    }
}

/// Read and extract one transcript; failures become a diagnostic
fn process_transcript(path: &Path, extractor: &Extractor<'_>) -> TranscriptOutcome {
    let raw = FileReader::read_text(path)
        .map_err(|e| Diagnostic::new(Stage::DocumentLoad, format!("{e:#}")))?;
    // A panic while extracting abandons this transcript only
    let report = panic::catch_unwind(AssertUnwindSafe(|| extractor.process_text(&raw)))
        .map_err(|cause| Diagnostic::new(Stage::Extraction, panic_message(cause.as_ref())))?
        .map_err(|e| Diagnostic::new(e.stage(), e.to_string()))?;

    log::debug!(
        "{}: {} transcript, {} records",
        path.display(),
        report.variant,
        report.records.len()
    );
    Ok(report)
}

fn panic_message(cause: &(dyn Any + Send)) -> String {
    let detail = cause
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| cause.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("extraction aborted: {detail}")
}
