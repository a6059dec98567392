//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} transcripts {msg}";

/// Progress bar over the transcripts of one run, drawn on stderr
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter; `quiet` suppresses all drawing
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Start the bar for `total` transcripts
    pub fn start(&mut self, total: u64) {
        if self.quiet {
            return;
        }

        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        let pb = ProgressBar::new(total).with_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Advance past a processed transcript
    pub fn transcript_done(&self, name: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Processed: {name}"));
            pb.inc(1);
        }
    }

    /// Advance past a transcript that was skipped
    pub fn transcript_skipped(&self, name: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Skipped: {name}"));
            pb.inc(1);
        }
    }

    /// Number of transcripts accounted for so far
    pub fn position(&self) -> u64 {
        self.progress_bar.as_ref().map_or(0, ProgressBar::position)
    }

    /// Finish progress reporting
    pub fn finish(&self, records: usize) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("Complete: {records} records"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_reporter_never_draws() {
        let mut reporter = ProgressReporter::new(true);
        reporter.start(3);
        reporter.transcript_done("a.xml");
        assert!(reporter.progress_bar.is_none());
        assert_eq!(reporter.position(), 0);
        reporter.finish(0);
    }

    #[test]
    fn test_counts_done_and_skipped() {
        let mut reporter = ProgressReporter::new(false);
        reporter.start(2);
        reporter.transcript_done("a.xml");
        reporter.transcript_skipped("b.xml");
        assert_eq!(reporter.position(), 2);
        reporter.finish(4);
    }
}
