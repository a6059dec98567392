//! Run summary across all processed transcripts

use kamer_core::{Diagnostic, DocumentReport, Stage};
use std::fmt;
use std::path::{Path, PathBuf};

/// A diagnostic together with the transcript it came from
#[derive(Debug, Clone, PartialEq)]
pub struct FileDiagnostic {
    /// Transcript path, `None` for run-level problems
    pub path: Option<PathBuf>,
    /// The problem itself
    pub diagnostic: Diagnostic,
}

impl fmt::Display for FileDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {}", path.display(), self.diagnostic),
            None => write!(f, "{}", self.diagnostic),
        }
    }
}

/// Totals and diagnostics of one run
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Transcripts that produced a report
    pub processed: usize,
    /// Transcripts skipped because of a document-level failure
    pub skipped: usize,
    /// Records written
    pub records: usize,
    /// Everything that went wrong, in input order
    pub diagnostics: Vec<FileDiagnostic>,
}

impl RunSummary {
    /// Record a run-level problem (e.g. a lexicon that failed to load)
    pub fn note(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(FileDiagnostic {
            path: None,
            diagnostic,
        });
    }

    /// Account for a successfully processed transcript
    pub fn add_report(&mut self, path: &Path, report: &DocumentReport) {
        self.processed += 1;
        self.records += report.records.len();
        self.diagnostics
            .extend(report.diagnostics.iter().cloned().map(|diagnostic| FileDiagnostic {
                path: Some(path.to_path_buf()),
                diagnostic,
            }));
    }

    /// Account for a transcript that failed at `stage`
    pub fn add_failure(&mut self, path: &Path, stage: Stage, message: impl Into<String>) {
        self.skipped += 1;
        self.diagnostics.push(FileDiagnostic {
            path: Some(path.to_path_buf()),
            diagnostic: Diagnostic::new(stage, message),
        });
    }

    /// Number of diagnostics raised at `stage`
    pub fn count_at(&self, stage: Stage) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.diagnostic.stage == stage)
            .count()
    }

    /// Emit every diagnostic at warn level and the totals at info level
    pub fn log(&self) {
        for diagnostic in &self.diagnostics {
            log::warn!("{diagnostic}");
        }
        log::info!("{self}");
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} transcripts processed, {} skipped, {} records, {} diagnostics",
            self.processed,
            self.skipped,
            self.records,
            self.diagnostics.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kamer_core::{Variant, YearRange};

    #[test]
    fn test_accumulates_reports_and_failures() {
        let mut summary = RunSummary::default();
        let report = DocumentReport {
            variant: Variant::Handeling,
            years: None,
            records: Vec::new(),
            diagnostics: vec![Diagnostic::new(Stage::YearRange, "no year found")],
        };

        summary.note(Diagnostic::new(Stage::LexiconLoad, "expected value"));
        summary.add_report(Path::new("a.xml"), &report);
        summary.add_failure(Path::new("b.xml"), Stage::SchemaDetect, "unknown root");

        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.count_at(Stage::YearRange), 1);
        assert_eq!(summary.count_at(Stage::Sentiment), 0);
        assert_eq!(summary.diagnostics[0].to_string(), "[lexicon] expected value");
        assert_eq!(summary.diagnostics[1].to_string(), "a.xml: [year] no year found");
        assert_eq!(
            summary.to_string(),
            "1 transcripts processed, 1 skipped, 0 records, 3 diagnostics"
        );
    }

    #[test]
    fn test_counts_records() {
        let mut summary = RunSummary::default();
        let report = DocumentReport {
            variant: Variant::OfficielePublicatie,
            years: Some(YearRange::new(2010, 2011)),
            records: Vec::new(),
            diagnostics: Vec::new(),
        };
        summary.add_report(Path::new("a.xml"), &report);
        assert_eq!(summary.records, 0);
        assert!(summary.diagnostics.is_empty());
    }
}
