//! CSV output formatter

use super::OutputFormatter;
use anyhow::{Context, Result};
use kamer_core::UtteranceRecord;
use std::io::Write;

/// Leading metadata columns of every row
pub const METADATA_COLUMNS: [&str; 5] = ["year_start", "year_end", "speaker", "affiliation", "sentence"];

/// Trailing sentiment columns, present when scoring is enabled
pub const SENTIMENT_COLUMNS: [&str; 2] = ["polarity", "subjectivity"];

/// CSV formatter - one row per record, the header written up front
pub struct CsvFormatter<W: Write> {
    writer: ::csv::Writer<W>,
    count_columns: usize,
    with_sentiment: bool,
}

impl<W: Write> CsvFormatter<W> {
    /// Create a formatter and write the header row.
    ///
    /// `count_labels` must follow the lexicon's output order so that every
    /// row's count values line up with it.
    pub fn new(writer: W, count_labels: Vec<String>, with_sentiment: bool) -> Result<Self> {
        let mut writer = ::csv::Writer::from_writer(writer);

        let mut header: Vec<&str> = METADATA_COLUMNS.to_vec();
        header.extend(count_labels.iter().map(String::as_str));
        if with_sentiment {
            header.extend(SENTIMENT_COLUMNS);
        }
        writer
            .write_record(&header)
            .context("Failed to write CSV header")?;

        Ok(Self {
            writer,
            count_columns: count_labels.len(),
            with_sentiment,
        })
    }
}

impl<W: Write + Send + Sync> OutputFormatter for CsvFormatter<W> {
    fn write_record(&mut self, record: &UtteranceRecord) -> Result<()> {
        debug_assert_eq!(record.counts.len(), self.count_columns);

        let (year_start, year_end) = match record.years {
            Some(years) => (years.start.to_string(), years.end.to_string()),
            None => (String::new(), String::new()),
        };

        let mut row = vec![
            year_start,
            year_end,
            record.speaker.clone(),
            record.affiliation.clone(),
            record.sentence.clone(),
        ];
        row.extend(record.counts.values().map(|count| count.to_string()));
        if self.with_sentiment {
            match record.sentiment {
                Some(sentiment) => {
                    row.push(sentiment.polarity.to_string());
                    row.push(sentiment.subjectivity.to_string());
                }
                None => row.extend([String::new(), String::new()]),
            }
        }

        self.writer
            .write_record(&row)
            .context("Failed to write CSV row")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
