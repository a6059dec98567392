//! Validate command implementation

use crate::error::CliError;
use crate::input::FileReader;
use anyhow::Result;
use clap::Args;
use kamer_core::{Lexicon, LexiconSentiment};
use std::path::{Path, PathBuf};

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Intensifier lexicon (JSON) to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub adverbs: PathBuf,

    /// Sentiment lexicon (XML) to validate as well
    #[arg(short, long, value_name = "FILE")]
    pub sentiment_lexicon: Option<PathBuf>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating intensifier lexicon: {}", self.adverbs.display());
        match load_strict(&self.adverbs) {
            Ok(lexicon) => {
                println!("✓ Lexicon is valid!");
                println!(
                    "  {} word forms in {} categories",
                    lexicon.len(),
                    lexicon.categories().count()
                );
                for category in lexicon.categories() {
                    let forms = lexicon.entries().filter(|(_, c)| *c == category).count();
                    println!("  {category}: {forms}");
                }
            }
            Err(e) => {
                println!("✗ Lexicon is invalid!");
                println!("  Error: {e}");
                return Err(anyhow::anyhow!("Validation failed: {}", e));
            }
        }

        if let Some(path) = &self.sentiment_lexicon {
            println!("Validating sentiment lexicon: {}", path.display());
            match FileReader::read_text(path).and_then(|source| {
                LexiconSentiment::from_xml_str(&source)
                    .map_err(|e| CliError::InvalidLexicon(e.to_string()).into())
            }) {
                Ok(sentiment) => {
                    println!("✓ Sentiment lexicon is valid!");
                    println!("  {} word forms", sentiment.len());
                }
                Err(e) => {
                    println!("✗ Sentiment lexicon is invalid!");
                    println!("  Error: {e}");
                    return Err(anyhow::anyhow!("Validation failed: {}", e));
                }
            }
        }

        Ok(())
    }
}

fn load_strict(path: &Path) -> Result<Lexicon> {
    let source = FileReader::read_text(path)?;
    Lexicon::from_json_str(&source).map_err(|e| CliError::InvalidLexicon(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_validate_args_debug() {
        let args = ValidateArgs {
            adverbs: PathBuf::from("adverbs.json"),
            sentiment_lexicon: None,
        };

        let debug_str = format!("{:?}", args);
        assert!(debug_str.contains("ValidateArgs"));
        assert!(debug_str.contains("adverbs.json"));
    }

    #[test]
    fn test_validate_valid_lexicon() {
        let file = temp_file(r#"{"words": [{"type": "arm", "form": ["straatarm", "doodarm"]}]}"#);
        let args = ValidateArgs {
            adverbs: file.path().to_path_buf(),
            sentiment_lexicon: None,
        };

        assert!(args.execute().is_ok());
    }

    #[test]
    fn test_validate_malformed_lexicon() {
        let file = temp_file(r#"{"woorden": []}"#);
        let args = ValidateArgs {
            adverbs: file.path().to_path_buf(),
            sentiment_lexicon: None,
        };

        assert!(args.execute().is_err());
    }

    #[test]
    fn test_validate_sentiment_lexicon() {
        let adverbs = temp_file(r#"{"words": []}"#);
        let good = temp_file(r#"<sentiment><word form="goed" polarity="0.7" subjectivity="0.6"/></sentiment>"#);
        let bad = temp_file(r#"<sentiment><word form="goed" polarity="veel"/></sentiment>"#);

        let args = ValidateArgs {
            adverbs: adverbs.path().to_path_buf(),
            sentiment_lexicon: Some(good.path().to_path_buf()),
        };
        assert!(args.execute().is_ok());

        let args = ValidateArgs {
            adverbs: adverbs.path().to_path_buf(),
            sentiment_lexicon: Some(bad.path().to_path_buf()),
        };
        assert!(args.execute().is_err());
    }
}
