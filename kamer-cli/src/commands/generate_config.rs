//! Generate config command implementation

use crate::config::KamerConfig;
use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Intensifier lexicon to reference from the template
    #[arg(short, long, value_name = "FILE")]
    pub adverbs: Option<PathBuf>,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, self.generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Point extraction.adverbs at your intensifier lexicon");
        println!("2. Check the lexicon:");
        println!("   kamer validate --adverbs <adverbs.json>");
        println!("3. Use the configuration for processing:");
        println!(
            "   kamer process -i <transcripts-dir> --config {}",
            self.output.display()
        );

        Ok(())
    }

    /// Generate template configuration content
    fn generate_template(&self) -> String {
        let defaults = KamerConfig::default();
        let adverbs = self
            .adverbs
            .as_ref()
            .map(|path| format!("adverbs = {:?}", path.display().to_string()))
            .unwrap_or_else(|| "# adverbs = \"adverbs.json\"".to_string());

        format!(
            r#"# kamer configuration

[extraction]
# Intensifier lexicon: {{"words": [{{"type": "<category>", "form": ["<word>", ...]}}]}}
{adverbs}

# "compact" counts per category, "full" counts per word form
mode = "{mode}"

# "all" keeps every sentence; any other value keeps only sentences with a match
retention = "{retention}"

[sentiment]
enabled = {enabled}
# Sentiment lexicon: <sentiment><word form=".." polarity=".." subjectivity=".."/></sentiment>
# lexicon = "nl-sentiment.xml"

# Per-sentence timeout in milliseconds, 0 disables it
timeout_ms = {timeout_ms}

[output]
# "csv" or "json"
format = "{format}"

[performance]
parallel = {parallel}
# 0 uses one thread per CPU
worker_threads = {worker_threads}
"#,
            mode = defaults.extraction.mode,
            retention = defaults.extraction.retention,
            enabled = defaults.sentiment.enabled,
            timeout_ms = defaults.sentiment.timeout_ms,
            format = defaults.output.format,
            parallel = defaults.performance.parallel,
            worker_threads = defaults.performance.worker_threads,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_template_parses_to_defaults() {
        let args = GenerateConfigArgs {
            output: PathBuf::from("kamer.toml"),
            adverbs: None,
        };

        let config = KamerConfig::from_toml_str(&args.generate_template()).unwrap();
        assert_eq!(config, KamerConfig::default());
    }

    #[test]
    fn test_template_references_adverbs() {
        let args = GenerateConfigArgs {
            output: PathBuf::from("kamer.toml"),
            adverbs: Some(PathBuf::from("lexicons/adverbs.json")),
        };

        let config = KamerConfig::from_toml_str(&args.generate_template()).unwrap();
        assert_eq!(
            config.extraction.adverbs,
            Some(PathBuf::from("lexicons/adverbs.json"))
        );
    }

    #[test]
    fn test_execute_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("kamer.toml");
        let args = GenerateConfigArgs {
            output: output.clone(),
            adverbs: None,
        };

        args.execute().unwrap();
        assert!(KamerConfig::from_file(&output).is_ok());
    }

    #[test]
    fn test_execute_unwritable_path() {
        let args = GenerateConfigArgs {
            output: PathBuf::from("/nonexistent/dir/kamer.toml"),
            adverbs: None,
        };
        assert!(args.execute().is_err());
    }
}
