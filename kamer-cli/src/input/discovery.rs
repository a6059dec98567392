//! Transcript discovery: directories and glob patterns

use crate::error::CliError;
use anyhow::{Context, Result};
use glob::glob;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of transcript files picked up from a directory
pub const TRANSCRIPT_EXTENSION: &str = "xml";

/// Resolve each input to transcript paths.
///
/// A directory contributes its `*.xml` files (non-recursive); anything else
/// is treated as a glob pattern. The result is sorted and deduplicated.
pub fn discover_transcripts(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        if path.is_dir() {
            files.extend(list_directory(path)?);
            continue;
        }

        let entries =
            glob(input).map_err(|e| CliError::InvalidPattern(format!("{input}: {e}")))?;
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => log::warn!("Skipping unreadable path: {e}"),
            }
        }
    }

    files.sort();
    files.dedup();

    if files.is_empty() {
        return Err(CliError::FileNotFound(inputs.join(", ")).into());
    }

    Ok(files)
}

fn list_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list directory: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to list directory: {}", dir.display()))?
            .path();
        let is_transcript = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(TRANSCRIPT_EXTENSION));
        if is_transcript && path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn populate(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), "<handeling/>").unwrap();
        }
    }

    #[test]
    fn test_directory_lists_xml_only() {
        let temp_dir = TempDir::new().unwrap();
        populate(temp_dir.path(), &["b.xml", "a.xml", "notes.txt", "C.XML"]);
        fs::create_dir(temp_dir.path().join("nested.xml")).unwrap();

        let files = discover_transcripts(&[temp_dir.path().display().to_string()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["C.XML", "a.xml", "b.xml"]);
    }

    #[test]
    fn test_glob_pattern() {
        let temp_dir = TempDir::new().unwrap();
        populate(temp_dir.path(), &["h-1.xml", "h-2.xml", "kst-1.xml"]);

        let pattern = format!("{}/h-*.xml", temp_dir.path().display());
        let files = discover_transcripts(&[pattern]).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_overlapping_inputs_are_deduplicated() {
        let temp_dir = TempDir::new().unwrap();
        populate(temp_dir.path(), &["a.xml", "b.xml"]);

        let dir = temp_dir.path().display().to_string();
        let single = format!("{dir}/a.xml");
        let files = discover_transcripts(&[dir, single]).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_no_matches_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.xml", temp_dir.path().display());

        let err = discover_transcripts(&[pattern]).unwrap_err();
        assert!(err.to_string().starts_with("File not found"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = discover_transcripts(&["[invalid".to_string()]).unwrap_err();
        assert!(err.to_string().starts_with("Invalid file pattern"));
    }
}
