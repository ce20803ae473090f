use anyhow::Context;
use std::path::{Path, PathBuf};

use crate::{CaptionError, Result};

const SUBTITLE_EXTENSION: &str = "vtt";

/// Check if a path looks like a WebVTT subtitle file
pub fn is_subtitle_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(SUBTITLE_EXTENSION))
        .unwrap_or(false)
}

/// Check if the file exists and is accessible
fn validate_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CaptionError::FileError(format!("File does not exist: {}", path.display())).into());
    }

    if !path.is_file() {
        return Err(CaptionError::FileError(format!("Path is not a file: {}", path.display())).into());
    }

    Ok(())
}

/// Read a subtitle file from disk
pub fn read_subtitle_file(path: &Path) -> Result<String> {
    validate_file(path)?;

    let content = fs_err::read_to_string(path)
        .with_context(|| format!("Failed to read subtitle file {}", path.display()))?;

    if content.is_empty() {
        tracing::warn!("Subtitle file is empty: {}", path.display());
    }

    Ok(content)
}

/// List subtitle files directly inside a directory, sorted by name
pub fn collect_subtitle_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs_err::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_subtitle_file(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Resolve command line inputs into subtitle files
///
/// Files are taken as given (whatever their extension), directories expand to
/// the subtitle files they contain.
pub fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let found = collect_subtitle_files(input)?;
            if found.is_empty() {
                tracing::warn!("No subtitle files found in {}", input.display());
            }
            files.extend(found);
        } else {
            validate_file(input)?;
            files.push(input.clone());
        }
    }

    Ok(files)
}
