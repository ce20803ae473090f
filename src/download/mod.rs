use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::cleaner::clean_captions;
use crate::extractors::local::{collect_subtitle_files, read_subtitle_file};
use crate::extractors::{CaptionFetcher, CaptionRequest};
use crate::{CaptionError, Result};

/// Prefix of the scratch directory the fetcher downloads into
const SCRATCH_PREFIX: &str = ".captions-";

/// Directory the scratch directory is created in
///
/// Normally the output directory. When captions are only printed nothing is
/// saved, so the system temp directory is used and the output directory is
/// left alone.
pub fn scratch_parent(output_dir: &Path, print_only: bool) -> PathBuf {
    if print_only {
        std::env::temp_dir()
    } else {
        output_dir.to_path_buf()
    }
}

/// Cleaned text of a single subtitle file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedCaptions {
    /// File name of the subtitle file the text came from
    pub source_name: String,

    /// Full path of the subtitle file, when it was read from disk
    pub source_path: Option<PathBuf>,

    /// Cleaned caption text
    pub text: String,
}

impl CleanedCaptions {
    /// Language tag of a `<stem>.<lang>.vtt` source name
    pub fn language(&self) -> Option<&str> {
        let stem = Path::new(&self.source_name).file_stem()?;
        Path::new(stem).extension()?.to_str()
    }

    /// Number of caption lines
    pub fn line_count(&self) -> usize {
        if self.text.is_empty() {
            0
        } else {
            self.text.lines().count()
        }
    }
}

/// Read a subtitle file and run it through the caption cleaner
pub fn clean_subtitle_file(path: &Path) -> Result<CleanedCaptions> {
    let raw = read_subtitle_file(path)?;
    let source_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let text = clean_captions(&raw);
    tracing::debug!("Cleaned {} ({} bytes -> {} bytes)", source_name, raw.len(), text.len());

    Ok(CleanedCaptions {
        source_name,
        source_path: Some(path.to_path_buf()),
        text,
    })
}

/// Clean several subtitle files in order
pub fn clean_subtitle_files(paths: &[PathBuf]) -> Result<Vec<CleanedCaptions>> {
    paths.iter().map(|path| clean_subtitle_file(path)).collect()
}

/// Download-and-clean pipeline around a caption fetcher
pub struct CaptionPipeline<F> {
    fetcher: F,
    show_progress: bool,
}

impl<F: CaptionFetcher> CaptionPipeline<F> {
    /// Create a new pipeline
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            show_progress: true,
        }
    }

    /// Enable or disable the progress spinner
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Download captions for a request and clean every subtitle file fetched
    ///
    /// The fetcher works inside a scratch directory created in `scratch_parent`;
    /// the scratch directory is removed when this returns, whether or not it succeeded.
    pub async fn download(&self, request: &CaptionRequest, scratch_parent: &Path) -> Result<Vec<CleanedCaptions>> {
        if !self.fetcher.check_availability().await {
            return Err(CaptionError::ToolMissing(self.fetcher.tool_name()).into());
        }

        fs_err::create_dir_all(scratch_parent)?;
        let scratch = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir_in(scratch_parent)
            .context("Failed to create temporary directory")?;

        tracing::info!(
            "Downloading '{}' captions for {} into {}",
            request.language,
            request.url,
            scratch.path().display()
        );

        self.fetch_with_progress(request, &scratch).await?;

        let files = collect_subtitle_files(scratch.path())?;
        if files.is_empty() {
            return Err(CaptionError::NoCaptions(request.language.clone()).into());
        }

        tracing::info!("Fetched {} subtitle file(s)", files.len());
        clean_subtitle_files(&files)
    }

    async fn fetch_with_progress(&self, request: &CaptionRequest, scratch: &TempDir) -> Result<()> {
        let progress = if self.show_progress {
            let progress = ProgressBar::new_spinner();
            progress.set_style(
                ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            progress.enable_steady_tick(std::time::Duration::from_millis(120));
            progress.set_message(format!("Downloading captions with {}...", self.fetcher.tool_name()));
            progress
        } else {
            ProgressBar::hidden()
        };

        let result = self.fetcher.fetch_captions(request, scratch.path()).await;

        match &result {
            Ok(()) => progress.finish_with_message("Download complete"),
            Err(_) => progress.abandon_with_message("Download failed"),
        }

        result
    }
}
