//! Caption Fetch - A Rust CLI tool for downloading and cleaning video captions
//!
//! This library downloads auto-generated captions with `yt-dlp` and turns the raw
//! WebVTT subtitle text into plain readable text files.

pub mod cleaner;
pub mod cli;
pub mod config;
pub mod download;
pub mod extractors;
pub mod output;
pub mod utils;

pub use cleaner::clean_captions;
pub use cli::{Cli, Commands};
pub use config::Config;
pub use download::{CaptionPipeline, CleanedCaptions};
pub use extractors::{CaptionFetcher, CaptionRequest};
pub use utils::sanitize_filename;

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to caption fetching
#[derive(thiserror::Error, Debug)]
pub enum CaptionError {
    #[error("Unsupported URL format: {0}")]
    UnsupportedUrl(String),

    #[error("{0} is not installed. Please install it: https://github.com/yt-dlp/yt-dlp")]
    ToolMissing(String),

    #[error("Caption download failed: {0}")]
    DownloadFailed(String),

    #[error("No captions found for language '{0}'")]
    NoCaptions(String),

    #[error("File operation failed: {0}")]
    FileError(String),
}
