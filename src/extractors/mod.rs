use async_trait::async_trait;
use std::path::Path;
use url::Url;

pub mod local;
pub mod ytdlp;

use crate::{CaptionError, Result};

/// A single caption download request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionRequest {
    /// Video URL handed to the downloader
    pub url: String,

    /// Caption language code (`en`, `de`, `en.*`, ...)
    pub language: String,

    /// Name downloaded files after the video id instead of the title
    pub shorten: bool,
}

impl CaptionRequest {
    pub fn new(url: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            language: language.into(),
            shorten: false,
        }
    }

    pub fn shorten(mut self, shorten: bool) -> Self {
        self.shorten = shorten;
        self
    }
}

/// Trait for tools that fetch raw subtitle files for a video
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptionFetcher: Send + Sync {
    /// Check if the underlying tool can be run
    async fn check_availability(&self) -> bool;

    /// Download subtitle files for the request into `work_dir`
    async fn fetch_captions(&self, request: &CaptionRequest, work_dir: &Path) -> Result<()>;

    /// Name of the underlying tool, for error messages
    fn tool_name(&self) -> String;
}

/// Validate a video URL
pub fn validate_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|_| CaptionError::UnsupportedUrl(url.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CaptionError::UnsupportedUrl(format!(
            "{} (URL must use HTTP or HTTPS protocol)",
            url
        ))
        .into());
    }

    Ok(parsed)
}
