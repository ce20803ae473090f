use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use super::{CaptionFetcher, CaptionRequest};
use crate::config::YtDlpConfig;
use crate::utils::check_command_available;
use crate::{CaptionError, Result};

/// Caption fetcher backed by yt-dlp
pub struct YtDlpFetcher {
    yt_dlp_path: String,
    extra_args: Vec<String>,
}

impl YtDlpFetcher {
    pub fn new() -> Self {
        Self {
            yt_dlp_path: "yt-dlp".to_string(),
            extra_args: Vec::new(),
        }
    }

    pub fn from_config(config: &YtDlpConfig) -> Self {
        Self {
            yt_dlp_path: config.path.clone(),
            extra_args: config.extra_args.clone(),
        }
    }

    /// Build the yt-dlp argument list for a request
    fn build_args(&self, request: &CaptionRequest) -> Vec<String> {
        let mut args: Vec<String> = [
            "--write-auto-sub",
            "--sub-lang",
            request.language.as_str(),
            "--skip-download",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        if request.shorten {
            args.push("-o".to_string());
            args.push("%(id)s.%(ext)s".to_string());
        }

        args.extend(self.extra_args.iter().cloned());
        args.push(request.url.clone());
        args
    }
}

#[async_trait]
impl CaptionFetcher for YtDlpFetcher {
    async fn check_availability(&self) -> bool {
        check_command_available(&self.yt_dlp_path).await
    }

    async fn fetch_captions(&self, request: &CaptionRequest, work_dir: &Path) -> Result<()> {
        let args = self.build_args(request);
        tracing::debug!("Running {} {}", self.yt_dlp_path, args.join(" "));

        let output = Command::new(&self.yt_dlp_path)
            .args(&args)
            .current_dir(work_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            tracing::debug!("yt-dlp: {}", line);
        }

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(CaptionError::DownloadFailed(error.trim().to_string()).into());
        }

        Ok(())
    }

    fn tool_name(&self) -> String {
        self.yt_dlp_path.clone()
    }
}

impl Default for YtDlpFetcher {
    fn default() -> Self {
        Self::new()
    }
}
