use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Downloader settings
    #[serde(default)]
    pub yt_dlp: YtDlpConfig,

    /// Caption handling settings
    #[serde(default)]
    pub captions: CaptionsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YtDlpConfig {
    /// yt-dlp executable name or path
    pub path: String,

    /// Extra arguments passed to every yt-dlp invocation (cookies, proxy, ...)
    pub extra_args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionsConfig {
    /// Caption language used when --lang is not given
    pub default_language: String,

    /// Name downloaded files after the video id by default
    pub shorten_names: bool,

    /// Output directory used when --output is not given
    pub output_dir: Option<PathBuf>,
}

impl Default for YtDlpConfig {
    fn default() -> Self {
        Self {
            path: "yt-dlp".to_string(),
            extra_args: Vec::new(),
        }
    }
}

impl Default for CaptionsConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            shorten_names: false,
            output_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from the given path, or the default location
    ///
    /// A missing file is not an error: defaults are used and nothing is written.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            Self::load_file(&config_path)
        } else {
            tracing::debug!("No config at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path)
            .context("Failed to read config file")?;

        let config = Self::from_yaml(&content)?;
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)
            .context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file, returning the path written
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };

        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs_err::create_dir_all(parent)?;
            }
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(&config_path, content)
            .context("Failed to write config file")?;

        Ok(config_path)
    }

    /// Get configuration file path
    pub fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;

        Ok(config_dir.join("caption-fetch").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.yt_dlp.path.trim().is_empty() {
            anyhow::bail!("yt_dlp.path must not be empty");
        }

        if self.captions.default_language.trim().is_empty() {
            anyhow::bail!("captions.default_language must not be empty");
        }

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  yt-dlp: {}", self.yt_dlp.path);
        if !self.yt_dlp.extra_args.is_empty() {
            println!("  yt-dlp Extra Args: {}", self.yt_dlp.extra_args.join(" "));
        }
        println!("  Default Language: {}", self.captions.default_language);
        println!("  Short Names: {}", self.captions.shorten_names);
        match &self.captions.output_dir {
            Some(dir) => println!("  Output Directory: {}", dir.display()),
            None => println!("  Output Directory: (current directory)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.yt_dlp.path, "yt-dlp");
        assert_eq!(config.captions.default_language, "en");
        assert!(!config.captions.shorten_names);
        assert!(config.captions.output_dir.is_none());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = Config::from_yaml("captions:\n  default_language: de\n").unwrap();
        assert_eq!(config.captions.default_language, "de");
        assert_eq!(config.yt_dlp.path, "yt-dlp");
        assert!(config.yt_dlp.extra_args.is_empty());
    }

    #[test]
    fn test_full_yaml() {
        let yaml = "yt_dlp:\n  path: /usr/local/bin/yt-dlp\n  extra_args: [\"--cookies\", \"c.txt\"]\n\
                    captions:\n  default_language: ja\n  shorten_names: true\n  output_dir: subs\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.yt_dlp.path, "/usr/local/bin/yt-dlp");
        assert_eq!(config.yt_dlp.extra_args, vec!["--cookies", "c.txt"]);
        assert!(config.captions.shorten_names);
        assert_eq!(config.captions.output_dir, Some(PathBuf::from("subs")));
    }

    #[test]
    fn test_validation_rejects_empty_values() {
        assert!(Config::from_yaml("yt_dlp:\n  path: \"\"\n").is_err());
        assert!(Config::from_yaml("captions:\n  default_language: \" \"\n").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.yaml"))).unwrap();
        assert_eq!(config, Config::default());
        assert!(!dir.path().join("absent.yaml").exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let mut config = Config::default();
        config.captions.default_language = "es".to_string();

        let written = config.save(Some(&path)).unwrap();
        assert_eq!(written, path);
        assert_eq!(Config::load(Some(&path)).unwrap(), config);
    }
}
