use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "captions",
    about = "Caption Fetch - Download auto-generated video captions and clean them into plain text",
    version,
    long_about = "Downloads auto-generated captions with yt-dlp and strips cue timestamps, inline markup and repeated lines, leaving plain readable text files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators and informational logs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (defaults to ./config.yaml or the user config directory)
    #[arg(long, global = true, value_name = "FILE", env = "CAPTIONS_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download and clean auto-generated captions for a video
    Download {
        /// Video URL
        #[arg(value_name = "URL")]
        url: String,

        /// Caption language code (defaults to the configured language, usually "en")
        #[arg(short, long, value_name = "LANG", env = "CAPTIONS_LANG")]
        lang: Option<String>,

        /// Use short file names (the video id instead of the title)
        #[arg(long)]
        shorten: bool,

        /// Output directory (defaults to the configured directory or the current one)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Custom output file name; sanitized before use
        #[arg(short, long, value_name = "NAME")]
        name: Option<String>,

        /// Print the cleaned captions instead of saving them
        #[arg(long)]
        print: bool,
    },

    /// Clean subtitle files that are already on disk
    Clean {
        /// Subtitle files, or directories containing .vtt files
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Output directory (defaults to the configured directory or the current one)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Custom output file name; sanitized before use
        #[arg(short, long, value_name = "NAME")]
        name: Option<String>,

        /// Print the cleaned captions instead of saving them
        #[arg(long)]
        print: bool,
    },

    /// Show or initialise the configuration file
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,

        /// Write a default configuration file
        #[arg(long, conflicts_with = "show")]
        init: bool,
    },
}
