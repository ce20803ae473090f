use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use caption_fetch::cli::{Cli, Commands};
use caption_fetch::config::Config;
use caption_fetch::download::{clean_subtitle_files, scratch_parent, CaptionPipeline, CleanedCaptions};
use caption_fetch::extractors::{local, validate_url, ytdlp::YtDlpFetcher, CaptionRequest};
use caption_fetch::{output, utils};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "caption_fetch=debug,captions=debug"
    } else if cli.quiet {
        "caption_fetch=warn,captions=warn"
    } else {
        "caption_fetch=info,captions=info"
    };

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Download {
            url,
            lang,
            shorten,
            output,
            name,
            print,
        } => {
            validate_url(&url)?;

            let request = CaptionRequest::new(
                url,
                lang.unwrap_or_else(|| config.captions.default_language.clone()),
            )
            .shorten(shorten || config.captions.shorten_names);
            let output_dir = resolve_output_dir(output, &config);

            tracing::info!(
                "Fetching captions from {}",
                utils::extract_domain(&request.url).unwrap_or_else(|| request.url.clone())
            );

            let pipeline = CaptionPipeline::new(YtDlpFetcher::from_config(&config.yt_dlp))
                .with_progress(!cli.quiet && !print);
            let captions = pipeline
                .download(&request, &scratch_parent(&output_dir, print))
                .await?;

            emit(&captions, &output_dir, name.as_deref(), print)?;
        }
        Commands::Clean {
            paths,
            output,
            name,
            print,
        } => {
            let files = local::expand_inputs(&paths)?;
            if files.is_empty() {
                anyhow::bail!("No subtitle files to clean");
            }

            let output_dir = resolve_output_dir(output, &config);
            let captions = clean_subtitle_files(&files)?;

            emit(&captions, &output_dir, name.as_deref(), print)?;
        }
        Commands::Config { show, init } => {
            if init {
                let path = config.save(cli.config.as_deref())?;
                println!("Configuration written to: {}", path.display());
            } else if show {
                config.display();
            } else {
                config.display();
                println!();
                println!("Edit the config file to change these settings:");
                let path = match cli.config {
                    Some(path) => path,
                    None => Config::config_path()?,
                };
                println!("  {}", path.display());
            }
        }
    }

    Ok(())
}

/// Command line flag first, then config, then the current directory
fn resolve_output_dir(flag: Option<PathBuf>, config: &Config) -> PathBuf {
    flag.or_else(|| config.captions.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn emit(captions: &[CleanedCaptions], output_dir: &Path, name: Option<&str>, print: bool) -> Result<()> {
    if print {
        output::print_to_console(captions);
        return Ok(());
    }

    let written = output::save_all(captions, output_dir, name)?;
    for path in &written {
        tracing::info!("Saved {}", path.display());
    }
    println!("Captions have been saved to {}.", output_dir.display());

    Ok(())
}
