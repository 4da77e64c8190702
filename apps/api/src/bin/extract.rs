//! One-shot extraction: reads a job description file and prints the result.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, Parser};
use tracing_subscriber::EnvFilter;

use skiller::annotation::HttpAnnotator;
use skiller::config::Config;
use skiller::extraction::SkillExtractor;

const USAGE_ERROR: &str = "[ ERROR ] please specify the file with job description in command line";

#[derive(Parser)]
#[command(name = "skiller-extract")]
#[command(about = "Extract the skillset and job level from a job description file")]
struct Cli {
    /// File containing the job description (HTML or plain text)
    path: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => {
            eprintln!("{USAGE_ERROR}");
            return ExitCode::FAILURE;
        }
    };

    match run(&cli.path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ ERROR ] {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(path: &Path) -> Result<()> {
    let config = Config::from_env()?;

    // stdout carries only the result
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("skiller={}", &config.rust_log))
        }))
        .init();

    let description = read_description(path)?;

    let annotator = HttpAnnotator::new(&config.annotator_url)?;
    let extractor = SkillExtractor::new(Arc::new(annotator)).with_options(config.extraction);
    let result = extractor.extract(&description).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Reads the whole file and trims surrounding whitespace.
fn read_description(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read job description from {}", path.display()))?;
    Ok(raw.trim().to_string())
}
