// src/cli.rs
use anyhow::{Context as _, Result};
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use std::path::PathBuf;

use crate::config::init_config;
use crate::core::aggregator::DEFAULT_CHUNK_SIZE;
use crate::core::coordinator::{RunOptions, process_vault};
use crate::core::progress::{NoProgress, ProgressTracker, TerminalProgress};
use crate::logging::{Logger as _, TracingLogger};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file
    #[arg(short, long, required_unless_present = "init_config")]
    pub config: Option<PathBuf>,

    /// Append log output to this file as well as stderr
    #[arg(short, long)]
    pub log: Option<PathBuf>,

    /// Write a template configuration file to this path and exit
    #[arg(long, value_name = "PATH")]
    pub init_config: Option<PathBuf>,

    /// Don't draw the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Bytes read from a note at a time
    #[arg(
        long,
        default_value_t = DEFAULT_CHUNK_SIZE,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub chunk_size: usize,
}

/// Runs the command described by `args`.
///
/// # Errors
///
/// Returns an error when the template config cannot be written, or when the
/// configuration is missing or invalid. Problems with individual folders or
/// notes are logged and never fail the run.
pub fn run(args: Args) -> Result<()> {
    let logger = TracingLogger;

    if let Some(path) = args.init_config {
        init_config(&path)?;
        logger.info(&format!("Template config file created at: {}", path.display()));
        return Ok(());
    }

    let config_path = args
        .config
        .context("--config is required unless using --init-config")?;
    let options = RunOptions {
        chunk_size: args.chunk_size,
    };
    let mut progress: Box<dyn ProgressTracker> = if args.no_progress {
        Box::new(NoProgress)
    } else {
        Box::new(TerminalProgress::stderr())
    };

    let stats = process_vault(&config_path, &options, &logger, progress.as_mut())?;
    println!(
        "Processed {}/{} files from {} folders ({:.2}%)",
        stats.processed_files,
        stats.total_files,
        stats.subtrees_processed,
        stats.calculate_percentage()
    );

    Ok(())
}
