// src/core/coordinator.rs
use std::cell::RefCell;
use std::path::Path;

use crate::config::{Config, ConfigError};
use crate::core::aggregator::{DEFAULT_CHUNK_SIZE, FolderAggregator, FrontmatterStatus};
use crate::core::discovery::discover_subtree;
use crate::core::progress::ProgressTracker;
use crate::logging::Logger;
use crate::models::{DiscoveryResult, ProcessingStats, SubtreeFiles};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Size of the buffer source documents are read through.
    pub chunk_size: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Log and progress output of one run. Every message first suspends the
/// progress tracker so the two never share a terminal line.
struct Reporter<'a, 'p> {
    logger: &'a dyn Logger,
    progress: RefCell<&'p mut dyn ProgressTracker>,
}

impl<'a, 'p> Reporter<'a, 'p> {
    fn new(logger: &'a dyn Logger, progress: &'p mut dyn ProgressTracker) -> Self {
        Self {
            logger,
            progress: RefCell::new(progress),
        }
    }

    fn set_total(&self, total: u64) {
        if let Ok(mut progress) = self.progress.try_borrow_mut() {
            progress.set_total(total);
        }
    }

    fn advance(&self) {
        if let Ok(mut progress) = self.progress.try_borrow_mut() {
            progress.advance();
        }
    }

    fn finish(&self) {
        if let Ok(mut progress) = self.progress.try_borrow_mut() {
            progress.finish();
        }
    }

    fn suspend(&self) {
        if let Ok(mut progress) = self.progress.try_borrow_mut() {
            progress.suspend();
        }
    }
}

impl Logger for Reporter<'_, '_> {
    fn info(&self, message: &str) {
        self.suspend();
        self.logger.info(message);
    }

    fn warn(&self, message: &str) {
        self.suspend();
        self.logger.warn(message);
    }

    fn error(&self, message: &str) {
        self.suspend();
        self.logger.error(message);
    }
}

/// Discovers the documents of every configured folder, in configured order.
///
/// A folder that cannot be read is logged as a warning and contributes no
/// files; the remaining folders are still searched.
pub fn discover_all(config: &Config, logger: &dyn Logger) -> DiscoveryResult {
    let subtrees = config
        .folders
        .iter()
        .map(|folder| {
            discover_subtree(&config.vault, folder).unwrap_or_else(|e| {
                logger.warn(&format!("Skipping folder {folder}: {e:#}"));
                SubtreeFiles::unreadable(folder.clone(), config.vault.join(folder))
            })
        })
        .collect();

    DiscoveryResult { subtrees }
}

/// Aggregates every configured folder into its output file.
///
/// Folders are handled one at a time and documents one at a time, in
/// discovery order. A document that fails is logged as an error and counted
/// as failed; the run carries on with the next one.
pub fn run(
    config: &Config,
    options: &RunOptions,
    logger: &dyn Logger,
    progress: &mut dyn ProgressTracker,
) -> ProcessingStats {
    let reporter = Reporter::new(logger, progress);
    let discovery = discover_all(config, &reporter);
    let mut stats = ProcessingStats::new();
    stats.total_files = discovery.total_files();
    reporter.set_total(stats.total_files);

    for subtree in &discovery.subtrees {
        aggregate_subtree(config, subtree, options, &reporter, &mut stats);
        stats.subtrees_processed = stats.subtrees_processed.saturating_add(1);
    }
    reporter.finish();

    reporter.info("Processing complete");
    reporter.info(&format!(
        "Total folders processed: {}",
        stats.subtrees_processed
    ));
    reporter.info(&format!(
        "Total files processed: {}/{}",
        stats.processed_files, stats.total_files
    ));

    stats
}

/// Loads the config at `config_path` and runs the aggregation.
///
/// # Errors
///
/// Only configuration problems are returned; they abort the run before any
/// folder is searched. Everything else is logged and reflected in the stats.
pub fn process_vault(
    config_path: &Path,
    options: &RunOptions,
    logger: &dyn Logger,
    progress: &mut dyn ProgressTracker,
) -> Result<ProcessingStats, ConfigError> {
    let config = Config::load(config_path)?;
    Ok(run(&config, options, logger, progress))
}

fn aggregate_subtree(
    config: &Config,
    subtree: &SubtreeFiles,
    options: &RunOptions,
    reporter: &Reporter<'_, '_>,
    stats: &mut ProcessingStats,
) {
    if subtree.files.is_empty() {
        if subtree.readable {
            reporter.warn(&format!(
                "No markdown files found in folder {}; no output written",
                subtree.subtree
            ));
        }
        return;
    }

    let mut aggregator =
        match FolderAggregator::create(&config.output, &subtree.subtree, options.chunk_size) {
            Ok(aggregator) => aggregator,
            Err(e) => {
                reporter.error(&format!("Skipping folder {}: {e:#}", subtree.subtree));
                for _ in &subtree.files {
                    stats.failed_files = stats.failed_files.saturating_add(1);
                    reporter.advance();
                }
                return;
            }
        };

    for entry in &subtree.files {
        match aggregator.append_document(entry, reporter) {
            Ok(status) => {
                stats.processed_files = stats.processed_files.saturating_add(1);
                if status == FrontmatterStatus::Invalid {
                    stats.frontmatter_warnings = stats.frontmatter_warnings.saturating_add(1);
                }
            }
            Err(e) => {
                reporter.error(&format!("Error processing {}: {e:#}", entry.path.display()));
                stats.failed_files = stats.failed_files.saturating_add(1);
            }
        }
        reporter.advance();
    }

    let documents = aggregator.documents();
    match aggregator.finish() {
        Ok(path) => {
            stats.outputs_written = stats.outputs_written.saturating_add(1);
            reporter.info(&format!("Wrote {documents} documents to {}", path.display()));
        }
        Err(e) => reporter.error(&format!("{e:#}")),
    }
}
