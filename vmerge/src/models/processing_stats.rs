// src/models/processing_stats.rs

/// Counters describing one aggregation run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Markdown documents discovered across all readable folders.
    pub total_files: u64,
    /// Documents fully written into their folder's output.
    pub processed_files: u64,
    pub failed_files: u64,
    pub subtrees_processed: u64,
    pub outputs_written: u64,
    /// Documents included with a frontmatter block that failed validation.
    pub frontmatter_warnings: u64,
}

impl ProcessingStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total_files: 0,
            processed_files: 0,
            failed_files: 0,
            subtrees_processed: 0,
            outputs_written: 0,
            frontmatter_warnings: 0,
        }
    }

    #[must_use]
    pub fn calculate_percentage(&self) -> f64 {
        if self.total_files == 0 {
            return 0.0;
        }
        (self.processed_files as f64 / self.total_files as f64) * 100.0
    }
}
