// src/models.rs
mod discovery_result;
mod file_entry;
mod frontmatter;
mod processing_stats;

pub use discovery_result::{DiscoveryResult, SubtreeFiles};
pub use file_entry::FileEntry;
pub use frontmatter::Frontmatter;
pub use processing_stats::ProcessingStats;
