// src/lib.rs
pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
pub mod models;
pub mod utils;

pub use crate::cli::{Args, run};
pub use crate::config::{Config, ConfigError, init_config};
pub use crate::core::aggregator::{DEFAULT_CHUNK_SIZE, FolderAggregator, FrontmatterStatus};
pub use crate::core::coordinator::{RunOptions, discover_all, process_vault};
pub use crate::core::discovery::{discover_subtree, find_markdown_files};
pub use crate::core::frontmatter::{
    Feed, FrontmatterError, FrontmatterParser, Header, ParserState, RawFrontmatter, Resolved,
    validate_frontmatter,
};
pub use crate::core::progress::{NoProgress, ProgressTracker, TerminalProgress};
pub use crate::logging::{Logger, TracingLogger};
pub use crate::models::{DiscoveryResult, FileEntry, Frontmatter, ProcessingStats, SubtreeFiles};
