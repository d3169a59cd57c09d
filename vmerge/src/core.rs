// src/core.rs
pub mod aggregator;
pub mod coordinator;
pub mod discovery;
pub mod frontmatter;
pub mod progress;
