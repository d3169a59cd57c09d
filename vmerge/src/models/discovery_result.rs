// src/models/discovery_result.rs
use crate::models::FileEntry;
use std::path::PathBuf;

/// The documents found under one configured folder, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtreeFiles {
    pub subtree: String,
    pub root: PathBuf,
    pub files: Vec<FileEntry>,
    /// `false` when the folder root could not be read at all.
    pub readable: bool,
}

impl SubtreeFiles {
    #[must_use]
    pub const fn unreadable(subtree: String, root: PathBuf) -> Self {
        Self {
            subtree,
            root,
            files: Vec::new(),
            readable: false,
        }
    }
}

/// Discovery output for a whole run, in configured folder order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryResult {
    pub subtrees: Vec<SubtreeFiles>,
}

impl DiscoveryResult {
    #[must_use]
    pub fn total_files(&self) -> u64 {
        self.subtrees
            .iter()
            .map(|subtree| u64::try_from(subtree.files.len()).unwrap_or(u64::MAX))
            .fold(0, u64::saturating_add)
    }

    #[must_use]
    pub fn get(&self, subtree: &str) -> Option<&SubtreeFiles> {
        self.subtrees.iter().find(|s| s.subtree == subtree)
    }
}
