// src/models/file_entry.rs
use std::path::{Path, PathBuf};

/// A markdown document found under one of the configured folders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path of the document.
    pub path: PathBuf,
    /// The folder specifier the document was discovered under, as configured.
    pub subtree: String,
    /// Path of the document relative to the folder root. Used as its heading.
    pub relative_path: PathBuf,
}

impl FileEntry {
    /// Builds an entry for `path`, falling back to the full path when it does
    /// not live under `root`.
    #[must_use]
    pub fn new(path: PathBuf, subtree: &str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.clone(), Path::to_path_buf);
        Self {
            path,
            subtree: subtree.to_owned(),
            relative_path,
        }
    }

    #[must_use]
    pub fn heading(&self) -> String {
        format!("# {}", self.relative_path.display())
    }
}
