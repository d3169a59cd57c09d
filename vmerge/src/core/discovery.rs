// src/core/discovery.rs
use anyhow::{Context as _, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::models::{FileEntry, SubtreeFiles};
use crate::utils::is_markdown;

/// Recursively lists the markdown documents under `dir`.
///
/// Entries are sorted by file name at every directory level before
/// descending, so the order depends only on the names in the tree and not on
/// the order the filesystem returns them in. Symlinks and other special
/// entries are skipped.
///
/// # Arguments
///
/// * `dir` - The directory to search
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Document paths in depth-first, name-sorted order
///
/// # Errors
///
/// This function may return an error if:
/// * `dir` does not exist or is not a directory
/// * A directory beneath it cannot be read
pub fn find_markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let metadata =
        fs::metadata(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?;
    if !metadata.is_dir() {
        bail!("Not a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk directory: {}", dir.display()))?;
        if entry.file_type().is_file() && is_markdown(entry.file_name()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Discovers the documents of one configured folder of the vault.
///
/// # Errors
///
/// Fails when the folder cannot be listed; see [`find_markdown_files`].
pub fn discover_subtree(vault: &Path, subtree: &str) -> Result<SubtreeFiles> {
    let root = vault.join(subtree);
    let files = find_markdown_files(&root)?
        .into_iter()
        .map(|path| FileEntry::new(path, subtree, &root))
        .collect();

    Ok(SubtreeFiles {
        subtree: subtree.to_owned(),
        root,
        files,
        readable: true,
    })
}
