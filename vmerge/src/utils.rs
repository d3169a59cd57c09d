// src/utils.rs
use std::ffi::OsStr;
use std::path::Path;

pub const MARKDOWN_EXTENSION: &str = ".md";

/// Output file name for a folder specifier: its final path segment with the
/// markdown extension appended, e.g. `PARA/2 Areas` becomes `2 Areas.md`.
///
/// Returns `None` when the specifier has no final normal segment (`""`, `.`,
/// `..`, `/`).
#[must_use]
pub fn output_file_name(subtree: &str) -> Option<String> {
    Path::new(subtree)
        .file_name()
        .map(|name| format!("{}{MARKDOWN_EXTENSION}", name.to_string_lossy()))
}

#[must_use]
pub fn is_markdown(file_name: &OsStr) -> bool {
    file_name
        .as_encoded_bytes()
        .ends_with(MARKDOWN_EXTENSION.as_bytes())
}
