// tests/integration_tests/common.rs
use anyhow::Result;
use std::cell::RefCell;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vmerge::{Config, Logger};

pub fn create_test_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(&path)?;
    file.write_all(content.as_bytes())?;
    Ok(path)
}

/// A vault with two populated folders and one folder that should never be
/// read.
pub fn setup_test_vault() -> Result<TempDir> {
    let temp_dir = TempDir::new()?;

    create_test_file(
        temp_dir.path(),
        "folder1/doc1.md",
        "---\ntitle: Test Document 1\ndate: 2024-01-15\n---\n\nThis is a test document in folder1\n",
    )?;
    create_test_file(
        temp_dir.path(),
        "folder1/subfolder/doc2.md",
        "---\ntitle: Test Document 2\ntags: [nested]\n---\n\nThis is a test document in a subfolder\n",
    )?;
    create_test_file(temp_dir.path(), "folder1/attachment.png", "binary-ish")?;
    create_test_file(
        temp_dir.path(),
        "folder2/doc3.md",
        "---\ntitle: Test Document 3\n---\n\nThis is a test document in folder2\n",
    )?;
    create_test_file(temp_dir.path(), "unlisted/ignored.md", "Never aggregated")?;

    Ok(temp_dir)
}

pub fn config(vault: &Path, folders: &[&str], output: &Path) -> Result<Config> {
    Ok(Config::new(
        vault.to_path_buf(),
        folders.iter().map(|f| (*f).to_owned()).collect(),
        output.to_path_buf(),
    )?)
}

pub fn write_config(dir: &Path, vault: &Path, folders: &[&str], output: &Path) -> Result<PathBuf> {
    let folders = folders
        .iter()
        .map(|f| format!("{f:?}"))
        .collect::<Vec<_>>()
        .join(", ");
    create_test_file(
        dir,
        "vmerge.toml",
        &format!(
            "vault = {:?}\nfolders = [{folders}]\noutput = {:?}\n",
            vault.display().to_string(),
            output.display().to_string()
        ),
    )
}

#[derive(Debug, Default)]
pub struct MockLogger {
    pub info: RefCell<Vec<String>>,
    pub warn: RefCell<Vec<String>>,
    pub error: RefCell<Vec<String>>,
}

impl Logger for MockLogger {
    fn info(&self, message: &str) {
        self.info.borrow_mut().push(message.to_owned());
    }

    fn warn(&self, message: &str) {
        self.warn.borrow_mut().push(message.to_owned());
    }

    fn error(&self, message: &str) {
        self.error.borrow_mut().push(message.to_owned());
    }
}
