// src/config.rs
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs::{self, OpenOptions};
use std::io::{self, Write as _};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

use crate::utils::output_file_name;

pub const CONFIG_TEMPLATE: &str = r#"# Root of the vault to read notes from.
vault = "/path/to/your/vault"

# Folders inside the vault, relative to it. Each one is merged into
# <output>/<last segment of the folder>.md
folders = ["FolderA", "FolderB"]

# Directory the merged documents are written to. Created if missing.
output = "/path/to/output/directory"
"#;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to determine the current directory: {0}")]
    CurrentDir(#[source] io::Error),

    #[error("Vault directory not found: {}", .0.display())]
    VaultNotFound(PathBuf),

    #[error("Vault path is not a directory: {}", .0.display())]
    VaultNotDirectory(PathBuf),

    #[error("Invalid folder '{folder}': {reason}")]
    InvalidFolder { folder: String, reason: &'static str },

    #[error("Folders '{first}' and '{second}' would both be written to {file_name}")]
    OutputCollision {
        first: String,
        second: String,
        file_name: String,
    },

    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Config file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Failed to write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Deserialize, Debug)]
struct ConfigFile {
    vault: PathBuf,
    folders: Vec<String>,
    output: PathBuf,
}

/// A validated run configuration: the vault exists, every folder specifier
/// is a relative path inside it with its own output name, and the output
/// directory exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Absolute path of the vault root.
    pub vault: PathBuf,
    /// Folder specifiers relative to the vault, in processing order.
    pub folders: Vec<String>,
    /// Absolute path of the output directory.
    pub output: PathBuf,
}

impl Config {
    /// Validates a configuration and creates its output directory.
    ///
    /// Relative `vault` and `output` paths are resolved against the current
    /// directory.
    ///
    /// # Errors
    ///
    /// This function may return an error if:
    /// * The vault does not exist or is not a directory
    /// * A folder specifier is empty, absolute, leaves the vault, or has no
    ///   final segment to name its output after
    /// * Two folder specifiers share an output file name
    /// * The output directory cannot be created
    pub fn new(vault: PathBuf, folders: Vec<String>, output: PathBuf) -> Result<Self, ConfigError> {
        let vault = absolute(vault)?;
        let output = absolute(output)?;

        match fs::metadata(&vault) {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => return Err(ConfigError::VaultNotDirectory(vault)),
            Err(_) => return Err(ConfigError::VaultNotFound(vault)),
        }

        let mut seen: HashMap<String, &str> = HashMap::new();
        for folder in &folders {
            let file_name = validate_folder(folder)?;
            if let Some(first) = seen.get(&file_name) {
                return Err(ConfigError::OutputCollision {
                    first: (*first).to_owned(),
                    second: folder.clone(),
                    file_name,
                });
            }
            seen.insert(file_name, folder);
        }

        fs::create_dir_all(&output).map_err(|source| ConfigError::CreateOutput {
            path: output.clone(),
            source,
        })?;

        Ok(Self {
            vault,
            folders,
            output,
        })
    }

    /// Reads, parses and validates a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`], [`ConfigError::Read`] or
    /// [`ConfigError::Parse`] for an unusable file, and any error from
    /// [`Config::new`] for unusable contents.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let file: ConfigFile = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Self::new(file.vault, file.folders, file.output)
    }
}

/// Writes the template config to `path`. An existing file is never replaced.
///
/// # Errors
///
/// Returns [`ConfigError::AlreadyExists`] if `path` exists, or
/// [`ConfigError::Write`] if the file cannot be written.
pub fn init_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| {
            if source.kind() == io::ErrorKind::AlreadyExists {
                ConfigError::AlreadyExists(path.to_path_buf())
            } else {
                write_error(source)
            }
        })?;
    file.write_all(CONFIG_TEMPLATE.as_bytes()).map_err(write_error)
}

fn absolute(path: PathBuf) -> Result<PathBuf, ConfigError> {
    if path.is_absolute() {
        return Ok(path);
    }
    Ok(env::current_dir().map_err(ConfigError::CurrentDir)?.join(path))
}

fn validate_folder(folder: &str) -> Result<String, ConfigError> {
    let invalid = |reason| ConfigError::InvalidFolder {
        folder: folder.to_owned(),
        reason,
    };

    if folder.trim().is_empty() {
        return Err(invalid("must not be empty"));
    }
    let path = Path::new(folder);
    if path.has_root() || path.is_absolute() {
        return Err(invalid("must be relative to the vault"));
    }
    if path.components().any(|c| c == Component::ParentDir) {
        return Err(invalid("must not leave the vault"));
    }
    output_file_name(folder).ok_or_else(|| invalid("must name a directory"))
}
