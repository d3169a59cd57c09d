// src/core/aggregator.rs
use anyhow::{Context as _, Result};
use std::fs::File;
use std::io::{self, BufWriter, ErrorKind, Read, Seek as _, SeekFrom, Write as _};
use std::path::{Path, PathBuf};

use crate::core::frontmatter::{Feed, FrontmatterParser, Header, Resolved, validate_frontmatter};
use crate::logging::Logger;
use crate::models::FileEntry;
use crate::utils::output_file_name;

pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// What happened to a document's frontmatter on its way into the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterStatus {
    Absent,
    Valid,
    /// Present but failed validation; written through unchanged.
    Invalid,
}

/// Writes the documents of one folder into that folder's output file.
///
/// The output file is created when the aggregator is and is written only
/// through it; it is flushed and closed by [`FolderAggregator::finish`] or on
/// drop. A document either lands in the output as a whole block or not at
/// all.
#[derive(Debug)]
pub struct FolderAggregator {
    subtree: String,
    output_path: PathBuf,
    writer: BufWriter<File>,
    chunk_size: usize,
    documents: u64,
    /// Bytes handed to `writer` so far.
    written: u64,
    /// Output length at the end of the last complete block.
    committed: u64,
}

impl FolderAggregator {
    /// Creates (or truncates) the output file for `subtree` in `output_dir`.
    ///
    /// # Errors
    ///
    /// This function may return an error if:
    /// * The specifier has no final path segment to name the output after
    /// * The output file cannot be created
    pub fn create(output_dir: &Path, subtree: &str, chunk_size: usize) -> Result<Self> {
        let file_name = output_file_name(subtree)
            .with_context(|| format!("Cannot derive an output file name from folder '{subtree}'"))?;
        let output_path = output_dir.join(file_name);
        let file = File::create(&output_path)
            .with_context(|| format!("Failed to create output file: {}", output_path.display()))?;

        Ok(Self {
            subtree: subtree.to_owned(),
            output_path,
            writer: BufWriter::new(file),
            chunk_size: chunk_size.max(1),
            documents: 0,
            written: 0,
            committed: 0,
        })
    }

    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    #[must_use]
    pub fn subtree(&self) -> &str {
        &self.subtree
    }

    #[must_use]
    pub const fn documents(&self) -> u64 {
        self.documents
    }

    /// Streams one document into the output as a block of
    /// `\n# <relative path>\n\n[frontmatter]<body>\n\n`.
    ///
    /// Frontmatter that fails validation is reported through `logger` as a
    /// warning and copied through as it appeared in the source.
    ///
    /// # Errors
    ///
    /// This function may return an error if:
    /// * The source document cannot be opened or read
    /// * Writing to the output file fails
    ///
    /// On error, any part of the block already written is removed again.
    pub fn append_document(
        &mut self,
        entry: &FileEntry,
        logger: &dyn Logger,
    ) -> Result<FrontmatterStatus> {
        let source = File::open(&entry.path)
            .with_context(|| format!("Failed to open {}", entry.path.display()))?;
        self.append_from(entry, source, logger)
    }

    fn append_from<R: Read>(
        &mut self,
        entry: &FileEntry,
        mut source: R,
        logger: &dyn Logger,
    ) -> Result<FrontmatterStatus> {
        match self.stream_block(entry, &mut source, logger) {
            Ok(status) => {
                self.committed = self.written;
                self.documents = self.documents.saturating_add(1);
                Ok(status)
            }
            Err(e) => match self.rollback() {
                Ok(()) => Err(e),
                Err(rollback) => Err(e.context(format!(
                    "Failed to remove the partial block from {}: {rollback}",
                    self.output_path.display()
                ))),
            },
        }
    }

    fn stream_block<R: Read>(
        &mut self,
        entry: &FileEntry,
        source: &mut R,
        logger: &dyn Logger,
    ) -> Result<FrontmatterStatus> {
        let mut parser = FrontmatterParser::new();
        let mut chunk = vec![0_u8; self.chunk_size];
        let mut status = FrontmatterStatus::Absent;

        loop {
            let read = match source.read(&mut chunk) {
                Ok(0) => break,
                Ok(read) => read,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to read {}", entry.path.display()));
                }
            };
            let bytes = chunk.get(..read).unwrap_or_default();
            match parser.feed(bytes) {
                Feed::NeedMore => {}
                Feed::Resolved(resolved) => status = self.write_resolved(entry, resolved, logger)?,
                Feed::Passthrough => self.write(bytes)?,
            }
        }
        if let Some(resolved) = parser.finish() {
            status = self.write_resolved(entry, resolved, logger)?;
        }
        self.write(b"\n\n")?;
        Ok(status)
    }

    /// Cuts the output back to the end of the last complete block.
    fn rollback(&mut self) -> io::Result<()> {
        self.writer.flush()?;
        let file = self.writer.get_mut();
        file.set_len(self.committed)?;
        file.seek(SeekFrom::Start(self.committed))?;
        self.written = self.committed;
        Ok(())
    }

    /// Flushes the output and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error if buffered output cannot be written to disk.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer
            .flush()
            .with_context(|| format!("Failed to write {}", self.output_path.display()))?;
        Ok(self.output_path)
    }

    fn write_resolved(
        &mut self,
        entry: &FileEntry,
        resolved: Resolved,
        logger: &dyn Logger,
    ) -> Result<FrontmatterStatus> {
        self.write(format!("\n{}\n\n", entry.heading()).as_bytes())?;

        let status = match resolved.header {
            Header::Plain => FrontmatterStatus::Absent,
            Header::Frontmatter(raw) => match validate_frontmatter(&raw) {
                Ok(_) => {
                    self.write(&raw.delimited())?;
                    FrontmatterStatus::Valid
                }
                Err(e) => {
                    logger.warn(&format!(
                        "Invalid frontmatter in {}: {e}",
                        entry.path.display()
                    ));
                    self.write(&raw.original())?;
                    FrontmatterStatus::Invalid
                }
            },
        };

        self.write(&resolved.body)?;
        Ok(status)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer
            .write_all(bytes)
            .with_context(|| format!("Failed to write {}", self.output_path.display()))?;
        self.written = self
            .written
            .saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
        Ok(())
    }
}
