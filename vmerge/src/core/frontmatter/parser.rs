// src/core/frontmatter/parser.rs
use std::mem;

/// A frontmatter delimiter line, without its newline.
pub const DELIMITER: &[u8] = b"---";
const OPENING: &[u8] = b"---\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Nothing classified yet; the opening delimiter may still be arriving.
    Start,
    /// Opening delimiter seen; looking for the closing delimiter line.
    InFrontmatter,
    /// Classified. Every further byte is body.
    Passthrough,
    /// End of stream reached.
    Done,
}

/// The bytes between the opening and closing delimiter lines of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrontmatter {
    /// Everything after the opening line up to the start of the closing line.
    inner: Vec<u8>,
    /// Whether the closing delimiter line ended with a newline (it may also
    /// be the last line of the document).
    closed_by_newline: bool,
}

impl RawFrontmatter {
    /// The frontmatter text, without the newline that precedes the closing
    /// delimiter.
    #[must_use]
    pub fn text(&self) -> &[u8] {
        self.inner
            .strip_suffix(b"\n")
            .unwrap_or(self.inner.as_slice())
    }

    /// The block exactly as it appeared in the source document.
    #[must_use]
    pub fn original(&self) -> Vec<u8> {
        let mut block = self.delimited_without_newline();
        if self.closed_by_newline {
            block.push(b'\n');
        }
        block
    }

    /// The block with both delimiter lines terminated by a newline.
    #[must_use]
    pub fn delimited(&self) -> Vec<u8> {
        let mut block = self.delimited_without_newline();
        block.push(b'\n');
        block
    }

    fn delimited_without_newline(&self) -> Vec<u8> {
        let mut block = Vec::with_capacity(OPENING.len() + self.inner.len() + OPENING.len());
        block.extend_from_slice(OPENING);
        block.extend_from_slice(&self.inner);
        block.extend_from_slice(DELIMITER);
        block
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    Frontmatter(RawFrontmatter),
    Plain,
}

/// The classification of a document plus the body bytes buffered so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub header: Header,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    /// The chunk was buffered; nothing can be emitted yet.
    NeedMore,
    /// The document was classified by this chunk. Emitted exactly once.
    Resolved(Resolved),
    /// Already classified: the chunk just fed is body and should be forwarded
    /// unchanged.
    Passthrough,
}

/// Incremental frontmatter detector.
///
/// Bytes are fed in chunks of any size and the classification is the same
/// however the document is split. Only complete lines are ever compared with
/// the delimiter: a partial line stays buffered until its newline (or the end
/// of the stream) arrives, and the closing-delimiter search resumes from the
/// start of the first line not yet terminated. Lines already rejected are
/// never scanned again.
#[derive(Debug)]
pub struct FrontmatterParser {
    state: ParserState,
    buffer: Vec<u8>,
    /// Offset in `buffer` of the first line not yet compared with the delimiter.
    scan_from: usize,
}

impl Default for FrontmatterParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrontmatterParser {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ParserState::Start,
            buffer: Vec::new(),
            scan_from: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> ParserState {
        self.state
    }

    pub fn feed(&mut self, chunk: &[u8]) -> Feed {
        match self.state {
            ParserState::Start => {
                self.buffer.extend_from_slice(chunk);
                if self.buffer.len() < OPENING.len() {
                    if OPENING.starts_with(&self.buffer) {
                        return Feed::NeedMore;
                    }
                    return Feed::Resolved(self.resolve_plain());
                }
                if !self.buffer.starts_with(OPENING) {
                    return Feed::Resolved(self.resolve_plain());
                }
                self.state = ParserState::InFrontmatter;
                self.scan_from = OPENING.len();
                self.scan_for_closing()
            }
            ParserState::InFrontmatter => {
                self.buffer.extend_from_slice(chunk);
                self.scan_for_closing()
            }
            // Bytes fed after the end of the stream are forwarded as well.
            ParserState::Passthrough | ParserState::Done => Feed::Passthrough,
        }
    }

    /// Signals the end of the stream and flushes whatever is still buffered.
    ///
    /// Returns `None` when the document was already classified by `feed`.
    pub fn finish(&mut self) -> Option<Resolved> {
        let previous = mem::replace(&mut self.state, ParserState::Done);
        let buffer = mem::take(&mut self.buffer);
        match previous {
            ParserState::Start => Some(Resolved {
                header: Header::Plain,
                body: buffer,
            }),
            ParserState::InFrontmatter => {
                // The closing delimiter may be the unterminated last line.
                if buffer.get(self.scan_from..) == Some(DELIMITER) {
                    let inner = buffer
                        .get(OPENING.len()..self.scan_from)
                        .unwrap_or_default()
                        .to_vec();
                    Some(Resolved {
                        header: Header::Frontmatter(RawFrontmatter {
                            inner,
                            closed_by_newline: false,
                        }),
                        body: Vec::new(),
                    })
                } else {
                    // Unclosed frontmatter is ordinary content.
                    Some(Resolved {
                        header: Header::Plain,
                        body: buffer,
                    })
                }
            }
            ParserState::Passthrough | ParserState::Done => None,
        }
    }

    fn resolve_plain(&mut self) -> Resolved {
        self.state = ParserState::Passthrough;
        Resolved {
            header: Header::Plain,
            body: mem::take(&mut self.buffer),
        }
    }

    fn scan_for_closing(&mut self) -> Feed {
        while let Some(offset) = self
            .buffer
            .get(self.scan_from..)
            .and_then(|rest| rest.iter().position(|&b| b == b'\n'))
        {
            let line_start = self.scan_from;
            let line_end = line_start.saturating_add(offset);
            if self.buffer.get(line_start..line_end) == Some(DELIMITER) {
                let body = self.buffer.split_off(line_end.saturating_add(1));
                let inner = self
                    .buffer
                    .get(OPENING.len()..line_start)
                    .unwrap_or_default()
                    .to_vec();
                self.buffer.clear();
                self.state = ParserState::Passthrough;
                return Feed::Resolved(Resolved {
                    header: Header::Frontmatter(RawFrontmatter {
                        inner,
                        closed_by_newline: true,
                    }),
                    body,
                });
            }
            self.scan_from = line_end.saturating_add(1);
        }
        Feed::NeedMore
    }
}
