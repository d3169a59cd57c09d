// src/core/progress.rs
use std::io::{self, Write};

const BAR_WIDTH: u64 = 40;

/// Observer of run progress. Never affects what gets written.
pub trait ProgressTracker {
    /// Called once, after discovery, with the number of files to process.
    fn set_total(&mut self, total: u64);
    /// Called after each file, whether it succeeded or failed.
    fn advance(&mut self);
    /// Called before a log message is emitted, so the message does not land
    /// in the middle of whatever the tracker has drawn.
    fn suspend(&mut self) {}
    fn finish(&mut self) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressTracker for NoProgress {
    fn set_total(&mut self, _total: u64) {}
    fn advance(&mut self) {}
}

/// Single-line progress bar, redrawn in place:
/// `Processing |████░░░░| 50% || 1/2 files`.
///
/// [`ProgressTracker::suspend`] ends the bar line; the next update starts a
/// new one below whatever was logged in between.
#[derive(Debug)]
pub struct TerminalProgress<W: Write> {
    out: W,
    total: u64,
    done: u64,
    /// The cursor sits at the end of a drawn bar.
    line_open: bool,
}

impl TerminalProgress<io::Stderr> {
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> TerminalProgress<W> {
    pub const fn new(out: W) -> Self {
        Self {
            out,
            total: 0,
            done: 0,
            line_open: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn percentage(&self) -> u64 {
        if self.total == 0 {
            return 0;
        }
        self.done.min(self.total).saturating_mul(100) / self.total
    }

    fn render(&mut self) {
        let filled = self.percentage().saturating_mul(BAR_WIDTH) / 100;
        let bar: String = (0..BAR_WIDTH)
            .map(|i| if i < filled { '\u{2588}' } else { '\u{2591}' })
            .collect();
        // Drawing failures are not worth interrupting a run for.
        let _ = write!(
            self.out,
            "\rProcessing |{bar}| {}% || {}/{} files",
            self.percentage(),
            self.done,
            self.total
        );
        let _ = self.out.flush();
        self.line_open = true;
    }

    fn end_line(&mut self) {
        if self.line_open {
            let _ = writeln!(self.out);
            let _ = self.out.flush();
            self.line_open = false;
        }
    }
}

impl<W: Write> ProgressTracker for TerminalProgress<W> {
    fn set_total(&mut self, total: u64) {
        self.total = total;
        self.done = 0;
        self.render();
    }

    fn advance(&mut self) {
        self.done = self.done.saturating_add(1);
        self.render();
    }

    fn suspend(&mut self) {
        self.end_line();
    }

    fn finish(&mut self) {
        self.end_line();
    }
}
