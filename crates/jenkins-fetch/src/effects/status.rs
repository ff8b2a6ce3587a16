use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::core::{format_decimal, kilobytes_per_second};

/// Bytes between two progress lines.
pub const REPORT_THRESHOLD: u64 = 256_000;

pub(crate) const ERASE_LINE: &str = "\u{1b}[2K";
pub(crate) const START_OF_LINE: &str = "\r";

/// Write sink that counts transferred bytes and reports progress.
///
/// Outside quiet mode, one status line is written to `out` each time the
/// running total crosses a multiple of [`REPORT_THRESHOLD`]. Lines overwrite
/// each other in place. The sink discards the data itself.
pub struct StatusWriter<W: Write> {
    out: W,
    name: String,
    quiet: bool,
    total: u64,
    reported: u64,
    start: Instant,
}

impl<W: Write> StatusWriter<W> {
    pub fn new(out: W, name: impl Into<String>, quiet: bool) -> Self {
        Self {
            out,
            name: name.into(),
            quiet,
            total: 0,
            reported: 0,
            start: Instant::now(),
        }
    }

    /// Bytes observed so far.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Time since the sink was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn observe(&mut self, len: usize) {
        self.total += len as u64;
        if self.quiet {
            return;
        }

        let crossed = self.total / REPORT_THRESHOLD;
        while self.reported < crossed {
            self.reported += 1;
            self.emit();
        }
    }

    // Progress output never fails the transfer.
    fn emit(&mut self) {
        let kb = self.total as f64 / 1000.0;
        let kbps = kilobytes_per_second(self.total, self.start.elapsed());
        let _ = write!(
            self.out,
            "{ERASE_LINE}{START_OF_LINE}Downloading {} {} KB ({} KB/s)",
            self.name,
            format_decimal(kb),
            format_decimal(kbps)
        )
        .and_then(|()| self.out.flush());
    }
}

impl<W: Write> Write for StatusWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.observe(buf.len());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
