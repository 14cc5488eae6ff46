//! Console report sink.

use std::io::Write;

use super::ReportSink;
use crate::diff::DiffEvent;

/// Writes one human-readable line per event.
pub struct ConsoleReport<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReport<W> {
    pub fn new(out: W) -> ConsoleReport<W> {
        ConsoleReport { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for ConsoleReport<W> {
    fn accept(&mut self, event: DiffEvent) {
        writeln!(self.out, "{}", event).ok();
    }
}
