//! JSON-lines report sink.

use std::io::Write;

use super::ReportSink;
use crate::diff::DiffEvent;

/// Writes one JSON object per line, for machine consumption.
pub struct JsonLinesReport<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesReport<W> {
    pub fn new(out: W) -> JsonLinesReport<W> {
        JsonLinesReport { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonLinesReport<W> {
    fn accept(&mut self, event: DiffEvent) {
        if let Ok(line) = serde_json::to_string(&event) {
            writeln!(self.out, "{}", line).ok();
        }
    }
}
