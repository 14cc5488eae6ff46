//! Report module - diff event sinks.
//!
//! The engine emits events into a [`ReportSink`]; console printing, CSV
//! export, and JSON output are interchangeable implementations injected by
//! the caller.

mod console;
mod csv;
mod json;

pub use console::ConsoleReport;
pub use csv::CsvReport;
pub use json::JsonLinesReport;

use crate::diff::DiffEvent;

/// Consumer of an ordered diff event sequence.
pub trait ReportSink {
    /// Accepts one event. Events arrive in the engine's deterministic order.
    fn accept(&mut self, event: DiffEvent);
}

/// Sink that collects events into a vector.
#[derive(Debug, Default)]
pub struct VecSink {
    events: Vec<DiffEvent>,
}

impl VecSink {
    pub fn new() -> VecSink {
        VecSink::default()
    }

    pub fn events(&self) -> &[DiffEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<DiffEvent> {
        self.events
    }
}

impl ReportSink for VecSink {
    fn accept(&mut self, event: DiffEvent) {
        self.events.push(event);
    }
}
