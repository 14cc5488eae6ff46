//! CSV report sink.
//!
//! Renders the spreadsheet layout used for drift audits: four sections,
//! one per change family, each with its own header row. Events that have
//! no spreadsheet column group (attribute changes, tab/section label
//! changes) are not part of this export.

use std::io::{self, Write};

use super::ReportSink;
use crate::diff::{DiffEvent, OwnerKind};

/// Buffers events and renders them as sectioned CSV.
#[derive(Debug, Default)]
pub struct CsvReport {
    fields: Vec<[String; 4]>,
    labels: Vec<[String; 3]>,
    translations: Vec<[String; 4]>,
    moves: Vec<[String; 5]>,
}

impl CsvReport {
    pub fn new() -> CsvReport {
        CsvReport::default()
    }

    /// Renders all sections. Empty sections keep their header row so the
    /// layout is stable across runs.
    pub fn render(&self) -> String {
        let mut out = String::new();

        section(&mut out, "Fields", &["Field", "Change", "Tab", "Section"], &self.fields);
        out.push('\n');
        section(&mut out, "Labels", &["Field", "Old Label", "New Label"], &self.labels);
        out.push('\n');
        section(
            &mut out,
            "Translations",
            &["Field", "Language", "Old", "New"],
            &self.translations,
        );
        out.push('\n');
        section(
            &mut out,
            "TabSection",
            &["Field", "Old Tab", "Old Section", "New Tab", "New Section"],
            &self.moves,
        );

        out
    }

    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(self.render().as_bytes())
    }
}

impl ReportSink for CsvReport {
    fn accept(&mut self, event: DiffEvent) {
        match event {
            DiffEvent::FieldAdded {
                field, tab, section, ..
            } => self.fields.push([field, "Added".into(), tab, section]),
            DiffEvent::FieldRemoved {
                field, tab, section, ..
            } => self.fields.push([field, "Removed".into(), tab, section]),
            DiffEvent::CustomLabelAdded { field, label, .. } => {
                self.labels.push([field, String::new(), label])
            }
            DiffEvent::CustomLabelRemoved { field, label, .. } => {
                self.labels.push([field, label, String::new()])
            }
            DiffEvent::CustomLabelModified { field, old, new, .. } => {
                self.labels.push([field, old, new])
            }
            DiffEvent::LabelAdded {
                owner,
                language,
                text,
            } if owner.kind == OwnerKind::Field => {
                self.translations.push([owner.name, language, String::new(), text])
            }
            DiffEvent::LabelRemoved {
                owner,
                language,
                text,
            } if owner.kind == OwnerKind::Field => {
                self.translations.push([owner.name, language, text, String::new()])
            }
            DiffEvent::LabelModified {
                owner,
                language,
                old,
                new,
            } if owner.kind == OwnerKind::Field => {
                self.translations.push([owner.name, language, old, new])
            }
            DiffEvent::HierarchyMoved {
                field,
                old_tab,
                old_section,
                new_tab,
                new_section,
                ..
            } => self
                .moves
                .push([field, old_tab, old_section, new_tab, new_section]),
            _ => {}
        }
    }
}

fn section<const N: usize>(out: &mut String, title: &str, header: &[&str], rows: &[[String; N]]) {
    out.push_str("# ");
    out.push_str(title);
    out.push('\n');
    out.push_str(&header.iter().map(|h| escape(h)).collect::<Vec<_>>().join(","));
    out.push('\n');
    for row in rows {
        out.push_str(&row.iter().map(|v| escape(v)).collect::<Vec<_>>().join(","));
        out.push('\n');
    }
}

/// Quotes values containing separators, quotes, or line breaks.
fn escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
