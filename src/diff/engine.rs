//! Comparison engine.
//!
//! A pure pipeline over two prebuilt indexes: identifier set algebra first,
//! then per-pair attribute, custom-label, and per-language label diffs.
//! Neither input is mutated and no state survives a run.

use super::attributes::diff_attributes;
use super::delta::KeyDelta;
use super::event::{DiffEvent, Owner, OwnerKind};
use super::labels::diff_labels;
use crate::form::{FieldRecord, FormIndex};
use crate::report::{ReportSink, VecSink};

/// Compares two indexed forms and returns the ordered event sequence.
pub fn diff(left: &FormIndex, right: &FormIndex) -> Vec<DiffEvent> {
    let mut sink = VecSink::new();
    diff_with(left, right, &mut sink);
    sink.into_events()
}

/// Compares two indexed forms, emitting events into `sink`.
///
/// Event order is deterministic: removed fields, added fields, then per
/// common field (sorted by identifier) the hierarchy move, cell attributes,
/// control attributes, custom-label change, and per-language labels; then
/// common tabs; then common sections. Repeated runs over unchanged input
/// produce byte-identical reports.
pub fn diff_with(left: &FormIndex, right: &FormIndex, sink: &mut dyn ReportSink) {
    let fields = KeyDelta::between(&left.fields, &right.fields);

    for id in &fields.removed {
        let record = &left.fields[id];
        sink.accept(DiffEvent::FieldRemoved {
            id: record.id.clone(),
            field: record.field_name.clone(),
            tab: record.tab_name.clone(),
            section: record.section_name.clone(),
        });
    }

    for id in &fields.added {
        let record = &right.fields[id];
        sink.accept(DiffEvent::FieldAdded {
            id: record.id.clone(),
            field: record.field_name.clone(),
            tab: record.tab_name.clone(),
            section: record.section_name.clone(),
        });
    }

    for id in &fields.common {
        diff_field_pair(left, &left.fields[id], right, &right.fields[id], sink);
    }

    let tabs = KeyDelta::between(&left.tabs, &right.tabs);
    for id in &tabs.common {
        let (lhs, rhs) = (&left.tabs[id], &right.tabs[id]);
        let owner = Owner::new(OwnerKind::Tab, id.clone(), lhs.name.clone());
        diff_attributes(&owner, left.tree(), lhs.node, right.tree(), rhs.node, sink);
        diff_labels(&owner, &lhs.labels.by_language, &rhs.labels.by_language, sink);
    }

    let sections = KeyDelta::between(&left.sections, &right.sections);
    for id in &sections.common {
        let (lhs, rhs) = (&left.sections[id], &right.sections[id]);
        let owner = Owner::new(OwnerKind::Section, id.clone(), lhs.name.clone());
        diff_attributes(&owner, left.tree(), lhs.node, right.tree(), rhs.node, sink);
        diff_labels(&owner, &lhs.labels.by_language, &rhs.labels.by_language, sink);
    }
}

fn diff_field_pair(
    left: &FormIndex,
    lhs: &FieldRecord,
    right: &FormIndex,
    rhs: &FieldRecord,
    sink: &mut dyn ReportSink,
) {
    if lhs.tab_id != rhs.tab_id || lhs.section_id != rhs.section_id {
        sink.accept(DiffEvent::HierarchyMoved {
            id: lhs.id.clone(),
            field: lhs.field_name.clone(),
            old_tab: lhs.tab_name.clone(),
            old_section: lhs.section_name.clone(),
            new_tab: rhs.tab_name.clone(),
            new_section: rhs.section_name.clone(),
        });
    }

    if let (Some(left_cell), Some(right_cell)) = (lhs.cell, rhs.cell) {
        let owner = Owner::new(OwnerKind::Cell, lhs.id.clone(), lhs.field_name.clone());
        diff_attributes(&owner, left.tree(), left_cell, right.tree(), right_cell, sink);
    }

    let owner = Owner::new(OwnerKind::Control, lhs.id.clone(), lhs.field_name.clone());
    diff_attributes(&owner, left.tree(), lhs.control, right.tree(), rhs.control, sink);

    match (&lhs.custom_label, &rhs.custom_label) {
        (Some(old), Some(new)) if old != new => sink.accept(DiffEvent::CustomLabelModified {
            id: lhs.id.clone(),
            field: lhs.field_name.clone(),
            old: old.clone(),
            new: new.clone(),
        }),
        (Some(label), None) => sink.accept(DiffEvent::CustomLabelRemoved {
            id: lhs.id.clone(),
            field: lhs.field_name.clone(),
            label: label.clone(),
        }),
        (None, Some(label)) => sink.accept(DiffEvent::CustomLabelAdded {
            id: lhs.id.clone(),
            field: lhs.field_name.clone(),
            label: label.clone(),
        }),
        _ => {}
    }

    let owner = Owner::new(OwnerKind::Field, lhs.id.clone(), lhs.field_name.clone());
    diff_labels(&owner, &lhs.labels.by_language, &rhs.labels.by_language, sink);
}
