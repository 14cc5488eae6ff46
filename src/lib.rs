//! # Form Structure Diff
//!
//! Structural, attribute, and label diffing for hierarchical UI-form
//! definitions, used for customization-drift auditing when promoting
//! configuration between environments.
//!
//! The engine is a pure pipeline: parse each document into an immutable
//! tree, build stable-identifier indexes over it, then compare two indexes
//! into an ordered sequence of diff events. Retrieval of the markup and
//! rendering of the events are the caller's concern.
//!
//! ## Modules
//!
//! - [`markup`] - Parsing form markup into navigable, immutable trees
//! - [`form`] - Hierarchy resolution, label extraction, and index building
//! - [`diff`] - Identifier set algebra and the attribute/label differs
//! - [`report`] - Pluggable sinks for the diff event stream

pub mod diff;
pub mod form;
pub mod markup;
pub mod report;

pub use diff::{diff, diff_with, DiffEvent, KeyDelta, Owner, OwnerKind};
pub use form::{
    FieldRecord, FormIndex, LabelRecord, Placement, SectionEntry, TabEntry, DEFAULT_LANGUAGE,
    UNKNOWN_LABEL, UNKNOWN_SECTION, UNKNOWN_TAB,
};
pub use markup::{FormTree, Node, NodeId, NodeKind, ParseError};
pub use report::{ConsoleReport, CsvReport, JsonLinesReport, ReportSink, VecSink};

/// Parses two markup documents and compares them in one call.
///
/// Convenience for callers that hold both documents as strings; batch
/// drivers that want to keep an index around should call the three steps
/// themselves.
pub fn compare_forms(left: &str, right: &str) -> Result<Vec<DiffEvent>, ParseError> {
    let left = FormIndex::build(FormTree::parse(left)?);
    let right = FormIndex::build(FormTree::parse(right)?);
    Ok(diff(&left, &right))
}
