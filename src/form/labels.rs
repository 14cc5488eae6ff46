//! Label extraction.
//!
//! Labels appear as `labels/label` elements at several scopes (tab, section,
//! cell, control), each carrying a `description` and optionally a
//! `languagecode`. Extraction never fails: a missing description resolves to
//! the `"Unknown Label"` sentinel and a missing language code lands in the
//! `"default"` bucket.

use std::collections::BTreeMap;

use crate::markup::{FormTree, NodeId, NodeKind};

/// Sentinel used when a node carries no description at all.
pub const UNKNOWN_LABEL: &str = "Unknown Label";

/// Bucket for label nodes without a `languagecode` attribute.
pub const DEFAULT_LANGUAGE: &str = "default";

/// Per-language labels of one owning node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelRecord {
    pub owner_id: String,
    pub owner_kind: NodeKind,
    pub by_language: BTreeMap<String, String>,
}

impl LabelRecord {
    /// Collects the labels of a `labels` container directly beneath `owner`.
    ///
    /// Nested controls keep their own labels: only containers that are
    /// immediate children of `owner` are read. When two label nodes share a
    /// language code the later one in document order wins.
    pub fn collect(tree: &FormTree, owner: NodeId, owner_id: impl Into<String>) -> LabelRecord {
        let mut by_language = BTreeMap::new();
        for &child in tree.children(owner) {
            if tree.node(child).tag != "labels" {
                continue;
            }
            for &label in tree.children(child) {
                let node = tree.node(label);
                if node.kind != NodeKind::Label {
                    continue;
                }
                let language = node
                    .attribute("languagecode")
                    .unwrap_or(DEFAULT_LANGUAGE)
                    .to_string();
                let value = match node.attribute("description").or_else(|| node.attribute("text")) {
                    Some(v) => v.to_string(),
                    None => continue,
                };
                by_language.insert(language, value);
            }
        }
        LabelRecord {
            owner_id: owner_id.into(),
            owner_kind: tree.node(owner).kind,
            by_language,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_language.is_empty()
    }
}

/// Display name of a node: the description of the first `labels/label`
/// descendant in document order, or [`UNKNOWN_LABEL`].
pub fn display_label(tree: &FormTree, owner: NodeId) -> String {
    for id in tree.descendants(owner) {
        let node = tree.node(id);
        if node.kind != NodeKind::Label {
            continue;
        }
        let in_container = tree
            .parent(id)
            .map(|p| tree.node(p).tag == "labels")
            .unwrap_or(false);
        if !in_container {
            continue;
        }
        if let Some(description) = node.attribute("description") {
            return description.to_string();
        }
    }
    UNKNOWN_LABEL.to_string()
}
