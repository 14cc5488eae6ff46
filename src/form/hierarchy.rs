//! Ancestor resolution for field-level nodes.
//!
//! A control's owning section and tab are found by walking parent handles
//! upward. Resolution never fails: a missing ancestor or a missing `id`
//! resolves to a sentinel.

use crate::markup::{FormTree, NodeId, NodeKind};

/// Sentinel for a field with no resolvable tab.
pub const UNKNOWN_TAB: &str = "Unknown Tab";

/// Sentinel for a field with no resolvable section.
pub const UNKNOWN_SECTION: &str = "Unknown Section";

/// Resolved position of a field in the tab/section hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub tab_id: String,
    pub section_id: String,
}

/// Resolves the owning section and tab of a field-level node.
///
/// The section walk starts at `field`; the tab walk continues from the
/// section ancestor when one exists, otherwise from `field` itself, so a
/// control sitting directly under a tab still resolves that tab. Works on
/// trees with no section or tab nodes at all.
pub fn resolve(tree: &FormTree, field: NodeId) -> Placement {
    let section = tree
        .ancestors(field)
        .find(|&id| tree.node(id).kind == NodeKind::Section);
    let tab_start = section.unwrap_or(field);
    let tab = tree
        .ancestors(tab_start)
        .find(|&id| tree.node(id).kind == NodeKind::Tab);

    Placement {
        tab_id: id_or(tree, tab, UNKNOWN_TAB),
        section_id: id_or(tree, section, UNKNOWN_SECTION),
    }
}

fn id_or(tree: &FormTree, node: Option<NodeId>, sentinel: &str) -> String {
    node.and_then(|id| tree.node(id).id())
        .unwrap_or(sentinel)
        .to_string()
}
