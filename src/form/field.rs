//! Field records and custom-label detection.
//!
//! A field is a control bound to a data field. Its record combines the
//! control's own attributes with its resolved hierarchy, its labels, and
//! the customization flags spread across child elements.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::labels::LabelRecord;
use crate::markup::{FormTree, NodeId};

/// Everything the differ needs to know about one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    /// Stable identifier: the enclosing cell's id, or the control's id when
    /// the cell has none.
    pub id: String,
    /// Logical data field name (`datafieldname`).
    pub field_name: String,
    pub display_name: String,
    pub custom_label: Option<String>,
    pub has_custom_label: bool,
    pub tab_id: String,
    pub tab_name: String,
    pub section_id: String,
    pub section_name: String,
    pub visible: bool,
    pub required: bool,
    pub control_type: String,
    /// Handle of the control node in the owning tree.
    pub control: NodeId,
    /// Handle of the enclosing cell, when present.
    pub cell: Option<NodeId>,
    /// Per-language labels scoped to this field.
    pub labels: LabelRecord,
}

/// Readable names for well-known control class ids.
static CLASS_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("{4273EDBD-AC1D-40D3-9FB2-095C621B552D}", "Single Line of Text"),
        ("{E0DECE4B-6FC8-4A8F-A065-082708572369}", "Multiple Lines of Text"),
        ("{270BD3DB-D9AF-4782-9025-509E298DEC0A}", "Lookup"),
        ("{3EF39988-22BB-4F0B-BBBE-64B5A3748AEE}", "Option Set"),
        ("{67FAC785-CD58-4F9F-ABB3-4B7DDC6ED5ED}", "Check Box"),
        ("{5B773807-9FB2-42DB-97C3-7A91EFF8ADFF}", "Date and Time"),
        ("{C6D124CA-7EDA-4A60-AEA9-7FB8D318B68F}", "Whole Number"),
        ("{533B9E00-756B-4312-95A0-DC888637AC78}", "Currency"),
    ])
});

/// Resolves the control type from the `classid` attribute.
///
/// Well-known class ids map to readable names; anything else is reported as
/// the raw id. A control without a class id is `"Unknown"`.
pub fn control_type(tree: &FormTree, control: NodeId) -> String {
    match tree.node(control).attribute("classid") {
        Some(classid) => {
            let normalized = classid.to_ascii_uppercase();
            CLASS_NAMES
                .get(normalized.as_str())
                .map(|name| name.to_string())
                .unwrap_or_else(|| classid.to_string())
        }
        None => "Unknown".to_string(),
    }
}

/// Reads a boolean flag element (`visible`, `required`) below the control.
/// The first matching descendant in document order wins.
fn flag_text(tree: &FormTree, control: NodeId, tag: &str) -> Option<String> {
    tree.descendants(control)
        .find(|&id| tree.node(id).tag == tag)
        .map(|id| tree.node(id).text().trim().to_ascii_lowercase())
}

/// Field visibility: absent means visible.
pub fn is_visible(tree: &FormTree, control: NodeId) -> bool {
    match flag_text(tree, control, "visible") {
        Some(text) => text != "false",
        None => true,
    }
}

/// Field requirement flag: absent means optional.
pub fn is_required(tree: &FormTree, control: NodeId) -> bool {
    match flag_text(tree, control, "required") {
        Some(text) => text == "true",
        None => false,
    }
}

/// Finds a field's custom label, trying each detection strategy in priority
/// order. The first strategy that yields a non-empty value wins; later
/// strategies never override it.
///
/// 1. `labels/label[@description]` directly beneath the control.
/// 2. A `cellLabels/label[@description]` node within the field scope.
/// 3. A literal `label` attribute on the control.
/// 4. A `customlabel` element's text within the field scope.
/// 5. A `cellLabelAttributes` payload parsed as a secondary document.
pub fn custom_label(tree: &FormTree, control: NodeId, cell: Option<NodeId>) -> Option<String> {
    let scope = cell.unwrap_or(control);

    direct_label(tree, control)
        .or_else(|| container_label(tree, scope, "cellLabels"))
        .or_else(|| attribute_label(tree, control))
        .or_else(|| element_text(tree, scope, "customlabel"))
        .or_else(|| embedded_label(tree, scope))
}

fn direct_label(tree: &FormTree, control: NodeId) -> Option<String> {
    for &child in tree.children(control) {
        if tree.node(child).tag != "labels" {
            continue;
        }
        for &label in tree.children(child) {
            if let Some(description) = tree.node(label).attribute("description") {
                if !description.is_empty() {
                    return Some(description.to_string());
                }
            }
        }
    }
    None
}

fn container_label(tree: &FormTree, scope: NodeId, container: &str) -> Option<String> {
    for id in tree.descendants(scope) {
        if tree.node(id).tag != container {
            continue;
        }
        for &label in tree.children(id) {
            if let Some(description) = tree.node(label).attribute("description") {
                if !description.is_empty() {
                    return Some(description.to_string());
                }
            }
        }
    }
    None
}

fn attribute_label(tree: &FormTree, control: NodeId) -> Option<String> {
    tree.node(control)
        .attribute("label")
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn element_text(tree: &FormTree, scope: NodeId, tag: &str) -> Option<String> {
    tree.descendants(scope)
        .filter(|&id| tree.node(id).tag == tag)
        .map(|id| tree.node(id).text().trim().to_string())
        .find(|text| !text.is_empty())
}

/// Label parameters embedded as nested markup inside `cellLabelAttributes`.
/// The payload is parsed as its own document; payloads that fail to parse
/// yield nothing rather than failing the field.
fn embedded_label(tree: &FormTree, scope: NodeId) -> Option<String> {
    for id in tree.descendants(scope) {
        let node = tree.node(id);
        if node.tag != "cellLabelAttributes" || !node.text().contains("customlabel") {
            continue;
        }
        let Ok(inner) = FormTree::parse(node.text()) else {
            continue;
        };
        if let Some(label) = element_text(&inner, inner.root(), "customlabel") {
            return Some(label);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{FormTree, NodeKind};

    fn first_control(tree: &FormTree) -> NodeId {
        tree.descendants(tree.root())
            .find(|&id| tree.node(id).kind == NodeKind::Control)
            .unwrap()
    }

    fn first_cell(tree: &FormTree) -> Option<NodeId> {
        tree.descendants(tree.root())
            .find(|&id| tree.node(id).kind == NodeKind::Cell)
    }

    #[test]
    fn test_control_type_known_classid() {
        let tree = FormTree::parse(
            r#"<control id="F1" classid="{4273edbd-ac1d-40d3-9fb2-095c621b552d}"/>"#,
        )
        .unwrap();
        assert_eq!(control_type(&tree, first_control(&tree)), "Single Line of Text");
    }

    #[test]
    fn test_control_type_unknown_classid_kept_raw() {
        let tree = FormTree::parse(r#"<control id="F1" classid="{DEADBEEF}"/>"#).unwrap();
        assert_eq!(control_type(&tree, first_control(&tree)), "{DEADBEEF}");
    }

    #[test]
    fn test_control_type_missing_classid() {
        let tree = FormTree::parse(r#"<control id="F1"/>"#).unwrap();
        assert_eq!(control_type(&tree, first_control(&tree)), "Unknown");
    }

    #[test]
    fn test_flags_defaults() {
        let tree = FormTree::parse(r#"<control id="F1"/>"#).unwrap();
        let control = first_control(&tree);
        assert!(is_visible(&tree, control));
        assert!(!is_required(&tree, control));
    }

    #[test]
    fn test_flags_case_insensitive() {
        let tree = FormTree::parse(
            r#"<control id="F1"><visible>FALSE</visible><required>True</required></control>"#,
        )
        .unwrap();
        let control = first_control(&tree);
        assert!(!is_visible(&tree, control));
        assert!(is_required(&tree, control));
    }

    #[test]
    fn test_custom_label_direct_labels_win() {
        let tree = FormTree::parse(
            r#"<cell id="C1">
                 <control id="F1" label="Attribute Label">
                   <labels><label description="Direct Label" languagecode="1033"/></labels>
                 </control>
               </cell>"#,
        )
        .unwrap();
        let label = custom_label(&tree, first_control(&tree), first_cell(&tree));
        assert_eq!(label.as_deref(), Some("Direct Label"));
    }

    #[test]
    fn test_custom_label_attribute_fallback() {
        let tree = FormTree::parse(r#"<control id="F1" label="From Attribute"/>"#).unwrap();
        let label = custom_label(&tree, first_control(&tree), None);
        assert_eq!(label.as_deref(), Some("From Attribute"));
    }

    #[test]
    fn test_custom_label_element_text() {
        let tree = FormTree::parse(
            r#"<cell id="C1"><control id="F1"/><customlabel>Typed In</customlabel></cell>"#,
        )
        .unwrap();
        let label = custom_label(&tree, first_control(&tree), first_cell(&tree));
        assert_eq!(label.as_deref(), Some("Typed In"));
    }

    #[test]
    fn test_custom_label_embedded_payload() {
        let tree = FormTree::parse(
            r#"<cell id="C1">
                 <control id="F1"/>
                 <cellLabelAttributes>&lt;customlabel&gt;Embedded&lt;/customlabel&gt;</cellLabelAttributes>
               </cell>"#,
        )
        .unwrap();
        let label = custom_label(&tree, first_control(&tree), first_cell(&tree));
        assert_eq!(label.as_deref(), Some("Embedded"));
    }

    #[test]
    fn test_custom_label_bad_payload_ignored() {
        let tree = FormTree::parse(
            r#"<cell id="C1">
                 <control id="F1"/>
                 <cellLabelAttributes>&lt;customlabel&gt;broken</cellLabelAttributes>
               </cell>"#,
        )
        .unwrap();
        assert_eq!(custom_label(&tree, first_control(&tree), first_cell(&tree)), None);
    }

    #[test]
    fn test_custom_label_none() {
        let tree = FormTree::parse(r#"<control id="F1" datafieldname="name"/>"#).unwrap();
        assert_eq!(custom_label(&tree, first_control(&tree), None), None);
    }
}
