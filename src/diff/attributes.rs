//! Attribute differ.
//!
//! For a pair of same-identifier nodes, compares the symmetric union of
//! their attribute names. Works on any owner scope: controls, cells, tabs,
//! and sections all carry independently meaningful attributes.

use std::collections::BTreeSet;

use super::event::{DiffEvent, Owner};
use crate::markup::{FormTree, NodeId};
use crate::report::ReportSink;

/// Emits one event per attribute whose value differs between the two nodes.
/// Attribute names are visited in sorted order.
pub fn diff_attributes(
    owner: &Owner,
    left_tree: &FormTree,
    left: NodeId,
    right_tree: &FormTree,
    right: NodeId,
    sink: &mut dyn ReportSink,
) {
    let left_node = left_tree.node(left);
    let right_node = right_tree.node(right);

    let names: BTreeSet<&str> = left_node
        .attributes()
        .map(|(n, _)| n)
        .chain(right_node.attributes().map(|(n, _)| n))
        .collect();

    for name in names {
        match (left_node.attribute(name), right_node.attribute(name)) {
            (None, Some(value)) => sink.accept(DiffEvent::AttributeAdded {
                owner: owner.clone(),
                attribute: name.to_string(),
                value: value.to_string(),
            }),
            (Some(value), None) => sink.accept(DiffEvent::AttributeRemoved {
                owner: owner.clone(),
                attribute: name.to_string(),
                value: value.to_string(),
            }),
            (Some(old), Some(new)) if old != new => sink.accept(DiffEvent::AttributeModified {
                owner: owner.clone(),
                attribute: name.to_string(),
                old: old.to_string(),
                new: new.to_string(),
            }),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::OwnerKind;
    use crate::report::VecSink;
    use pretty_assertions::assert_eq;

    fn control(markup: &str) -> (FormTree, NodeId) {
        let tree = FormTree::parse(markup).unwrap();
        let node = tree.children(tree.root())[0];
        (tree, node)
    }

    fn events(left: &str, right: &str) -> Vec<DiffEvent> {
        let (lt, ln) = control(left);
        let (rt, rn) = control(right);
        let owner = Owner::new(OwnerKind::Control, "C1", "name");
        let mut sink = VecSink::new();
        diff_attributes(&owner, &lt, ln, &rt, rn, &mut sink);
        sink.into_events()
    }

    #[test]
    fn test_equal_nodes_no_events() {
        let markup = r#"<control id="F1" datafieldname="name"/>"#;
        assert_eq!(events(markup, markup), vec![]);
    }

    #[test]
    fn test_modified_attribute() {
        let got = events(
            r#"<control id="F1" disabled="false"/>"#,
            r#"<control id="F1" disabled="true"/>"#,
        );
        assert_eq!(
            got,
            vec![DiffEvent::AttributeModified {
                owner: Owner::new(OwnerKind::Control, "C1", "name"),
                attribute: "disabled".into(),
                old: "false".into(),
                new: "true".into(),
            }]
        );
    }

    #[test]
    fn test_added_and_removed_attributes() {
        let got = events(
            r#"<control id="F1" rows="4"/>"#,
            r#"<control id="F1" disabled="true"/>"#,
        );
        assert_eq!(
            got,
            vec![
                DiffEvent::AttributeAdded {
                    owner: Owner::new(OwnerKind::Control, "C1", "name"),
                    attribute: "disabled".into(),
                    value: "true".into(),
                },
                DiffEvent::AttributeRemoved {
                    owner: Owner::new(OwnerKind::Control, "C1", "name"),
                    attribute: "rows".into(),
                    value: "4".into(),
                },
            ]
        );
    }

    #[test]
    fn test_names_visited_in_sorted_order() {
        let got = events(
            r#"<control id="F1" z="1" a="1"/>"#,
            r#"<control id="F1" z="2" a="2"/>"#,
        );
        let names: Vec<String> = got
            .iter()
            .map(|e| match e {
                DiffEvent::AttributeModified { attribute, .. } => attribute.clone(),
                other => panic!("unexpected event {:?}", other),
            })
            .collect();
        assert_eq!(names, vec!["a", "z"]);
    }
}
