//! Identifier indexes over a parsed form tree.
//!
//! One pass over the tree produces three maps keyed by stable identifier:
//! tabs, sections, and fields. The maps are ordered so that every diff run
//! over the same inputs emits events in the same order.

use std::collections::BTreeMap;

use super::field::{self, FieldRecord};
use super::hierarchy::{self, UNKNOWN_SECTION, UNKNOWN_TAB};
use super::labels::{display_label, LabelRecord};
use crate::markup::{FormTree, NodeId, NodeKind};

/// An indexed tab.
#[derive(Debug, Clone)]
pub struct TabEntry {
    pub id: String,
    pub name: String,
    pub node: NodeId,
    pub labels: LabelRecord,
}

/// An indexed section, with the id of its owning tab.
#[derive(Debug, Clone)]
pub struct SectionEntry {
    pub id: String,
    pub name: String,
    pub node: NodeId,
    pub tab_id: String,
    pub labels: LabelRecord,
}

/// Stable-identifier indexes over one form document.
///
/// Identifiers are unique per scope: a tab id and a section id may coincide
/// without ambiguity. The index owns its tree; nothing is mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct FormIndex {
    tree: FormTree,
    pub tabs: BTreeMap<String, TabEntry>,
    pub sections: BTreeMap<String, SectionEntry>,
    pub fields: BTreeMap<String, FieldRecord>,
}

impl FormIndex {
    /// Builds the indexes from a parsed tree.
    pub fn build(tree: FormTree) -> FormIndex {
        let mut tabs = BTreeMap::new();
        let mut sections = BTreeMap::new();

        for id in tree.descendants(tree.root()) {
            let node = tree.node(id);
            match node.kind {
                NodeKind::Tab => {
                    if let Some(tab_id) = node.id() {
                        tabs.insert(
                            tab_id.to_string(),
                            TabEntry {
                                id: tab_id.to_string(),
                                name: display_label(&tree, id),
                                node: id,
                                labels: LabelRecord::collect(&tree, id, tab_id),
                            },
                        );
                    }
                }
                NodeKind::Section => {
                    if let Some(section_id) = node.id() {
                        let tab_id = tree
                            .ancestors(id)
                            .find(|&a| tree.node(a).kind == NodeKind::Tab)
                            .and_then(|a| tree.node(a).id())
                            .unwrap_or(UNKNOWN_TAB);
                        sections.insert(
                            section_id.to_string(),
                            SectionEntry {
                                id: section_id.to_string(),
                                name: display_label(&tree, id),
                                node: id,
                                tab_id: tab_id.to_string(),
                                labels: LabelRecord::collect(&tree, id, section_id),
                            },
                        );
                    }
                }
                _ => {}
            }
        }

        let mut fields = BTreeMap::new();
        for id in tree.descendants(tree.root()) {
            let node = tree.node(id);
            if node.kind != NodeKind::Control || node.attribute("datafieldname").is_none() {
                continue;
            }
            if let Some(record) = field_record(&tree, id, &tabs, &sections) {
                fields.insert(record.id.clone(), record);
            }
        }

        FormIndex {
            tree,
            tabs,
            sections,
            fields,
        }
    }

    pub fn tree(&self) -> &FormTree {
        &self.tree
    }
}

fn field_record(
    tree: &FormTree,
    control: NodeId,
    tabs: &BTreeMap<String, TabEntry>,
    sections: &BTreeMap<String, SectionEntry>,
) -> Option<FieldRecord> {
    let cell = tree
        .ancestors(control)
        .find(|&a| tree.node(a).kind == NodeKind::Cell);

    // The cell id is the stable anchor across versions; control ids can be
    // regenerated. A field with neither identifier cannot be keyed.
    let id = cell
        .and_then(|c| tree.node(c).id())
        .or_else(|| tree.node(control).id())?
        .to_string();

    let field_name = tree
        .node(control)
        .attribute("datafieldname")
        .unwrap_or(&id)
        .to_string();

    let placement = hierarchy::resolve(tree, control);
    let tab_name = tabs
        .get(&placement.tab_id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| UNKNOWN_TAB.to_string());
    let section_name = sections
        .get(&placement.section_id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| UNKNOWN_SECTION.to_string());

    let custom_label = field::custom_label(tree, control, cell);

    // Field labels live on the cell when there is one; controls without an
    // enclosing cell keep their own.
    let mut labels = match cell {
        Some(c) => LabelRecord::collect(tree, c, id.clone()),
        None => LabelRecord::default(),
    };
    if labels.is_empty() {
        labels = LabelRecord::collect(tree, control, id.clone());
    }

    Some(FieldRecord {
        display_name: field_name.clone(),
        field_name,
        has_custom_label: custom_label.is_some(),
        custom_label,
        tab_id: placement.tab_id,
        tab_name,
        section_id: placement.section_id,
        section_name,
        visible: field::is_visible(tree, control),
        required: field::is_required(tree, control),
        control_type: field::control_type(tree, control),
        control,
        cell,
        labels,
        id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FORM: &str = r#"
        <form>
          <tab id="T1">
            <labels><label description="General" languagecode="1033"/></labels>
            <section id="S1">
              <labels><label description="Identity" languagecode="1033"/></labels>
              <row>
                <cell id="C1">
                  <labels><label description="Name" languagecode="1033"/></labels>
                  <control id="F1" datafieldname="name" classid="{DEADBEEF}"/>
                </cell>
              </row>
            </section>
          </tab>
        </form>"#;

    fn index() -> FormIndex {
        FormIndex::build(FormTree::parse(FORM).unwrap())
    }

    #[test]
    fn test_build_indexes_all_scopes() {
        let index = index();
        assert_eq!(index.tabs.len(), 1);
        assert_eq!(index.sections.len(), 1);
        assert_eq!(index.fields.len(), 1);
    }

    #[test]
    fn test_tab_and_section_names() {
        let index = index();
        assert_eq!(index.tabs["T1"].name, "General");
        assert_eq!(index.sections["S1"].name, "Identity");
        assert_eq!(index.sections["S1"].tab_id, "T1");
    }

    #[test]
    fn test_field_keyed_by_cell_id() {
        let index = index();
        let record = &index.fields["C1"];
        assert_eq!(record.field_name, "name");
        assert_eq!(record.tab_id, "T1");
        assert_eq!(record.tab_name, "General");
        assert_eq!(record.section_id, "S1");
        assert_eq!(record.section_name, "Identity");
        assert!(record.visible);
        assert!(!record.required);
    }

    #[test]
    fn test_field_labels_from_cell() {
        let index = index();
        let record = &index.fields["C1"];
        assert_eq!(
            record.labels.by_language.get("1033").map(String::as_str),
            Some("Name")
        );
    }

    #[test]
    fn test_field_without_cell_id_falls_back_to_control_id() {
        let tree = FormTree::parse(
            r#"<row><cell><control id="F9" datafieldname="email"/></cell></row>"#,
        )
        .unwrap();
        let index = FormIndex::build(tree);
        assert!(index.fields.contains_key("F9"));
    }

    #[test]
    fn test_field_without_any_id_skipped() {
        let tree =
            FormTree::parse(r#"<row><cell><control datafieldname="email"/></cell></row>"#).unwrap();
        let index = FormIndex::build(tree);
        assert!(index.fields.is_empty());
    }

    #[test]
    fn test_control_without_datafieldname_is_not_a_field() {
        let tree = FormTree::parse(r#"<cell id="C1"><control id="F1"/></cell>"#).unwrap();
        let index = FormIndex::build(tree);
        assert!(index.fields.is_empty());
    }

    #[test]
    fn test_custom_label_recorded() {
        let tree = FormTree::parse(
            r#"<cell id="C1"><control id="F1" datafieldname="name" label="Nom"/></cell>"#,
        )
        .unwrap();
        let index = FormIndex::build(tree);
        let record = &index.fields["C1"];
        assert!(record.has_custom_label);
        assert_eq!(record.custom_label.as_deref(), Some("Nom"));
        assert_eq!(record.display_name, record.field_name);
    }

    #[test]
    fn test_sentinel_placement_indexed() {
        let tree = FormTree::parse(r#"<cell id="C1"><control id="F1" datafieldname="name"/></cell>"#)
            .unwrap();
        let index = FormIndex::build(tree);
        let record = &index.fields["C1"];
        assert_eq!(record.tab_name, UNKNOWN_TAB);
        assert_eq!(record.section_name, UNKNOWN_SECTION);
    }
}
