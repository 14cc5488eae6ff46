//! Arena-backed form tree.
//!
//! Nodes are stored in a flat arena and referenced by [`NodeId`] handles.
//! Parent links are plain handles into the arena, so ancestor walks are
//! O(depth) without reference cycles. A tree is immutable once the parser
//! has finished building it.

use std::fmt;

/// Handle into a [`FormTree`] arena.
pub type NodeId = usize;

/// Structural classification of a markup element.
///
/// Only the elements the differ reasons about get their own kind; everything
/// else (containers like `labels`, flag elements like `visible`) is `Other`
/// and identified by its tag name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    Tab,
    Section,
    Row,
    Cell,
    Control,
    Label,
    #[default]
    Other,
}

impl NodeKind {
    /// Classifies a tag name. Matching is case-sensitive: `<Tab>` is `Other`.
    pub fn from_tag(tag: &str) -> NodeKind {
        match tag {
            "tab" => NodeKind::Tab,
            "section" => NodeKind::Section,
            "row" => NodeKind::Row,
            "cell" => NodeKind::Cell,
            "control" => NodeKind::Control,
            "label" => NodeKind::Label,
            _ => NodeKind::Other,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Tab => "tab",
            NodeKind::Section => "section",
            NodeKind::Row => "row",
            NodeKind::Cell => "cell",
            NodeKind::Control => "control",
            NodeKind::Label => "label",
            NodeKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// One element of a parsed form document.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub tag: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Attributes in document order.
    attributes: Vec<(String, String)>,
    /// Concatenated text and CDATA content.
    text: String,
}

impl Node {
    pub(crate) fn new(tag: String, parent: Option<NodeId>, attributes: Vec<(String, String)>) -> Node {
        Node {
            kind: NodeKind::from_tag(&tag),
            tag,
            parent,
            children: Vec::new(),
            attributes,
            text: String::new(),
        }
    }

    /// Looks up an attribute by exact, case-sensitive name.
    ///
    /// Returns the first occurrence in document order.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The `id` attribute, if present.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Text content of this element (text and CDATA, direct children only).
    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn push_text(&mut self, chunk: &str) {
        self.text.push_str(chunk);
    }
}

/// An immutable, ordered tree of form markup nodes.
#[derive(Debug, Clone)]
pub struct FormTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl FormTree {
    /// Creates a tree with a synthetic document root. Used by the parser.
    pub(crate) fn with_root() -> FormTree {
        FormTree {
            nodes: vec![Node::new(String::new(), None, Vec::new())],
            root: 0,
        }
    }

    pub(crate) fn push(&mut self, mut node: Node) -> NodeId {
        let id = self.nodes.len();
        let parent = node.parent.unwrap_or(self.root);
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent].children.push(id);
        id
    }

    /// The synthetic document root. Its children are the top-level elements.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        if id == self.root {
            None
        } else {
            self.nodes[id].parent
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // The synthetic root always exists; empty means no real elements.
        self.nodes.len() <= 1
    }

    /// Walks ancestors of `id`, nearest first, stopping before the
    /// synthetic root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Preorder (document order) traversal of the subtree below `id`,
    /// excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { tree: self, stack }
    }
}

/// Iterator over ancestor handles, nearest first.
pub struct Ancestors<'a> {
    tree: &'a FormTree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        if current == self.tree.root() {
            return None;
        }
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Preorder iterator over descendant handles.
pub struct Descendants<'a> {
    tree: &'a FormTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        for &child in self.tree.children(current).iter().rev() {
            self.stack.push(child);
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FormTree {
        let mut tree = FormTree::with_root();
        let tab = tree.push(Node::new(
            "tab".into(),
            None,
            vec![("id".into(), "T1".into())],
        ));
        let section = tree.push(Node::new(
            "section".into(),
            Some(tab),
            vec![("id".into(), "S1".into())],
        ));
        let row = tree.push(Node::new("row".into(), Some(section), vec![]));
        tree.push(Node::new(
            "cell".into(),
            Some(row),
            vec![("id".into(), "C1".into())],
        ));
        tree
    }

    #[test]
    fn test_kind_from_tag() {
        assert_eq!(NodeKind::from_tag("tab"), NodeKind::Tab);
        assert_eq!(NodeKind::from_tag("control"), NodeKind::Control);
        assert_eq!(NodeKind::from_tag("labels"), NodeKind::Other);
        // Case-sensitive.
        assert_eq!(NodeKind::from_tag("Tab"), NodeKind::Other);
    }

    #[test]
    fn test_attribute_lookup_is_exact() {
        let node = Node::new(
            "control".into(),
            None,
            vec![
                ("id".into(), "F1".into()),
                ("datafieldname".into(), "name".into()),
            ],
        );
        assert_eq!(node.attribute("id"), Some("F1"));
        assert_eq!(node.attribute("Id"), None);
        assert_eq!(node.attribute("missing"), None);
    }

    #[test]
    fn test_attribute_order_preserved() {
        let node = Node::new(
            "control".into(),
            None,
            vec![
                ("b".into(), "2".into()),
                ("a".into(), "1".into()),
            ],
        );
        let names: Vec<&str> = node.attributes().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let tree = sample();
        let cell = 4;
        let tags: Vec<&str> = tree
            .ancestors(cell)
            .map(|id| tree.node(id).tag.as_str())
            .collect();
        assert_eq!(tags, vec!["row", "section", "tab"]);
    }

    #[test]
    fn test_descendants_document_order() {
        let tree = sample();
        let tags: Vec<&str> = tree
            .descendants(tree.root())
            .map(|id| tree.node(id).tag.as_str())
            .collect();
        assert_eq!(tags, vec!["tab", "section", "row", "cell"]);
    }
}
