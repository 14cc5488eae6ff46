//! Diff event types.

use serde::Serialize;
use std::fmt;

/// Scope of the node a change was observed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerKind {
    Field,
    Cell,
    Control,
    Tab,
    Section,
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OwnerKind::Field => "field",
            OwnerKind::Cell => "cell",
            OwnerKind::Control => "control",
            OwnerKind::Tab => "tab",
            OwnerKind::Section => "section",
        };
        f.write_str(name)
    }
}

/// Identifies the owner of a change, with a human-readable handle: the data
/// field name for field-level owners, the display label for tabs and
/// sections. For owners present on both sides the handle comes from the
/// left document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Owner {
    pub kind: OwnerKind,
    pub id: String,
    pub name: String,
}

impl Owner {
    pub fn new(kind: OwnerKind, id: impl Into<String>, name: impl Into<String>) -> Owner {
        Owner {
            kind,
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' (id: {})", self.kind, self.name, self.id)
    }
}

/// One atomic reported difference between two form versions.
///
/// Events carry enough context to be rendered on their own; sinks never
/// need to look back into the trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum DiffEvent {
    FieldAdded {
        id: String,
        field: String,
        tab: String,
        section: String,
    },
    FieldRemoved {
        id: String,
        field: String,
        tab: String,
        section: String,
    },
    AttributeAdded {
        owner: Owner,
        attribute: String,
        value: String,
    },
    AttributeRemoved {
        owner: Owner,
        attribute: String,
        value: String,
    },
    AttributeModified {
        owner: Owner,
        attribute: String,
        old: String,
        new: String,
    },
    LabelAdded {
        owner: Owner,
        language: String,
        text: String,
    },
    LabelRemoved {
        owner: Owner,
        language: String,
        text: String,
    },
    LabelModified {
        owner: Owner,
        language: String,
        old: String,
        new: String,
    },
    CustomLabelAdded {
        id: String,
        field: String,
        label: String,
    },
    CustomLabelRemoved {
        id: String,
        field: String,
        label: String,
    },
    CustomLabelModified {
        id: String,
        field: String,
        old: String,
        new: String,
    },
    HierarchyMoved {
        id: String,
        field: String,
        old_tab: String,
        old_section: String,
        new_tab: String,
        new_section: String,
    },
}

impl fmt::Display for DiffEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffEvent::FieldAdded {
                field, tab, section, ..
            } => write!(f, "Field added: {} in Tab: {}, Section: {}", field, tab, section),
            DiffEvent::FieldRemoved {
                field, tab, section, ..
            } => write!(
                f,
                "Field removed: {} from Tab: {}, Section: {}",
                field, tab, section
            ),
            DiffEvent::AttributeAdded {
                owner,
                attribute,
                value,
            } => write!(f, "Attribute '{}' added on {}: '{}'", attribute, owner, value),
            DiffEvent::AttributeRemoved {
                owner,
                attribute,
                value,
            } => write!(
                f,
                "Attribute '{}' removed on {} (value was: '{}')",
                attribute, owner, value
            ),
            DiffEvent::AttributeModified {
                owner,
                attribute,
                old,
                new,
            } => write!(
                f,
                "Attribute '{}' updated on {}: '{}' -> '{}'",
                attribute, owner, old, new
            ),
            DiffEvent::LabelAdded {
                owner,
                language,
                text,
            } => write!(
                f,
                "Label added for language '{}' on {}: '{}'",
                language, owner, text
            ),
            DiffEvent::LabelRemoved {
                owner,
                language,
                text,
            } => write!(
                f,
                "Label removed for language '{}' on {} (value was: '{}')",
                language, owner, text
            ),
            DiffEvent::LabelModified {
                owner,
                language,
                old,
                new,
            } => write!(
                f,
                "Label updated for language '{}' on {}: '{}' -> '{}'",
                language, owner, old, new
            ),
            DiffEvent::CustomLabelAdded { field, label, .. } => {
                write!(f, "Custom label added for field '{}': '{}'", field, label)
            }
            DiffEvent::CustomLabelRemoved { field, label, .. } => {
                write!(f, "Custom label removed for field '{}' (was: '{}')", field, label)
            }
            DiffEvent::CustomLabelModified { field, old, new, .. } => {
                write!(f, "Field label changed for '{}': '{}' -> '{}'", field, old, new)
            }
            DiffEvent::HierarchyMoved {
                field,
                old_tab,
                old_section,
                new_tab,
                new_section,
                ..
            } => write!(
                f,
                "Field '{}' moved: Tab '{}', Section '{}' -> Tab '{}', Section '{}'",
                field, old_tab, old_section, new_tab, new_section
            ),
        }
    }
}
