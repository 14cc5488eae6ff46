//! Label differ.
//!
//! Same shape as the attribute differ but keyed by language code. One
//! routine serves every owner scope: fields, tabs, and sections.

use std::collections::{BTreeMap, BTreeSet};

use super::event::{DiffEvent, Owner};
use crate::report::ReportSink;

/// Emits one event per language whose label differs between the two sides.
/// Language codes are visited in sorted order.
pub fn diff_labels(
    owner: &Owner,
    left: &BTreeMap<String, String>,
    right: &BTreeMap<String, String>,
    sink: &mut dyn ReportSink,
) {
    let languages: BTreeSet<&str> = left
        .keys()
        .map(String::as_str)
        .chain(right.keys().map(String::as_str))
        .collect();

    for language in languages {
        match (left.get(language), right.get(language)) {
            (None, Some(text)) => sink.accept(DiffEvent::LabelAdded {
                owner: owner.clone(),
                language: language.to_string(),
                text: text.clone(),
            }),
            (Some(text), None) => sink.accept(DiffEvent::LabelRemoved {
                owner: owner.clone(),
                language: language.to_string(),
                text: text.clone(),
            }),
            (Some(old), Some(new)) if old != new => sink.accept(DiffEvent::LabelModified {
                owner: owner.clone(),
                language: language.to_string(),
                old: old.clone(),
                new: new.clone(),
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

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn events(left: &[(&str, &str)], right: &[(&str, &str)]) -> Vec<DiffEvent> {
        let owner = Owner::new(OwnerKind::Field, "C1", "name");
        let mut sink = VecSink::new();
        diff_labels(&owner, &labels(left), &labels(right), &mut sink);
        sink.into_events()
    }

    #[test]
    fn test_equal_labels_no_events() {
        assert_eq!(events(&[("1033", "Name")], &[("1033", "Name")]), vec![]);
    }

    #[test]
    fn test_modified_label() {
        let got = events(&[("1033", "Name")], &[("1033", "Full Name")]);
        assert_eq!(
            got,
            vec![DiffEvent::LabelModified {
                owner: Owner::new(OwnerKind::Field, "C1", "name"),
                language: "1033".into(),
                old: "Name".into(),
                new: "Full Name".into(),
            }]
        );
    }

    #[test]
    fn test_added_and_removed_languages() {
        let got = events(&[("1033", "Name")], &[("1036", "Nom")]);
        assert_eq!(
            got,
            vec![
                DiffEvent::LabelRemoved {
                    owner: Owner::new(OwnerKind::Field, "C1", "name"),
                    language: "1033".into(),
                    text: "Name".into(),
                },
                DiffEvent::LabelAdded {
                    owner: Owner::new(OwnerKind::Field, "C1", "name"),
                    language: "1036".into(),
                    text: "Nom".into(),
                },
            ]
        );
    }

    #[test]
    fn test_default_bucket_compared() {
        let got = events(&[("default", "Name")], &[("default", "Full Name")]);
        assert!(matches!(
            got.as_slice(),
            [DiffEvent::LabelModified { language, .. }] if language == "default"
        ));
    }
}
