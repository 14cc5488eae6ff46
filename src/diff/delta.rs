//! Identifier set algebra.
//!
//! Partitions the key spaces of two indexes into added, removed, and common
//! identifiers with a single merge pass over the sorted keys. Sorted output
//! is what makes repeated runs over unchanged input byte-identical.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Partition of two identifier sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyDelta {
    /// Keys present only on the right-hand side.
    pub added: Vec<String>,
    /// Keys present only on the left-hand side.
    pub removed: Vec<String>,
    /// Keys present on both sides.
    pub common: Vec<String>,
}

impl KeyDelta {
    /// Computes the partition of the key sets of two maps. O(|L| + |R|).
    pub fn between<L, R>(left: &BTreeMap<String, L>, right: &BTreeMap<String, R>) -> KeyDelta {
        let mut delta = KeyDelta::default();
        let mut lhs = left.keys().peekable();
        let mut rhs = right.keys().peekable();

        loop {
            match (lhs.peek(), rhs.peek()) {
                (Some(&l), Some(&r)) => match l.cmp(r) {
                    Ordering::Less => {
                        delta.removed.push(l.clone());
                        lhs.next();
                    }
                    Ordering::Greater => {
                        delta.added.push(r.clone());
                        rhs.next();
                    }
                    Ordering::Equal => {
                        delta.common.push(l.clone());
                        lhs.next();
                        rhs.next();
                    }
                },
                (Some(_), None) => {
                    delta.removed.extend(lhs.by_ref().cloned());
                }
                (None, Some(_)) => {
                    delta.added.extend(rhs.by_ref().cloned());
                }
                (None, None) => break,
            }
        }

        delta
    }

    pub fn is_same(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}
