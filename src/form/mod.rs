//! Form module - domain extraction over parsed trees.
//!
//! This module resolves hierarchy, labels, and field records, and builds
//! the stable-identifier indexes the differ consumes.

mod field;
mod hierarchy;
mod index;
mod labels;

pub use field::*;
pub use hierarchy::*;
pub use index::*;
pub use labels::*;
