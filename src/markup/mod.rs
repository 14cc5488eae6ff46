//! Markup module - parsing form markup into navigable trees.
//!
//! This module provides the document parser and the arena tree it produces.

mod node;
mod parser;

pub use node::*;
pub use parser::*;

impl FormTree {
    /// Parses markup text into an immutable form tree.
    ///
    /// Convenience wrapper around [`parse`].
    pub fn parse(markup: &str) -> Result<FormTree, ParseError> {
        parse(markup)
    }
}
