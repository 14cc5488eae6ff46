//! Event-driven markup parsing.
//!
//! Builds a [`FormTree`] from raw markup text using a stack of open
//! elements. Children keep document order and attributes keep their
//! original order, both of which the differ depends on.

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

use super::node::{FormTree, Node, NodeId};

/// Error raised for markup the parser cannot turn into a tree.
///
/// A `ParseError` is scoped to one document; callers comparing batches of
/// form pairs skip the failing pair and continue.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// Malformed markup: bad syntax, unbalanced tags, invalid escapes.
    #[error("malformed markup at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    /// The document contains no elements at all.
    #[error("document contains no elements")]
    Empty,
}

impl ParseError {
    fn syntax(position: u64, err: impl std::fmt::Display) -> ParseError {
        ParseError::Syntax {
            position,
            message: err.to_string(),
        }
    }
}

/// Parses markup text into an immutable form tree.
pub fn parse(markup: &str) -> Result<FormTree, ParseError> {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.trim_text(true);
    config.check_end_names = true;

    let mut tree = FormTree::with_root();
    let mut open: Vec<NodeId> = Vec::new();

    loop {
        let position = reader.buffer_position() as u64;
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let node = element(&start, open.last().copied())
                    .map_err(|e| ParseError::syntax(position, e))?;
                let id = tree.push(node);
                open.push(id);
            }
            Ok(Event::Empty(start)) => {
                let node = element(&start, open.last().copied())
                    .map_err(|e| ParseError::syntax(position, e))?;
                tree.push(node);
            }
            Ok(Event::End(_)) => {
                // Mismatched end tags are caught by the reader itself.
                open.pop();
            }
            Ok(Event::Text(text)) => {
                if let Some(&current) = open.last() {
                    let chunk = text
                        .unescape()
                        .map_err(|e| ParseError::syntax(position, e))?;
                    tree.node_mut(current).push_text(&chunk);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(&current) = open.last() {
                    let chunk = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    tree.node_mut(current).push_text(&chunk);
                }
            }
            Ok(Event::Eof) => {
                if let Some(&unclosed) = open.last() {
                    return Err(ParseError::syntax(
                        position,
                        format!("unclosed element `{}`", tree.node(unclosed).tag),
                    ));
                }
                break;
            }
            // Declarations, comments, processing instructions and doctypes
            // carry nothing the differ looks at.
            Ok(_) => {}
            Err(e) => return Err(ParseError::syntax(reader.buffer_position() as u64, e)),
        }
    }

    if tree.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(tree)
}

fn element(
    start: &quick_xml::events::BytesStart<'_>,
    parent: Option<NodeId>,
) -> Result<Node, String> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|e| e.to_string())?.into_owned();
        attributes.push((name, value));
    }
    Ok(Node::new(tag, parent, attributes))
}
