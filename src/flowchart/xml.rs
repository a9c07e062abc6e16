//! RAPTOR XML reader.
//!
//! RAPTOR stores a flowchart as nested XML. Every symbol holds its successor
//! inside a `_Successor` container, so a chain of N symbols is N levels
//! deep. Selections keep their branches in `_left_Child` (yes) and
//! `_right_Child` (no); loops keep theirs in `_before_Child` and
//! `_after_Child`.
//!
//! A container either *is* the symbol (it carries an `xsi:type` such as
//! `a:Rectangle`) or wraps it as its first element child. A container with
//! `xsi:nil="true"` is empty. Elements are matched by local name, so
//! documents written with or without the RAPTOR namespaces both read.

use roxmltree::{Document, Node};

use super::{FlowKind, FlowNode, Flowchart, FlowchartError, Prompt};
use crate::parser::MAX_NESTING_DEPTH;

/// The XML Schema instance namespace, home of `type` and `nil`.
const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Parses a RAPTOR XML document into a [`Flowchart`].
pub fn read_flowchart(xml: &str) -> Result<Flowchart, FlowchartError> {
    let doc = Document::parse(xml)?;

    let start = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "Start")
        .ok_or(FlowchartError::MissingStart)?;

    let start = read_chain(Some(start), 0)?.ok_or(FlowchartError::MissingStart)?;
    log::debug!("read flowchart starting at byte {}", start.offset);

    Ok(Flowchart { start: *start })
}

/// Reads a successor chain, iterating along `_Successor` links.
///
/// `depth` counts the decisions and loops enclosing the chain.
fn read_chain(
    first: Option<Node<'_, '_>>,
    depth: usize,
) -> Result<Option<Box<FlowNode>>, FlowchartError> {
    let mut symbols = Vec::new();
    let mut current = first;
    while let Some(node) = current {
        symbols.push(read_symbol(node, depth)?);
        current = linked(node, "_Successor");
    }

    let mut chain: Option<Box<FlowNode>> = None;
    for mut symbol in symbols.into_iter().rev() {
        symbol.successor = chain;
        chain = Some(Box::new(symbol));
    }
    Ok(chain)
}

/// Reads one symbol, without its successor.
fn read_symbol(node: Node<'_, '_>, depth: usize) -> Result<FlowNode, FlowchartError> {
    let ty = symbol_type(node);
    if matches!(ty, "IF_Control" | "Loop") && depth >= MAX_NESTING_DEPTH {
        return Err(FlowchartError::NestingTooDeep {
            limit: MAX_NESTING_DEPTH,
            offset: node.range().start,
        });
    }

    let kind = match ty {
        "Oval" | "Start" | "End" => FlowKind::Oval,
        "Rectangle" => FlowKind::Rectangle,
        "Parallelogram" => FlowKind::Parallelogram {
            is_input: field(node, "_is_input")
                .is_some_and(|(text, _)| text.trim().eq_ignore_ascii_case("true")),
            prompt: field(node, "_prompt").map(|(text, offset)| Prompt {
                text: text.to_string(),
                offset,
            }),
        },
        "IF_Control" => FlowKind::Decision {
            yes: read_chain(linked(node, "_left_Child"), depth + 1)?,
            no: read_chain(linked(node, "_right_Child"), depth + 1)?,
        },
        "Loop" => FlowKind::Loop {
            before: read_chain(linked(node, "_before_Child"), depth + 1)?,
            after: read_chain(linked(node, "_after_Child"), depth + 1)?,
        },
        other => FlowKind::Unknown(other.to_string()),
    };

    let (text, offset) = field(node, "_text_str").unwrap_or(("", 0));
    Ok(FlowNode::new(kind, text, offset))
}

/// The symbol's type: the local part of `xsi:type`, else the tag name.
fn symbol_type<'a>(node: Node<'a, '_>) -> &'a str {
    match node.attribute((XSI, "type")) {
        Some(ty) => ty.rsplit(':').next().unwrap_or(ty),
        None => node.tag_name().name(),
    }
}

/// Finds a direct child element by local name.
fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
}

/// Follows a link container to the symbol it holds.
fn linked<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    let container = child(node, name)?;
    if container.attribute((XSI, "nil")) == Some("true") {
        return None;
    }
    if container.has_attribute((XSI, "type")) {
        return Some(container);
    }
    container.children().find(|c| c.is_element())
}

/// Reads a text field as `(text, byte offset of the text)`.
fn field<'a>(node: Node<'a, '_>, name: &str) -> Option<(&'a str, usize)> {
    let text_node = child(node, name)?.first_child().filter(|c| c.is_text())?;
    Some((text_node.text()?, text_node.range().start))
}
