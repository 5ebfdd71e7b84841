//! Helpers shared by the unit tests.

use crate::models::{Document, LinkNode, Node, TextNode};
use crate::options::ParseOptions;
use crate::parsing::parse_document;

pub fn doc(markdown: &str) -> Document {
    parse_document(markdown, &ParseOptions::default()).unwrap()
}

/// Parses `body` as the only step of a minimal document and returns its content.
pub fn step_content(body: &str) -> Vec<Node> {
    let d = doc(&format!("# Test\nid: test\n\n## Step\n\n{body}\n"));
    d.steps
        .into_iter()
        .next()
        .map(|s| s.content)
        .unwrap_or_default()
}

/// Every node in `nodes`, depth-first, containers before their content.
pub fn flatten(nodes: &[Node]) -> Vec<&Node> {
    let mut out = Vec::new();
    for node in nodes {
        push_all(node, &mut out);
    }
    out
}

fn push_all<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
    out.push(node);
    for child in node.children() {
        push_all(child, out);
    }
}

/// Every text run in `nodes`, depth-first.
pub fn texts(nodes: &[Node]) -> Vec<&TextNode> {
    flatten(nodes)
        .into_iter()
        .filter_map(|n| match n {
            Node::Text(t) => Some(t),
            _ => None,
        })
        .collect()
}

/// First link in `nodes`, searching nested content.
pub fn link_in(nodes: &[Node]) -> Option<&LinkNode> {
    flatten(nodes).into_iter().find_map(|n| match n {
        Node::Link(l) => Some(l),
        _ => None,
    })
}
