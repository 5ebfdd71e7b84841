//! # Parsing Pipeline
//!
//! Source text goes through four stages:
//!
//! 1. [`preprocess`] rewrites import directives into placeholder comments.
//! 2. [`render`] turns markdown into markup with pulldown-cmark.
//! 3. [`markup`] parses that markup into a navigable tree.
//! 4. The walker classifies tree nodes into [`Node`]s, and [`postprocess`]
//!    groups and compacts them per step.
//!
//! A fresh walker is created for every call; nothing is shared between parses.

mod builders;
pub mod duration;
pub mod instruction;
pub mod markup;
pub mod metadata;
pub mod postprocess;
pub mod preprocess;
pub mod render;
pub mod text;
mod walker;

use log::warn;

use crate::error::ParseError;
use crate::models::{Document, Node};
use crate::options::ParseOptions;
use markup::{NodeId, Tree};
use walker::Walker;

fn markup_tree(input: &str) -> Result<(Tree, NodeId), ParseError> {
    let source = preprocess::convert_imports(input);
    let tree = markup::build_tree(&render::render(&source))?;
    let Some(body) = tree.body() else {
        warn!("rendered markup has no body");
        return Err(ParseError::MissingBody);
    };
    Ok((tree, body))
}

/// Parses a full tutorial document.
pub fn parse_document(input: &str, opts: &ParseOptions) -> Result<Document, ParseError> {
    let (tree, body) = markup_tree(input)?;
    Walker::new(&tree, opts, body).walk_document(body)
}

/// Parses a reusable fragment: content only, without steps or imports.
pub fn parse_fragment(input: &str, opts: &ParseOptions) -> Result<Vec<Node>, ParseError> {
    let (tree, body) = markup_tree(input)?;
    Walker::new(&tree, opts, body).walk_fragment(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_is_an_empty_document_without_id() {
        assert!(matches!(
            parse_document("", &ParseOptions::default()),
            Ok(d) if d.id.is_empty() && d.steps.is_empty()
        ));
    }

    #[test]
    fn fragment_returns_processed_content() {
        let nodes = parse_fragment("Some *text*\n\n- item", &ParseOptions::default()).unwrap();
        let kinds: Vec<_> = nodes.iter().map(Node::kind).collect();
        assert_eq!(kinds, vec![NodeKind::Group, NodeKind::List]);
    }

    #[test]
    fn fragment_rejects_step_headings() {
        for input in ["# Title", "intro\n\n## Step"] {
            assert!(matches!(
                parse_fragment(input, &ParseOptions::default()),
                Err(ParseError::FragmentSteps)
            ));
        }
    }

    #[test]
    fn fragment_allows_lower_headings() {
        let nodes = parse_fragment("### Sub", &ParseOptions::default()).unwrap();
        assert_eq!(nodes[0].kind(), NodeKind::Header);
    }

    #[test]
    fn fragment_rejects_imports() {
        assert!(matches!(
            parse_fragment("text\n\n<<other.md>>\n", &ParseOptions::default()),
            Err(ParseError::FragmentImports)
        ));
    }

    #[test]
    fn fragment_step_heading_wins_over_earlier_import() {
        assert!(matches!(
            parse_fragment("<<a.md>>\n\n## Step\n", &ParseOptions::default()),
            Err(ParseError::FragmentSteps)
        ));
    }
}
