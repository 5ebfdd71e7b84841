use crate::models::{Flavor, HeaderNode, Node, NodeMeta};
use crate::parsing::postprocess;
use crate::parsing::walker::Walker;

const HEADER_LEARN: &str = "what you'll learn";
const HEADER_COVERED: &str = "what we've covered";
const HEADER_FAQ: &str = "frequently asked questions";

/// Flavour selected by a header's text, compared case-insensitively.
pub(crate) fn header_flavor(text: &str) -> Flavor {
    match text.trim().to_lowercase().as_str() {
        HEADER_LEARN | HEADER_COVERED => Flavor::Checklist,
        HEADER_FAQ => Flavor::Faq,
        _ => Flavor::Plain,
    }
}

impl Walker<'_> {
    /// Builds a header and resets the active environment.
    pub(crate) fn header(&mut self) -> Option<Node> {
        let tree = self.tree;
        let id = self.cur;

        let content = postprocess::compact(self.descend(None).parse_subtree());
        if content.is_empty() {
            return None;
        }
        let level = tree
            .name(id)
            .and_then(|n| n.strip_prefix('h'))
            .and_then(|n| n.parse::<u8>().ok())
            .unwrap_or(1);

        self.env.clear();
        Some(Node::Header(HeaderNode {
            meta: NodeMeta::default(),
            level,
            flavor: header_flavor(&tree.stringify(id, true)),
            content,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeKind;
    use crate::tests::step_content;
    use rstest::rstest;

    #[rstest]
    #[case("What you'll learn", Flavor::Checklist)]
    #[case("WHAT WE'VE COVERED", Flavor::Checklist)]
    #[case(" Frequently Asked Questions ", Flavor::Faq)]
    #[case("What you will learn", Flavor::Plain)]
    fn flavor_follows_header_text(#[case] text: &str, #[case] expected: Flavor) {
        assert_eq!(header_flavor(text), expected);
    }

    #[test]
    fn smart_quotes_still_select_checklist() {
        let content = step_content("### What you'll learn");
        assert_eq!(content[0].kind(), NodeKind::HeaderChecklist);
    }

    #[test]
    fn header_level_and_content() {
        let content = step_content("#### Set *up*");
        let Node::Header(h) = &content[0] else {
            panic!("expected header");
        };
        assert_eq!(h.level, 4);
        assert_eq!(h.flavor, Flavor::Plain);
        assert_eq!(h.content.len(), 2);
    }
}
