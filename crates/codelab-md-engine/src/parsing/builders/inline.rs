//! Text runs, links and link buttons.

use log::debug;

use super::{BOLD, CODE, ITALIC, non_blank_attr, styled};
use crate::models::{ButtonNode, LinkNode, Node, NodeMeta, TextNode};
use crate::parsing::walker::Walker;

impl Walker<'_> {
    /// Builds a text run from a text node, a line break or a simple inline element.
    ///
    /// Content wrapping an anchor is delegated to [`Walker::link`].
    pub(crate) fn text(&mut self) -> Option<Node> {
        let tree = self.tree;
        let id = self.cur;

        if let Some(a) = tree.find(id, "a")
            && a != id
        {
            return self.descend(Some(a)).link();
        }

        let value = tree.stringify(id, false);
        // Blank text nodes only get here as word gaps; blank elements carry nothing.
        let blank_element = tree.text(id).is_none() && !tree.is(id, &["br"]);
        if value.is_empty() || (blank_element && value.trim().is_empty()) {
            return None;
        }

        Some(Node::Text(TextNode {
            meta: NodeMeta::in_block(self.block_of(id)),
            value,
            bold: styled(tree, id, BOLD),
            italic: styled(tree, id, ITALIC),
            code: styled(tree, id, CODE),
        }))
    }

    /// Builds a hyperlink from an anchor under the cursor.
    pub(crate) fn link(&mut self) -> Option<Node> {
        let tree = self.tree;
        let a = self.cur;

        let Some(url) = non_blank_attr(tree, a, "href") else {
            debug!("skipping link without a target");
            return None;
        };
        let mut content = self.descend(None).parse_subtree();
        if content.is_empty() {
            debug!("skipping link to {url} without content");
            return None;
        }

        // Emphasis wrapping the whole anchor applies to its text.
        let outer = tree.parent(a);
        let bold = outer.is_some_and(|p| styled(tree, p, BOLD));
        let italic = outer.is_some_and(|p| styled(tree, p, ITALIC));
        for node in &mut content {
            if let Node::Text(text) = node {
                text.bold |= bold;
                text.italic |= italic;
            }
        }

        Some(Node::Link(LinkNode {
            meta: NodeMeta::in_block(self.block_of(a)),
            url: url.to_string(),
            name: non_blank_attr(tree, a, "name").map(String::from),
            target: non_blank_attr(tree, a, "target").map(String::from),
            content,
        }))
    }

    /// Builds a link wrapping a button. A button without a link is plain text.
    pub(crate) fn button(&mut self) -> Option<Node> {
        let tree = self.tree;
        let id = self.cur;

        let Some(a) = tree.find(id, "a") else {
            return self.text();
        };
        let url = non_blank_attr(tree, a, "href")?;
        let content = self.descend(Some(a)).parse_subtree();
        if content.is_empty() {
            return None;
        }
        let download = tree
            .stringify(a, true)
            .to_lowercase()
            .starts_with("download ");

        let button = Node::Button(ButtonNode {
            meta: NodeMeta::default(),
            download,
            content,
        });
        Some(Node::Link(LinkNode {
            meta: NodeMeta::in_block(self.block_of(id)),
            url: url.to_string(),
            name: None,
            target: None,
            content: vec![button],
        }))
    }
}
