use log::debug;

use super::non_blank_attr;
use crate::models::{Flavor, ListNode, Node, NodeKind, NodeMeta};
use crate::parsing::postprocess;
use crate::parsing::walker::Walker;

impl Walker<'_> {
    /// Builds a list from `ul`/`ol`. A list right after a checklist or FAQ
    /// header takes that header's flavour.
    pub(crate) fn list(&mut self) -> Option<Node> {
        let tree = self.tree;
        let id = self.cur;

        let ordered = tree.is(id, &["ol"]);
        let style = non_blank_attr(tree, id, "type")
            .map(String::from)
            .or_else(|| ordered.then(|| "1".to_string()));
        let start = non_blank_attr(tree, id, "start").and_then(|s| s.parse::<u32>().ok());

        let mut items = Vec::new();
        for &li in tree.children(id).iter().filter(|&&c| tree.is(c, &["li"])) {
            let item = postprocess::finalize(self.descend(Some(li)).parse_subtree());
            if !item.is_empty() {
                items.push(item);
            }
        }
        if items.is_empty() {
            debug!("skipping list without items");
            return None;
        }

        let flavor = match self.last_kind() {
            Some(NodeKind::HeaderChecklist) => Flavor::Checklist,
            Some(NodeKind::HeaderFaq) => Flavor::Faq,
            _ => Flavor::Plain,
        };
        Some(Node::List(ListNode {
            meta: NodeMeta::default(),
            flavor,
            ordered,
            style,
            start,
            items,
        }))
    }
}
