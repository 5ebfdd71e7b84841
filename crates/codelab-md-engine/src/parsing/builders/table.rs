use log::debug;

use super::non_blank_attr;
use crate::models::{GridCell, GridNode, Node, NodeMeta};
use crate::parsing::markup::{NodeId, Tree};
use crate::parsing::postprocess;
use crate::parsing::walker::Walker;

/// Span attribute value, defaulting to 1 when absent or not a positive number.
fn span(tree: &Tree, cell: NodeId, key: &str) -> u32 {
    non_blank_attr(tree, cell, key)
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(1)
}

impl Walker<'_> {
    /// Builds a grid from a table. Rows of nested tables stay with them.
    pub(crate) fn table(&mut self) -> Option<Node> {
        let tree = self.tree;
        let id = self.cur;

        let own_rows: Vec<NodeId> = tree
            .find_all(id, "tr")
            .into_iter()
            .filter(|&tr| tree.ancestor(tr, &["table"]) == Some(id))
            .collect();

        let mut rows = Vec::with_capacity(own_rows.len());
        for tr in own_rows {
            let mut row = Vec::new();
            for &cell in tree.children(tr).iter().filter(|&&c| tree.is(c, &["td", "th"])) {
                let content = postprocess::finalize(self.descend(Some(cell)).parse_subtree());
                row.push(GridCell {
                    colspan: span(tree, cell, "colspan"),
                    rowspan: span(tree, cell, "rowspan"),
                    content,
                });
            }
            rows.push(row);
        }
        if rows.is_empty() {
            debug!("skipping table without rows");
            return None;
        }

        Some(Node::Grid(GridNode {
            meta: NodeMeta::default(),
            rows,
        }))
    }
}
