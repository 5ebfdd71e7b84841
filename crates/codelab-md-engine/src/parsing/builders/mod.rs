//! # Node Builders
//!
//! One builder per markup construct. Each is an `impl Walker` method that
//! reads the node under the cursor and returns `Some(node)` or `None` when
//! the markup does not qualify. Builders are classified in priority order by
//! [`Walker::parse_node`](super::walker::Walker::parse_node).

mod code;
mod directive;
mod header;
mod inline;
mod list;
mod media;
mod panels;
mod table;

use super::markup::{NodeId, Tree};

pub(crate) const BOLD: &[&str] = &["strong", "b"];
pub(crate) const ITALIC: &[&str] = &["em", "i"];
pub(crate) const CODE: &[&str] = &["code"];

/// True when `id` or an inline ancestor below its block is one of `names`.
pub(crate) fn styled(tree: &Tree, id: NodeId, names: &[&str]) -> bool {
    let mut cur = Some(id);
    while let Some(n) = cur {
        if tree.is(n, names) {
            return true;
        }
        if tree.is_block(n) {
            return false;
        }
        cur = tree.parent(n);
    }
    false
}

/// Attribute value with surrounding whitespace removed, `None` when blank.
pub(crate) fn non_blank_attr<'t>(tree: &'t Tree, id: NodeId, key: &str) -> Option<&'t str> {
    tree.attr(id, key).map(str::trim).filter(|v| !v.is_empty())
}
