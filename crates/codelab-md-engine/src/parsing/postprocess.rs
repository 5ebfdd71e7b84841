//! # Post-processing
//!
//! Two passes over a finished node sequence:
//!
//! - [`group_blocks`] wraps consecutive nodes emitted from the same markup
//!   block into a [`Node::Group`].
//! - [`compact`] drops empty nodes and merges adjacent text runs with the
//!   same styling, block and environment.
//!
//! Both are idempotent, and so is [`finalize`], which applies them in order.

use std::collections::BTreeSet;

use crate::models::{BlockId, GroupNode, Node, NodeMeta};

/// Groups block members, leaving stand-alone nodes in place.
///
/// A group's environment is the set shared by all of its members.
pub fn group_blocks(nodes: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut group: Vec<Node> = Vec::new();
    let mut current: Option<BlockId> = None;

    for node in nodes {
        match node.meta().block {
            Some(block) if current == Some(block) => group.push(node),
            Some(block) => {
                flush(&mut out, &mut group);
                current = Some(block);
                group.push(node);
            }
            None => {
                flush(&mut out, &mut group);
                current = None;
                out.push(node);
            }
        }
    }
    flush(&mut out, &mut group);
    out
}

fn flush(out: &mut Vec<Node>, group: &mut Vec<Node>) {
    if group.is_empty() {
        return;
    }
    let content = std::mem::take(group);
    let env = shared_env(&content);
    out.push(Node::Group(GroupNode {
        meta: NodeMeta { block: None, env },
        content,
    }));
}

fn shared_env(nodes: &[Node]) -> BTreeSet<String> {
    let mut iter = nodes.iter();
    let Some(first) = iter.next() else {
        return BTreeSet::new();
    };
    let mut env = first.env().clone();
    for node in iter {
        env.retain(|e| node.env().contains(e));
    }
    env
}

/// Removes empty nodes and merges adjacent text runs, recursing into groups.
pub fn compact(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        let node = match node {
            Node::Group(mut g) => {
                g.content = compact(g.content);
                Node::Group(g)
            }
            other => other,
        };
        if node.is_empty() {
            continue;
        }
        if let Node::Text(next) = &node
            && let Some(Node::Text(prev)) = out.last_mut()
            && prev.same_run(next)
        {
            prev.value.push_str(&next.value);
            continue;
        }
        out.push(node);
    }
    out
}

/// Groups then compacts.
pub fn finalize(nodes: Vec<Node>) -> Vec<Node> {
    compact(group_blocks(nodes))
}
