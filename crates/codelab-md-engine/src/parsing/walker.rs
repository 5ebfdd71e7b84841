//! # Document Walker
//!
//! Depth-first traversal of the markup tree. The walker owns all per-parse
//! state: the document under construction, the active step, the active
//! environment set, the running duration and the cursor into the tree.
//!
//! ## Cursor discipline
//!
//! Builders read and move `cur`. Descending into a subtree goes through
//! [`Walker::descend`], which saves the cursor on an explicit stack and
//! returns a guard that restores it when dropped, so every exit path of a
//! builder leaves the cursor where the caller expects it.
//!
//! A builder may also advance `cur` past siblings it consumed (instruction
//! lines, the definition of an infobox term); sibling loops continue from
//! wherever the cursor was left.

use std::collections::BTreeSet;
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use log::{trace, warn};

use super::markup::{NodeId, Tree};
use super::{metadata, postprocess};
use crate::error::ParseError;
use crate::models::{BlockId, Document, Node, NodeKind, Step};
use crate::options::ParseOptions;

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Result of classifying the node under the cursor.
pub(crate) enum Outcome {
    /// A classifier claimed the node; it may still produce nothing.
    Accepted(Option<Node>),
    /// No classifier matched; the node is a transparent wrapper.
    Unrecognized,
}

pub(crate) struct Walker<'t> {
    pub(crate) tree: &'t Tree,
    pub(crate) opts: &'t ParseOptions,
    pub(crate) doc: Document,
    /// Sum of declared step durations so far.
    pub(crate) total: Duration,
    /// Last survey number handed out.
    pub(crate) survey: usize,
    pub(crate) step: Option<Step>,
    /// Index into the active step's content of the last appended node.
    pub(crate) last: Option<usize>,
    pub(crate) env: BTreeSet<String>,
    pub(crate) cur: NodeId,
    stack: Vec<NodeId>,
}

/// Restores the walker's cursor when dropped.
pub(crate) struct Descent<'w, 't> {
    walker: &'w mut Walker<'t>,
}

impl<'t> Deref for Descent<'_, 't> {
    type Target = Walker<'t>;

    fn deref(&self) -> &Self::Target {
        self.walker
    }
}

impl DerefMut for Descent<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.walker
    }
}

impl Drop for Descent<'_, '_> {
    fn drop(&mut self) {
        self.walker.pop();
    }
}

impl<'t> Walker<'t> {
    pub(crate) fn new(tree: &'t Tree, opts: &'t ParseOptions, start: NodeId) -> Self {
        Self {
            tree,
            opts,
            doc: Document::default(),
            total: Duration::ZERO,
            survey: 0,
            step: None,
            last: None,
            env: BTreeSet::new(),
            cur: start,
            stack: Vec::new(),
        }
    }

    /// Saves the cursor and optionally moves it to `to`.
    pub(crate) fn descend(&mut self, to: Option<NodeId>) -> Descent<'_, 't> {
        self.stack.push(self.cur);
        if let Some(to) = to {
            self.cur = to;
        }
        Descent { walker: self }
    }

    fn pop(&mut self) {
        if let Some(prev) = self.stack.pop() {
            self.cur = prev;
        }
    }

    pub(crate) fn block_of(&self, id: NodeId) -> Option<BlockId> {
        self.tree.block_parent(id).map(NodeId::block_id)
    }

    pub(crate) fn last_kind(&self) -> Option<NodeKind> {
        let step = self.step.as_ref()?;
        self.last
            .and_then(|i| step.content.get(i))
            .map(Node::kind)
    }

    pub(crate) fn last_node_mut(&mut self) -> Option<&mut Node> {
        let i = self.last?;
        self.step.as_mut()?.content.get_mut(i)
    }

    /// Walks the children of `body` as a full document.
    pub(crate) fn walk_document(mut self, body: NodeId) -> Result<Document, ParseError> {
        let tree = self.tree;
        let mut next = tree.first_child(body);
        while let Some(id) = next {
            self.cur = id;
            if tree.is(id, &["h1"]) && self.doc.title.is_empty() {
                let title = tree.stringify(id, true);
                if !title.is_empty() {
                    self.doc.title = title;
                }
            } else if tree.is(id, &["p"]) && self.doc.id.is_empty() {
                let mut raw = String::new();
                tree.raw_text(id, &mut raw);
                metadata::parse_metadata(&raw, &mut self.doc, self.opts).inspect_err(|e| {
                    warn!("rejecting document: {e}");
                })?;
            } else if tree.is(id, &["h2"]) {
                self.new_step();
            } else if self.step.is_some() {
                self.parse_top();
            }
            next = tree.next_sibling(self.cur);
        }

        self.finalize_step();
        self.doc.duration = self.total;
        Ok(self.doc)
    }

    /// Walks the children of `body` as a fragment: no steps, no imports.
    pub(crate) fn walk_fragment(mut self, body: NodeId) -> Result<Vec<Node>, ParseError> {
        let tree = self.tree;
        self.step = Some(Step::new("fragment"));
        let mut next = tree.first_child(body);
        while let Some(id) = next {
            self.cur = id;
            if tree.is(id, &["h1", "h2"]) {
                return Err(ParseError::FragmentSteps);
            }
            self.parse_top();
            next = tree.next_sibling(self.cur);
        }

        if self.has_import() {
            return Err(ParseError::FragmentImports);
        }
        self.finalize_step();
        Ok(self.doc.steps.pop().map(|s| s.content).unwrap_or_default())
    }

    fn has_import(&self) -> bool {
        self.step.as_ref().is_some_and(|s| {
            s.content
                .iter()
                .any(|n| n.any(&|n| n.kind() == NodeKind::Import))
        })
    }

    /// Closes the active step and opens one titled by the heading under the cursor.
    fn new_step(&mut self) {
        let title = self.tree.stringify(self.cur, true);
        if title.is_empty() {
            return;
        }
        self.finalize_step();
        trace!("starting step {title:?}");
        self.step = Some(Step::new(title));
        self.env.clear();
        self.last = None;
    }

    fn finalize_step(&mut self) {
        if let Some(mut step) = self.step.take() {
            step.content = postprocess::finalize(std::mem::take(&mut step.content));
            self.doc.steps.push(step);
        }
    }

    /// Parses the node under the cursor and appends the result to the step.
    pub(crate) fn parse_top(&mut self) {
        match self.parse_node() {
            Outcome::Accepted(node) => self.append(node.into_iter().collect()),
            Outcome::Unrecognized => {
                let nodes = self.descend(None).parse_subtree();
                self.append(postprocess::compact(nodes));
            }
        }
    }

    /// Parses every child of the node under the cursor.
    ///
    /// Moves the cursor; callers wrap this in [`Walker::descend`].
    pub(crate) fn parse_subtree(&mut self) -> Vec<Node> {
        let tree = self.tree;
        let mut nodes = Vec::new();
        let mut next = tree.first_child(self.cur);
        while let Some(id) = next {
            self.cur = id;
            match self.parse_node() {
                Outcome::Accepted(node) => nodes.extend(node),
                Outcome::Unrecognized => {
                    let inner = self.descend(None).parse_subtree();
                    nodes.extend(inner);
                }
            }
            next = tree.next_sibling(self.cur);
        }
        nodes
    }

    /// Classifies the node under the cursor, first match wins.
    pub(crate) fn parse_node(&mut self) -> Outcome {
        let tree = self.tree;
        let id = self.cur;

        // Renderer output puts a newline after most tags; those carry nothing.
        if tree.text(id).is_some_and(|t| t.trim().is_empty()) && !tree.is_inline_gap(id) {
            return Outcome::Accepted(None);
        }

        let node = if self.is_instruction(id) {
            self.instruction()
        } else if tree.text(id).is_some() || tree.is(id, &["br"]) {
            self.text()
        } else if tree.is(id, &["a"]) {
            self.link()
        } else if tree.is(id, &["img"]) {
            self.image()
        } else if tree.is(id, &["button"]) {
            self.button()
        } else if tree.is(id, HEADINGS) {
            self.header()
        } else if tree.is(id, &["ul", "ol"]) {
            self.list()
        } else if self.is_console(id) {
            self.code(true)
        } else if tree.is(id, &["code"]) {
            self.code(false)
        } else if let Some(kind) = self.infobox_kind(id) {
            self.infobox(kind)
        } else if tree.is(id, &["form"]) {
            self.survey()
        } else if tree.is(id, &["table"]) {
            self.table()
        } else if tree.is(id, &["video"]) {
            self.video()
        } else if let Some(target) = self.import_target(id) {
            self.import(target)
        } else {
            return Outcome::Unrecognized;
        };
        Outcome::Accepted(node)
    }

    /// Appends nodes to the active step, tagging them with the active environment.
    pub(crate) fn append(&mut self, nodes: Vec<Node>) {
        let Some(step) = self.step.as_mut() else {
            return;
        };
        if nodes.is_empty() {
            return;
        }
        for mut node in nodes {
            if !self.env.is_empty() {
                node.meta_mut().env.extend(self.env.iter().cloned());
            }
            step.content.push(node);
        }
        self.last = Some(step.content.len() - 1);
    }
}
