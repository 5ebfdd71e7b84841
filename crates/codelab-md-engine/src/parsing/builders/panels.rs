//! Infoboxes, surveys and import placeholders.

use log::debug;

use super::non_blank_attr;
use crate::models::{ImportNode, InfoboxKind, InfoboxNode, Node, NodeMeta, SurveyGroup, SurveyNode};
use crate::parsing::markup::NodeId;
use crate::parsing::postprocess;
use crate::parsing::preprocess;
use crate::parsing::walker::Walker;

fn infobox_kind_named(name: &str) -> Option<InfoboxKind> {
    match name.trim().to_lowercase().as_str() {
        "positive" => Some(InfoboxKind::Positive),
        "negative" => Some(InfoboxKind::Negative),
        _ => None,
    }
}

impl Walker<'_> {
    /// Infobox kind of `id`: an `aside` with a kind class, or a definition
    /// term naming the kind.
    pub(crate) fn infobox_kind(&self, id: NodeId) -> Option<InfoboxKind> {
        let tree = self.tree;
        if tree.is(id, &["aside"]) {
            return tree
                .attr(id, "class")?
                .split_whitespace()
                .find_map(infobox_kind_named);
        }
        if tree.is(id, &["dt"]) {
            return infobox_kind_named(&tree.stringify(id, true));
        }
        None
    }

    /// Builds an infobox. A term form consumes the following definition as
    /// its body and leaves the cursor on it.
    pub(crate) fn infobox(&mut self, kind: InfoboxKind) -> Option<Node> {
        let tree = self.tree;
        let id = self.cur;

        let body = if tree.is(id, &["dt"]) {
            let dd = tree.next_element(id).filter(|&n| tree.is(n, &["dd"]))?;
            self.cur = dd;
            dd
        } else {
            id
        };

        let content = postprocess::finalize(self.descend(Some(body)).parse_subtree());
        if content.is_empty() {
            debug!("skipping empty {kind:?} infobox");
            return None;
        }
        Some(Node::Infobox(InfoboxNode {
            meta: NodeMeta::default(),
            kind,
            content,
        }))
    }

    /// Builds a survey from a `form` holding a `name` and option inputs.
    pub(crate) fn survey(&mut self) -> Option<Node> {
        let tree = self.tree;
        let id = self.cur;

        let name = tree
            .find(id, "name")
            .map(|n| tree.stringify(n, true))
            .unwrap_or_default();
        let options: Vec<String> = tree
            .find_all(id, "input")
            .into_iter()
            .filter_map(|input| non_blank_attr(tree, input, "value"))
            .map(String::from)
            .collect();
        if name.is_empty() || options.is_empty() {
            debug!("skipping survey without a question or options");
            return None;
        }

        self.survey += 1;
        Some(Node::Survey(SurveyNode {
            meta: NodeMeta::default(),
            id: format!("{}-{}", self.doc.id, self.survey),
            groups: vec![SurveyGroup { name, options }],
        }))
    }

    pub(crate) fn import_target(&self, id: NodeId) -> Option<String> {
        self.tree.comment(id).and_then(preprocess::import_target)
    }

    pub(crate) fn import(&mut self, url: String) -> Option<Node> {
        Some(Node::Import(ImportNode {
            meta: NodeMeta::default(),
            url,
        }))
    }
}
