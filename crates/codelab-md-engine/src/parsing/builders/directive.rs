//! Applying step instructions to the walker state.

use log::trace;

use super::{BOLD, CODE, ITALIC, styled};
use crate::models::{Node, NodeMeta, TextNode};
use crate::parsing::instruction::{self, Instruction};
use crate::parsing::markup::NodeId;
use crate::parsing::text::clean;
use crate::parsing::walker::Walker;

impl Walker<'_> {
    pub(crate) fn is_instruction(&self, id: NodeId) -> bool {
        self.tree
            .text(id)
            .is_some_and(instruction::starts_with_instruction)
    }

    /// Consumes instruction lines starting at the cursor, including further
    /// instruction lines after hard breaks, and applies them. Text left over
    /// after the instructions is returned as a run.
    pub(crate) fn instruction(&mut self) -> Option<Node> {
        let tree = self.tree;
        let mut raw = tree.text(self.cur).unwrap_or_default().to_string();
        while let Some(br) = tree.next_sibling(self.cur)
            && tree.is(br, &["br"])
            && let Some(next) = tree.next_sibling(br)
            && self.is_instruction(next)
        {
            raw.push('\n');
            raw.push_str(tree.text(next).unwrap_or_default());
            self.cur = next;
        }

        let (instructions, rest) = instruction::split(&clean(&raw));
        for instruction in instructions {
            self.apply(instruction);
        }
        if rest.trim().is_empty() {
            return None;
        }

        let id = self.cur;
        Some(Node::Text(TextNode {
            meta: NodeMeta::in_block(self.block_of(id)),
            value: rest,
            bold: styled(tree, id, BOLD),
            italic: styled(tree, id, ITALIC),
            code: styled(tree, id, CODE),
        }))
    }

    fn apply(&mut self, instruction: Instruction) {
        match instruction {
            Instruction::Duration(d) => {
                if let Some(step) = self.step.as_mut() {
                    trace!("step {:?} takes {d:?}", step.title);
                    self.total = self.total.saturating_sub(step.duration).saturating_add(d);
                    step.duration = d;
                }
            }
            Instruction::Environment(tags) => {
                if let Some(step) = self.step.as_mut() {
                    step.tags.extend(tags.iter().cloned());
                }
                self.doc.tags.extend(tags.iter().cloned());
                if let Some(last) = self.last_node_mut()
                    && last.kind().is_header()
                {
                    last.meta_mut().env.extend(tags.iter().cloned());
                }
                self.env = tags;
            }
        }
    }
}
