use crate::models::{CodeNode, Node, NodeMeta};
use crate::parsing::markup::NodeId;
use crate::parsing::walker::Walker;

const LANGUAGE_PREFIX: &str = "language-";
const TERMINAL_LANGUAGE: &str = "console";

impl Walker<'_> {
    pub(crate) fn is_console(&self, id: NodeId) -> bool {
        self.tree.is(id, &["code"])
            && self
                .tree
                .has_class(id, &format!("{LANGUAGE_PREFIX}{TERMINAL_LANGUAGE}"))
    }

    /// Builds a code block from a `code` element inside `pre`. Inline code
    /// falls back to a text run.
    pub(crate) fn code(&mut self, terminal: bool) -> Option<Node> {
        let tree = self.tree;
        let id = self.cur;

        if tree.ancestor(id, &["pre"]).is_none() {
            return self.text();
        }

        let mut value = tree.stringify(id, false);
        let parent = tree.parent(id);
        if value.is_empty() {
            if parent.is_some_and(|p| tree.count_direct(p) > 1) {
                return None;
            }
            value.push('\n');
        } else if let Some(p) = parent
            && tree.first_child(p) == Some(id)
            && !tree.is(p, &["span"])
        {
            value.insert(0, '\n');
        }

        let lang = tree.attr(id, "class").and_then(|classes| {
            classes
                .split_whitespace()
                .find_map(|c| c.strip_prefix(LANGUAGE_PREFIX))
                .filter(|l| !l.is_empty())
                .map(String::from)
        });

        Some(Node::Code(CodeNode {
            meta: NodeMeta::default(),
            value,
            terminal,
            lang,
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::models::Node;
    use crate::tests::{flatten, step_content};
    use pretty_assertions::assert_eq;

    fn code(body: &str) -> crate::models::CodeNode {
        match step_content(body).into_iter().next() {
            Some(Node::Code(c)) => c,
            other => panic!("expected code, got {other:?}"),
        }
    }

    #[test]
    fn fenced_block_keeps_language_and_leading_newline() {
        let c = code("```rust\nfn main() {}\n```");
        assert_eq!(c.value, "\nfn main() {}\n");
        assert_eq!(c.lang.as_deref(), Some("rust"));
        assert!(!c.terminal);
    }

    #[test]
    fn console_block_is_terminal() {
        let c = code("```console\n$ cargo --version\n```");
        assert!(c.terminal);
        assert_eq!(c.value, "\n$ cargo --version\n");
    }

    #[test]
    fn indented_block_has_no_language() {
        let c = code("    let x = 1;");
        assert_eq!(c.lang, None);
        assert_eq!(c.value, "\nlet x = 1;\n");
    }

    #[test]
    fn empty_block_becomes_newline() {
        let c = code("```\n```");
        assert_eq!(c.value, "\n");
    }

    #[test]
    fn empty_fragment_among_siblings_is_dropped() {
        let content = step_content("<pre><span>a</span><code></code><code>b</code></pre>");
        let values: Vec<_> = flatten(&content)
            .into_iter()
            .filter_map(|n| match n {
                Node::Code(c) => Some(c.value.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(values, vec!["b"]);
    }

    #[test]
    fn styling_wrapper_skips_leading_newline() {
        let c = code("<pre><span><code>x</code></span></pre>");
        assert_eq!(c.value, "x");
    }

    #[test]
    fn inline_code_is_text() {
        let content = step_content("Run `make`");
        assert!(matches!(&content[0], Node::Group(_)));
    }
}
