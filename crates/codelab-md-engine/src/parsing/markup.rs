//! # Markup Tree
//!
//! An owned, navigable view of the rendered markup. The `tl` parser does the
//! tokenizing; its output is copied into an arena so the walker can move
//! freely between parents, children and siblings using plain [`NodeId`]s.
//!
//! Text and attribute values are entity-decoded while copying, so callers
//! always see the characters the author wrote.

use super::text::clean;
use crate::models::BlockId;

/// Handle of a node inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn block_id(self) -> BlockId {
        BlockId(self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    #[error("markup is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("markup could not be parsed: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupKind {
    Element {
        /// Lowercase tag name.
        name: String,
        /// Lowercase keys, decoded values. Valueless attributes map to "".
        attrs: Vec<(String, String)>,
    },
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct Entry {
    kind: MarkupKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Position within the parent's children (or the roots).
    index: usize,
}

/// Elements that flow within a line of text.
const INLINE: &[&str] = &[
    "a", "abbr", "b", "br", "code", "del", "em", "i", "img", "kbd", "mark", "s", "small", "span",
    "strong", "sub", "sup", "u",
];

/// Element names that delimit a block for grouping purposes.
const BLOCK_PARENTS: &[&str] = &[
    "p", "li", "dt", "dd", "td", "th", "h1", "h2", "h3", "h4", "h5", "h6", "pre", "div",
    "blockquote", "aside",
];

#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<Entry>,
    roots: Vec<NodeId>,
}

/// Parses rendered markup into a [`Tree`].
pub fn build_tree(markup: &[u8]) -> Result<Tree, MarkupError> {
    let input = std::str::from_utf8(markup)?;
    let dom = tl::parse(input, tl::ParserOptions::default())
        .map_err(|e| MarkupError::Parse(format!("{e:?}")))?;
    let parser = dom.parser();

    let mut tree = Tree::default();
    for handle in dom.children() {
        tree.copy_node(*handle, parser, None);
    }
    Ok(tree)
}

impl Tree {
    fn push(&mut self, kind: MarkupKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let siblings = match parent {
            Some(p) => &mut self.nodes[p.0].children,
            None => &mut self.roots,
        };
        let index = siblings.len();
        siblings.push(id);
        self.nodes.push(Entry {
            kind,
            parent,
            children: Vec::new(),
            index,
        });
        id
    }

    fn copy_node(&mut self, handle: tl::NodeHandle, parser: &tl::Parser, parent: Option<NodeId>) {
        let Some(node) = handle.get(parser) else {
            return;
        };
        match node {
            tl::Node::Tag(tag) => {
                let name = tag.name().as_utf8_str().to_lowercase();
                let attrs = tag
                    .attributes()
                    .iter()
                    .map(|(key, value)| {
                        let key: &str = key.as_ref();
                        let value = value.map(|v| v.to_string()).unwrap_or_default();
                        (
                            key.to_lowercase(),
                            html_escape::decode_html_entities(&value).into_owned(),
                        )
                    })
                    .collect();
                let id = self.push(MarkupKind::Element { name, attrs }, parent);
                for child in tag.children().top().iter() {
                    self.copy_node(*child, parser, Some(id));
                }
            }
            tl::Node::Raw(bytes) => {
                let text = html_escape::decode_html_entities(&bytes.as_utf8_str()).into_owned();
                self.push(MarkupKind::Text(text), parent);
            }
            tl::Node::Comment(bytes) => {
                self.push(MarkupKind::Comment(bytes.as_utf8_str().to_string()), parent);
            }
        }
    }

    pub fn kind(&self, id: NodeId) -> &MarkupKind {
        &self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    fn siblings(&self, id: NodeId) -> &[NodeId] {
        match self.parent(id) {
            Some(p) => self.children(p),
            None => &self.roots,
        }
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.siblings(id).get(self.nodes[id.0].index + 1).copied()
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let index = self.nodes[id.0].index.checked_sub(1)?;
        self.siblings(id).get(index).copied()
    }

    fn is_inline(&self, id: NodeId) -> bool {
        match self.kind(id) {
            MarkupKind::Text(_) => true,
            MarkupKind::Element { name, .. } => INLINE.contains(&name.as_str()),
            MarkupKind::Comment(_) => false,
        }
    }

    /// True when `id` sits between two inline siblings, where even blank
    /// text separates words.
    pub fn is_inline_gap(&self, id: NodeId) -> bool {
        let prev = self.prev_sibling(id).is_some_and(|n| self.is_inline(n));
        let next = self.next_sibling(id).is_some_and(|n| self.is_inline(n));
        prev && next
    }

    fn after_break(&self, id: NodeId) -> bool {
        self.prev_sibling(id).is_some_and(|n| self.is(n, &["br"]))
    }

    /// Next sibling that is an element, skipping text and comments.
    pub fn next_element(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = self.next_sibling(id);
        while let Some(n) = cur {
            if self.name(n).is_some() {
                return Some(n);
            }
            cur = self.next_sibling(n);
        }
        None
    }

    /// Tag name for elements, `None` for text and comments.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            MarkupKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is(&self, id: NodeId, names: &[&str]) -> bool {
        self.name(id).is_some_and(|n| names.contains(&n))
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            MarkupKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn comment(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            MarkupKind::Comment(c) => Some(c),
            _ => None,
        }
    }

    /// Attribute value, or `None` when absent.
    pub fn attr(&self, id: NodeId, key: &str) -> Option<&str> {
        match self.kind(id) {
            MarkupKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// True when the `class` attribute lists `class`.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attr(id, "class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    /// First node named `name` in document order, starting with `root` itself.
    pub fn find(&self, root: NodeId, name: &str) -> Option<NodeId> {
        if self.is(root, &[name]) {
            return Some(root);
        }
        self.children(root)
            .iter()
            .find_map(|&child| self.find(child, name))
    }

    /// All descendants of `root` named `name`, in document order.
    pub fn find_all(&self, root: NodeId, name: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect(root, name, &mut out);
        out
    }

    fn collect(&self, root: NodeId, name: &str, out: &mut Vec<NodeId>) {
        for &child in self.children(root) {
            if self.is(child, &[name]) {
                out.push(child);
            }
            self.collect(child, name, out);
        }
    }

    /// Nearest strict ancestor named one of `names`.
    pub fn ancestor(&self, id: NodeId, names: &[&str]) -> Option<NodeId> {
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            if self.is(p, names) {
                return Some(p);
            }
            cur = self.parent(p);
        }
        None
    }

    /// Nearest ancestor acting as a block for grouping.
    pub fn block_parent(&self, id: NodeId) -> Option<NodeId> {
        self.ancestor(id, BLOCK_PARENTS)
    }

    pub fn is_block(&self, id: NodeId) -> bool {
        self.is(id, BLOCK_PARENTS)
    }

    /// The document body, searched depth-first from the roots.
    pub fn body(&self) -> Option<NodeId> {
        self.roots.iter().find_map(|&root| self.find(root, "body"))
    }

    /// Number of element and non-blank text children.
    pub fn count_direct(&self, id: NodeId) -> usize {
        self.children(id)
            .iter()
            .filter(|&&c| match self.kind(c) {
                MarkupKind::Element { .. } => true,
                MarkupKind::Text(t) => !t.trim().is_empty(),
                MarkupKind::Comment(_) => false,
            })
            .count()
    }

    /// Concatenated text content of `id`.
    ///
    /// Line breaks become `\n`. A bare text node has its own newlines folded
    /// into spaces (they are soft breaks), while text inside elements keeps
    /// them so preformatted content survives. Smart punctuation is mapped
    /// back to ASCII.
    pub fn stringify(&self, id: NodeId, trim: bool) -> String {
        let s = match self.kind(id) {
            MarkupKind::Text(t) => {
                let t = if self.after_break(id) {
                    t.strip_prefix('\n').unwrap_or(t)
                } else {
                    t
                };
                t.replace('\n', " ")
            }
            MarkupKind::Comment(_) => String::new(),
            MarkupKind::Element { name, .. } if name == "br" => "\n".to_string(),
            MarkupKind::Element { .. } => {
                let mut buf = String::new();
                self.raw_text(id, &mut buf);
                buf
            }
        };
        let s = clean(&s);
        if trim { s.trim().to_string() } else { s }
    }

    /// Appends the raw text of every descendant, `br` as `\n`.
    pub fn raw_text(&self, id: NodeId, buf: &mut String) {
        for &child in self.children(id) {
            match self.kind(child) {
                MarkupKind::Text(t) if self.after_break(child) => {
                    buf.push_str(t.strip_prefix('\n').unwrap_or(t));
                }
                MarkupKind::Text(t) => buf.push_str(t),
                MarkupKind::Comment(_) => {}
                MarkupKind::Element { name, .. } if name == "br" => buf.push('\n'),
                MarkupKind::Element { .. } => self.raw_text(child, buf),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(html: &str) -> Tree {
        build_tree(html.as_bytes()).unwrap()
    }

    #[test]
    fn finds_body_and_navigates_siblings() {
        let t = tree("<html><body><p>a</p>\n<p>b</p></body></html>");
        let body = t.body().unwrap();
        let first = t.first_child(body).unwrap();
        assert!(t.is(first, &["p"]));
        let gap = t.next_sibling(first).unwrap();
        assert_eq!(t.text(gap), Some("\n"));
        let second = t.next_element(first).unwrap();
        assert_eq!(t.stringify(second, true), "b");
        assert_eq!(t.next_sibling(second), None);
    }

    #[test]
    fn decodes_entities_in_text_and_attributes() {
        let t = tree("<body><a href=\"/q?a=1&amp;b=2\">x &lt; y</a></body>");
        let a = t.find(t.body().unwrap(), "a").unwrap();
        assert_eq!(t.attr(a, "href"), Some("/q?a=1&b=2"));
        assert_eq!(t.stringify(a, false), "x < y");
    }

    #[test]
    fn stringify_keeps_newlines_inside_elements() {
        let t = tree("<body><pre><code>a\nb\n</code></pre></body>");
        let code = t.find(t.body().unwrap(), "code").unwrap();
        assert_eq!(t.stringify(code, false), "a\nb\n");
        let text = t.first_child(code).unwrap();
        assert_eq!(t.stringify(text, false), "a b ");
    }

    #[test]
    fn ancestors_and_block_parents() {
        let t = tree("<body><p><strong><em>x</em></strong></p></body>");
        let em = t.find(t.body().unwrap(), "em").unwrap();
        let x = t.first_child(em).unwrap();
        assert!(t.ancestor(x, &["strong"]).is_some());
        let p = t.block_parent(x).unwrap();
        assert!(t.is(p, &["p"]));
        assert!(t.ancestor(x, &["pre"]).is_none());
    }

    #[test]
    fn line_break_swallows_following_newline() {
        let t = tree("<body><p>a<br />\nb</p></body>");
        let p = t.find(t.body().unwrap(), "p").unwrap();
        assert_eq!(t.stringify(p, false), "a\nb");
        let b = t.children(p)[2];
        assert_eq!(t.stringify(b, false), "b");
    }

    #[test]
    fn blank_text_between_inline_elements_is_a_gap() {
        let t = tree("<body><p><em>a</em> <b>b</b></p>\n<p>c</p></body>");
        let body = t.body().unwrap();
        let p = t.first_child(body).unwrap();
        assert!(t.is_inline_gap(t.children(p)[1]));
        assert!(!t.is_inline_gap(t.next_sibling(p).unwrap()));
    }

    #[test]
    fn comments_are_kept() {
        let t = tree("<body><!--marker--></body>");
        let c = t.first_child(t.body().unwrap()).unwrap();
        assert!(t.comment(c).unwrap().contains("marker"));
        assert_eq!(t.stringify(c, true), "");
    }

    #[test]
    fn classes_are_split_on_whitespace() {
        let t = tree("<body><aside class=\"note  positive\"></aside></body>");
        let aside = t.find(t.body().unwrap(), "aside").unwrap();
        assert!(t.has_class(aside, "positive"));
        assert!(!t.has_class(aside, "pos"));
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        assert!(matches!(
            build_tree(&[0xff, 0xfe]),
            Err(MarkupError::Utf8(_))
        ));
    }
}
