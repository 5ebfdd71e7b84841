use std::collections::BTreeSet;

use serde::Serialize;

/// Identity of the markup block element (paragraph, list item, table cell,
/// heading) a node was emitted from.
///
/// Consecutive nodes sharing an identity belong to the same visual block; a
/// node whose identity differs from its predecessor's starts a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(pub(crate) usize);

/// Data every node carries regardless of its kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeMeta {
    /// Enclosing block, `None` for nodes that always stand alone.
    #[serde(skip)]
    pub block: Option<BlockId>,
    /// Environments this node is restricted to. Empty means "everywhere".
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub env: BTreeSet<String>,
}

impl NodeMeta {
    pub fn in_block(block: Option<BlockId>) -> Self {
        Self {
            block,
            env: BTreeSet::new(),
        }
    }
}

/// Kind tag of a [`Node`], including the header and list flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Text,
    Link,
    Image,
    Embed,
    Button,
    Header,
    HeaderChecklist,
    HeaderFaq,
    List,
    ListChecklist,
    ListFaq,
    Code,
    Infobox,
    Grid,
    Survey,
    Import,
    Group,
}

impl NodeKind {
    pub fn is_header(self) -> bool {
        matches!(
            self,
            NodeKind::Header | NodeKind::HeaderChecklist | NodeKind::HeaderFaq
        )
    }
}

/// One typed unit of step content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Text(TextNode),
    Link(LinkNode),
    Image(ImageNode),
    Embed(EmbedNode),
    Button(ButtonNode),
    Header(HeaderNode),
    List(ListNode),
    Code(CodeNode),
    Infobox(InfoboxNode),
    Grid(GridNode),
    Survey(SurveyNode),
    Import(ImportNode),
    /// Nodes of one block, produced by post-processing.
    Group(GroupNode),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Text(_) => NodeKind::Text,
            Node::Link(_) => NodeKind::Link,
            Node::Image(_) => NodeKind::Image,
            Node::Embed(_) => NodeKind::Embed,
            Node::Button(_) => NodeKind::Button,
            Node::Header(h) => match h.flavor {
                Flavor::Plain => NodeKind::Header,
                Flavor::Checklist => NodeKind::HeaderChecklist,
                Flavor::Faq => NodeKind::HeaderFaq,
            },
            Node::List(l) => match l.flavor {
                Flavor::Plain => NodeKind::List,
                Flavor::Checklist => NodeKind::ListChecklist,
                Flavor::Faq => NodeKind::ListFaq,
            },
            Node::Code(_) => NodeKind::Code,
            Node::Infobox(_) => NodeKind::Infobox,
            Node::Grid(_) => NodeKind::Grid,
            Node::Survey(_) => NodeKind::Survey,
            Node::Import(_) => NodeKind::Import,
            Node::Group(_) => NodeKind::Group,
        }
    }

    pub fn meta(&self) -> &NodeMeta {
        match self {
            Node::Text(n) => &n.meta,
            Node::Link(n) => &n.meta,
            Node::Image(n) => &n.meta,
            Node::Embed(n) => &n.meta,
            Node::Button(n) => &n.meta,
            Node::Header(n) => &n.meta,
            Node::List(n) => &n.meta,
            Node::Code(n) => &n.meta,
            Node::Infobox(n) => &n.meta,
            Node::Grid(n) => &n.meta,
            Node::Survey(n) => &n.meta,
            Node::Import(n) => &n.meta,
            Node::Group(n) => &n.meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut NodeMeta {
        match self {
            Node::Text(n) => &mut n.meta,
            Node::Link(n) => &mut n.meta,
            Node::Image(n) => &mut n.meta,
            Node::Embed(n) => &mut n.meta,
            Node::Button(n) => &mut n.meta,
            Node::Header(n) => &mut n.meta,
            Node::List(n) => &mut n.meta,
            Node::Code(n) => &mut n.meta,
            Node::Infobox(n) => &mut n.meta,
            Node::Grid(n) => &mut n.meta,
            Node::Survey(n) => &mut n.meta,
            Node::Import(n) => &mut n.meta,
            Node::Group(n) => &mut n.meta,
        }
    }

    pub fn env(&self) -> &BTreeSet<String> {
        &self.meta().env
    }

    /// True when the node carries nothing worth rendering.
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Text(t) => t.value.is_empty(),
            Node::Group(g) => g.content.is_empty(),
            Node::Link(l) => l.content.is_empty(),
            Node::Header(h) => h.content.is_empty(),
            Node::List(l) => l.items.is_empty(),
            Node::Infobox(i) => i.content.is_empty(),
            Node::Grid(g) => g.rows.is_empty(),
            Node::Survey(s) => s.groups.is_empty(),
            Node::Image(_)
            | Node::Embed(_)
            | Node::Button(_)
            | Node::Code(_)
            | Node::Import(_) => false,
        }
    }

    /// Direct child sequences of this node, for consumers that walk the tree.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Link(n) => n.content.iter().collect(),
            Node::Button(n) => n.content.iter().collect(),
            Node::Header(n) => n.content.iter().collect(),
            Node::List(n) => n.items.iter().flatten().collect(),
            Node::Infobox(n) => n.content.iter().collect(),
            Node::Grid(n) => n
                .rows
                .iter()
                .flatten()
                .flat_map(|cell| cell.content.iter())
                .collect(),
            Node::Group(n) => n.content.iter().collect(),
            Node::Text(_)
            | Node::Image(_)
            | Node::Embed(_)
            | Node::Code(_)
            | Node::Survey(_)
            | Node::Import(_) => Vec::new(),
        }
    }

    /// Depth-first search for any node matching `pred`, including `self`.
    pub fn any(&self, pred: &dyn Fn(&Node) -> bool) -> bool {
        pred(self) || self.children().into_iter().any(|c| c.any(pred))
    }
}

/// Header and items-list flavour, selected by special header texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    #[default]
    Plain,
    Checklist,
    Faq,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub value: String,
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

impl TextNode {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            meta: NodeMeta::default(),
            value: value.into(),
            bold: false,
            italic: false,
            code: false,
        }
    }

    /// Same styling, block and environment: the two runs can be one.
    pub fn same_run(&self, other: &TextNode) -> bool {
        self.bold == other.bold
            && self.italic == other.italic
            && self.code == other.code
            && self.meta == other.meta
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EmbedTarget {
    /// A hosted video, by its id.
    Video { id: String },
    /// An https page on an allow-listed domain.
    Frame { url: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub target: EmbedTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub download: bool,
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub level: u8,
    pub flavor: Flavor,
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub flavor: Flavor,
    pub ordered: bool,
    /// Numbering style (`1`, `a`, `A`, `i`, `I`), always set for ordered lists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    pub items: Vec<Vec<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub value: String,
    pub terminal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InfoboxKind {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoboxNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    #[serde(rename = "infobox")]
    pub kind: InfoboxKind,
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub colspan: u32,
    pub rowspan: u32,
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub rows: Vec<Vec<GridCell>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyGroup {
    pub name: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub id: String,
    pub groups: Vec<SurveyGroup>,
}

/// Reference to another source document. Never expanded here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub content: Vec<Node>,
}
