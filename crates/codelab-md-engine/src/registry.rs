//! # Parser Registry
//!
//! Source formats are looked up by name. The registry is built once by the
//! caller and passed to whatever needs it; there is no global instance.

use std::collections::BTreeMap;

use crate::error::ParseError;
use crate::models::{Document, Node};
use crate::options::ParseOptions;
use crate::parsing;

/// A source format that can be turned into the document model.
pub trait Parser: Send + Sync {
    fn parse(&self, input: &str, opts: &ParseOptions) -> Result<Document, ParseError>;

    fn parse_fragment(&self, input: &str, opts: &ParseOptions) -> Result<Vec<Node>, ParseError>;
}

/// The tutorial markdown dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownParser;

impl Parser for MarkdownParser {
    fn parse(&self, input: &str, opts: &ParseOptions) -> Result<Document, ParseError> {
        parsing::parse_document(input, opts)
    }

    fn parse_fragment(&self, input: &str, opts: &ParseOptions) -> Result<Vec<Node>, ParseError> {
        parsing::parse_fragment(input, opts)
    }
}

#[derive(Default)]
pub struct ParserRegistry {
    parsers: BTreeMap<String, Box<dyn Parser>>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the markdown parser under `"md"`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("md", MarkdownParser);
        registry
    }

    /// Registers `parser` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, parser: impl Parser + 'static) {
        self.parsers.insert(name.into(), Box::new(parser));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Parser> {
        self.parsers.get(name).map(|p| p.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parsers.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("parsers", &self.parsers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;

    impl Parser for Empty {
        fn parse(&self, _: &str, _: &ParseOptions) -> Result<Document, ParseError> {
            Ok(Document::default())
        }

        fn parse_fragment(&self, _: &str, _: &ParseOptions) -> Result<Vec<Node>, ParseError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn defaults_register_markdown() {
        let registry = ParserRegistry::with_defaults();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["md"]);
        let doc = registry
            .get("md")
            .unwrap()
            .parse("# Hi\nid: hi\n", &ParseOptions::default())
            .unwrap();
        assert_eq!(doc.title, "Hi");
        assert!(registry.get("html").is_none());
    }

    #[test]
    fn registering_replaces_by_name() {
        let mut registry = ParserRegistry::with_defaults();
        registry.register("md", Empty);
        let doc = registry
            .get("md")
            .unwrap()
            .parse("# Hi\nid: hi\n", &ParseOptions::default())
            .unwrap();
        assert!(doc.title.is_empty());
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ParserRegistry>();
    }
}
