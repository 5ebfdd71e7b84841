pub mod error;
pub mod models;
pub mod options;
pub mod parsing;
pub mod registry;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use error::ParseError;
pub use models::*;
pub use options::{DEFAULT_FRAME_DOMAINS, ParseOptions};
pub use parsing::{parse_document, parse_fragment};
pub use registry::{MarkdownParser, Parser, ParserRegistry};
