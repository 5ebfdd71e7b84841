pub mod document;
pub mod node;

pub use document::{Document, Step};
pub use node::*;
