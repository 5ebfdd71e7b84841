use crate::parsing::markup::MarkupError;

/// Conditions that abort a parse. Anything else degrades to a dropped node.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("document has no body")]
    MissingBody,
    #[error("invalid metadata format: missing or empty id")]
    MissingId,
    #[error("fragments cannot define steps")]
    FragmentSteps,
    #[error("fragments cannot import other documents")]
    FragmentImports,
    #[error(transparent)]
    Markup(#[from] MarkupError),
}
