//! Markdown to markup rendering via pulldown-cmark.

use pulldown_cmark::{Options, Parser, html};

/// Extensions the tutorial dialect relies on. Fenced code is core CommonMark.
fn options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_DEFINITION_LIST);
    opts.insert(Options::ENABLE_SMART_PUNCTUATION);
    opts
}

/// Renders preprocessed markdown into an XHTML-flavoured document.
///
/// The fragment pulldown-cmark produces is wrapped in `<html><body>` so the
/// tree always has a body to walk.
pub fn render(markdown: &str) -> Vec<u8> {
    let parser = Parser::new_ext(markdown, options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2 + 32);
    out.push_str("<html><body>\n");
    html::push_html(&mut out, parser);
    out.push_str("</body></html>\n");
    out.into_bytes()
}
