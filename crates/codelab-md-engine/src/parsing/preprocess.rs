//! Import directive rewriting.
//!
//! A line consisting only of `<<path/to/file.md>>` references another
//! document. The markdown renderer would treat it as text (or mangle the
//! angle brackets), so before rendering each directive is replaced by an
//! HTML comment placeholder that survives rendering untouched and is picked
//! up again by the walker.

use std::sync::OnceLock;

use regex::Regex;

/// Prefix of the comment body marking a converted import directive.
pub const IMPORT_MARKER: &str = "__unsupported_import_zmcgv2epyv=";

fn import_regex() -> &'static Regex {
    static IMPORT_REGEX: OnceLock<Regex> = OnceLock::new();
    IMPORT_REGEX
        .get_or_init(|| Regex::new(r"^<<([^<>()]+\.md)>>\s*$").expect("Invalid import regex"))
}

/// Rewrites every import directive line into a placeholder comment.
pub fn convert_imports(content: &str) -> String {
    content
        .split('\n')
        .map(|line| match import_regex().captures(line) {
            Some(caps) => format!(
                "<!--{IMPORT_MARKER}{}-->",
                html_escape::encode_text(&caps[1])
            ),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extracts the import target from a placeholder comment body, if it is one.
pub fn import_target(comment: &str) -> Option<String> {
    let body = comment.trim();
    let body = body.strip_prefix("<!--").unwrap_or(body);
    let body = body.strip_suffix("-->").unwrap_or(body);
    let url = body.trim().strip_prefix(IMPORT_MARKER)?;
    if url.is_empty() {
        return None;
    }
    Some(html_escape::decode_html_entities(url).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_line_becomes_comment() {
        let out = convert_imports("intro\n<<shared/setup.md>>\noutro");
        assert_eq!(
            out,
            format!("intro\n<!--{IMPORT_MARKER}shared/setup.md-->\noutro")
        );
    }

    #[test]
    fn trailing_whitespace_is_allowed() {
        let out = convert_imports("<<a.md>>  \r");
        assert!(out.starts_with("<!--"));
    }

    #[test]
    fn directive_must_fill_the_line() {
        let input = "see <<a.md>> here\n  <<b.md>>\n<<c.txt>>";
        assert_eq!(convert_imports(input), input);
    }

    #[test]
    fn ampersand_round_trips_through_placeholder() {
        let out = convert_imports("<<a&b.md>>");
        assert_eq!(import_target(&out).as_deref(), Some("a&b.md"));
    }

    #[test]
    fn import_target_ignores_other_comments() {
        assert_eq!(import_target("<!-- just a note -->"), None);
        assert_eq!(import_target(&format!("{IMPORT_MARKER}x.md")).as_deref(), Some("x.md"));
        assert_eq!(import_target(IMPORT_MARKER), None);
    }
}
