//! # Document Metadata
//!
//! The first paragraph after the title holds `key: value` lines describing
//! the document. Keys are matched case-insensitively; values are trimmed.
//! The paragraph must name a non-empty `id`.
//!
//! ## Known keys
//!
//! | Key                  | Field                    |
//! |----------------------|--------------------------|
//! | `id`                 | [`Document::id`]         |
//! | `authors`            | [`Document::authors`]    |
//! | `summary`            | [`Document::summary`]    |
//! | `categories`         | [`Document::categories`] |
//! | `environments`/`tags`| [`Document::tags`]       |
//! | `status`             | [`Document::status`]     |
//! | `feedback link`      | [`Document::feedback`]   |
//! | `analytics account`  | [`Document::analytics`]  |
//! | `badge path`         | [`Document::badge_path`] |
//!
//! Any other key is copied to [`Document::extra`] only when it is listed in
//! [`ParseOptions::pass_metadata`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use super::text::{clean, split_list};
use crate::error::ParseError;
use crate::models::Document;
use crate::options::ParseOptions;

const META_AUTHORS: &str = "authors";
const META_BADGE_PATH: &str = "badge path";
const META_SUMMARY: &str = "summary";
const META_ID: &str = "id";
const META_CATEGORIES: &str = "categories";
const META_ENVIRONMENTS: &str = "environments";
const META_STATUS: &str = "status";
const META_FEEDBACK_LINK: &str = "feedback link";
const META_ANALYTICS_ACCOUNT: &str = "analytics account";
const META_TAGS: &str = "tags";

fn field_regex() -> &'static Regex {
    static FIELD_REGEX: OnceLock<Regex> = OnceLock::new();
    FIELD_REGEX.get_or_init(|| Regex::new(r"(.+?):(.+)").expect("Invalid metadata regex"))
}

/// Parses `key: value` lines into a map with lowercase keys. Later lines
/// win over earlier ones with the same key.
pub fn parse_fields(text: &str) -> BTreeMap<String, String> {
    clean(text)
        .lines()
        .filter_map(|line| {
            let caps = field_regex().captures(line)?;
            Some((
                caps[1].trim().to_lowercase(),
                caps[2].trim().to_string(),
            ))
        })
        .collect()
}

/// Fills `doc` from the metadata paragraph text.
pub fn parse_metadata(text: &str, doc: &mut Document, opts: &ParseOptions) -> Result<(), ParseError> {
    let fields = parse_fields(text);
    if fields.get(META_ID).is_none_or(|id| id.is_empty()) {
        return Err(ParseError::MissingId);
    }

    for (key, value) in fields {
        match key.as_str() {
            META_ID => doc.id = value,
            META_AUTHORS => doc.authors = value,
            META_SUMMARY => doc.summary = value,
            META_BADGE_PATH => doc.badge_path = value,
            META_CATEGORIES => doc.categories.extend(split_list(&value)),
            META_ENVIRONMENTS | META_TAGS => doc.tags.extend(split_list(&value)),
            META_STATUS => {
                doc.status = split_list(&value).into_iter().collect();
            }
            META_FEEDBACK_LINK => doc.feedback = value,
            META_ANALYTICS_ACCOUNT => doc.analytics = value,
            _ if opts.pass_metadata.contains(&key) => {
                doc.extra.insert(key, value);
            }
            _ => debug!("ignoring metadata key {key:?}"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str, opts: &ParseOptions) -> Result<Document, ParseError> {
        let mut doc = Document::default();
        parse_metadata(text, &mut doc, opts)?;
        Ok(doc)
    }

    #[test]
    fn known_keys_fill_fields() {
        let doc = parse(
            "id: my-lab\nAuthors: Jane Doe\nSummary: Learn things\ncategories: Web, Cloud\nenvironments: Web\ntags: kiosk\nstatus: Draft, Published\nFeedback Link: https://example.com/bugs\nAnalytics Account: UA-1\nbadge path: badges/x",
            &ParseOptions::default(),
        )
        .unwrap();
        assert_eq!(doc.id, "my-lab");
        assert_eq!(doc.authors, "Jane Doe");
        assert_eq!(doc.summary, "Learn things");
        assert_eq!(
            doc.categories.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["cloud", "web"]
        );
        assert_eq!(
            doc.tags.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["kiosk", "web"]
        );
        assert_eq!(doc.status, vec!["draft", "published"]);
        assert_eq!(doc.feedback, "https://example.com/bugs");
        assert_eq!(doc.analytics, "UA-1");
        assert_eq!(doc.badge_path, "badges/x");
        assert!(doc.extra.is_empty());
    }

    #[test]
    fn missing_or_empty_id_is_an_error() {
        let opts = ParseOptions::default();
        assert!(matches!(
            parse("summary: nothing", &opts),
            Err(ParseError::MissingId)
        ));
        assert!(matches!(parse("id:   ", &opts), Err(ParseError::MissingId)));
    }

    #[test]
    fn only_listed_extra_keys_pass() {
        let opts = ParseOptions::default().with_pass_metadata(["source"]);
        let doc = parse("id: x\nsource: docs/x.md\nsecret: nope", &opts).unwrap();
        assert_eq!(doc.extra.get("source").map(String::as_str), Some("docs/x.md"));
        assert!(!doc.extra.contains_key("secret"));
    }

    #[test]
    fn later_duplicates_win_and_values_keep_colons() {
        let fields = parse_fields("id: a\nid: b\nurl: https://x.dev/a:b");
        assert_eq!(fields["id"], "b");
        assert_eq!(fields["url"], "https://x.dev/a:b");
    }

    #[test]
    fn lines_without_separator_are_skipped() {
        let fields = parse_fields("id: a\njust words\n: novalue");
        assert_eq!(fields.len(), 1);
    }
}
