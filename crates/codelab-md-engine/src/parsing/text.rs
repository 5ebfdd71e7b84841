//! Small string helpers shared by the walker and the metadata parser.

use std::collections::BTreeSet;

/// Typographic characters introduced by smart punctuation, mapped back to
/// their ASCII spelling so header and directive matching stays simple.
const CLEANUPS: &[(char, &str)] = &[
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{2026}', "..."),
    ('\u{00A0}', " "),
    ('\u{0085}', " "),
];

/// Replaces curly quotes, ellipses and odd spaces with ASCII equivalents.
pub fn clean(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match CLEANUPS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => out.push_str(to),
            None => out.push(c),
        }
    }
    out
}

/// Converts `s` to a slug: lowercase ASCII alphanumerics separated by single
/// hyphens, with no hyphen at either end.
pub fn slug(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut dash = true;
    for c in s.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            dash = false;
        } else if !dash {
            out.push('-');
            dash = true;
        }
    }
    if out.ends_with('-') {
        out.pop();
    }
    out
}

/// Splits a comma-separated value into trimmed, lowercase, non-empty entries.
pub fn split_list(v: &str) -> BTreeSet<String> {
    v.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Hello World", "hello-world")]
    #[case("  --Hello,   World!!  ", "hello-world")]
    #[case("a--b", "a-b")]
    #[case("Step 1: Install", "step-1-install")]
    #[case("!!!", "")]
    #[case("", "")]
    fn slug_collapses_separators(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slug(input), expected);
    }

    #[test]
    fn slug_never_repeats_or_borders_hyphens() {
        for input in ["x - - y", "-x-", "ÀB c", "tab\tsep"] {
            let s = slug(input);
            assert!(!s.starts_with('-'), "{s}");
            assert!(!s.ends_with('-'), "{s}");
            assert!(!s.contains("--"), "{s}");
        }
    }

    #[test]
    fn clean_maps_smart_punctuation() {
        assert_eq!(clean("What you\u{2019}ll learn\u{2026}"), "What you'll learn...");
        assert_eq!(clean("\u{201C}q\u{201D}\u{00A0}x"), "\"q\" x");
    }

    #[test]
    fn split_list_normalizes_entries() {
        let tags = split_list(" Web, iOS ,web,, ANDROID ");
        assert_eq!(
            tags.into_iter().collect::<Vec<_>>(),
            vec!["android", "ios", "web"]
        );
    }
}
