use std::collections::BTreeSet;

/// Domains an image alt URL may point at to become an embedded frame.
pub const DEFAULT_FRAME_DOMAINS: &[&str] = &[
    "carto.com",
    "codepen.io",
    "dartlang.org",
    "dartpad.dev",
    "demo.arcade.software",
    "github.com",
    "glitch.com",
    "google.com",
    "google.dev",
    "observablehq.com",
    "repl.it",
    "web.dev",
];

/// Caller-supplied knobs for a single parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Extra metadata keys (lowercase) copied into [`crate::Document::extra`].
    pub pass_metadata: BTreeSet<String>,
    /// Frame allow-list, matched against the end of the host name.
    pub frame_domains: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            pass_metadata: BTreeSet::new(),
            frame_domains: DEFAULT_FRAME_DOMAINS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl ParseOptions {
    pub fn with_pass_metadata<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.pass_metadata
            .extend(keys.into_iter().map(|k| k.as_ref().trim().to_lowercase()));
        self
    }

    pub fn with_frame_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.frame_domains = domains
            .into_iter()
            .map(|d| d.as_ref().trim().to_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        self
    }

    /// True when `host` is an allowed domain or one of its subdomains.
    pub fn allows_frame(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        self.frame_domains.iter().any(|domain| {
            host == *domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|rest| rest.ends_with('.'))
        })
    }
}
