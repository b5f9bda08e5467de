//! Directives within a user-agent group.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use regex::Regex;
use url::Url;

use crate::{Error, Result};

/// A single rule line of a group.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// `allow` / `disallow`
    Path(PathDirective),
    /// Anything else (`crawl-delay`, `host`, `sitemap`, unknown tokens)
    Other(OtherDirective),
}

impl Directive {
    /// The path directive, if this is one.
    pub fn as_path(&self) -> Option<&PathDirective> {
        match self {
            Directive::Path(p) => Some(p),
            Directive::Other(_) => None,
        }
    }

    /// The opaque directive, if this is one.
    pub fn as_other(&self) -> Option<&OtherDirective> {
        match self {
            Directive::Path(_) => None,
            Directive::Other(o) => Some(o),
        }
    }
}

/// An `allow` or `disallow` rule keyed by a path pattern.
///
/// # Pattern Format
/// - The pattern is a prefix of the path: `/private` matches `/private/x`
/// - `*` matches any sequence of characters: `/*.pdf` matches `/a/b.pdf`
/// - A trailing `$` anchors to the end: `/*.pdf$` does not match `/a.pdf?x=1`
/// - An empty pattern matches nothing
/// - Percent escapes are decoded on both sides: `/café`, `/caf%C3%A9` and
///   `/caf%c3%a9` are the same pattern
#[derive(Debug, Clone)]
pub struct PathDirective {
    allowed: bool,
    value: String,
    /// Compiled pattern; `None` for the empty pattern
    pattern: Option<Regex>,
}

impl PathDirective {
    /// Create a path directive, compiling its pattern.
    pub fn new(allowed: bool, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let pattern = compile_pattern(&value)?;
        Ok(Self {
            allowed,
            value,
            pattern,
        })
    }

    /// An `allow` directive.
    pub fn allow(value: impl Into<String>) -> Result<Self> {
        Self::new(true, value)
    }

    /// A `disallow` directive.
    pub fn disallow(value: impl Into<String>) -> Result<Self> {
        Self::new(false, value)
    }

    /// Whether a match grants access.
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// The raw pattern text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Match against a URI's path and query.
    pub fn matches(&self, uri: &Url) -> bool {
        self.matches_path(&path_and_query(uri))
    }

    /// Match against a raw or percent-encoded path (with optional `?query`).
    pub fn matches_path(&self, path: &str) -> bool {
        match &self.pattern {
            Some(re) => re.is_match(&decode(path)),
            None => false,
        }
    }
}

impl PartialEq for PathDirective {
    fn eq(&self, other: &Self) -> bool {
        self.allowed == other.allowed && self.value == other.value
    }
}

/// An opaque `name: value` directive. The name keeps its original case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherDirective {
    name: String,
    value: String,
}

impl OtherDirective {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Case-insensitive name comparison.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// The part of a URI that path patterns are matched against.
pub(crate) fn path_and_query(uri: &Url) -> String {
    let mut path = uri.path().to_string();
    if let Some(query) = uri.query() {
        path.push('?');
        path.push_str(query);
    }
    path
}

/// Decode percent escapes; invalid UTF-8 is replaced.
fn decode(text: &str) -> Cow<'_, str> {
    percent_decode_str(text).decode_utf8_lossy()
}

/// Translate a robots.txt path pattern into an anchored regex.
fn compile_pattern(value: &str) -> Result<Option<Regex>> {
    if value.is_empty() {
        return Ok(None);
    }

    let (body, anchored) = match value.strip_suffix('$') {
        Some(body) => (body, true),
        None => (value, false),
    };

    let mut expr = String::with_capacity(body.len() + 8);
    expr.push_str("(?s)^");
    for (i, literal) in body.split('*').enumerate() {
        if i > 0 {
            expr.push_str(".*");
        }
        expr.push_str(&regex::escape(&decode(literal)));
    }
    if anchored {
        expr.push('$');
    }

    Regex::new(&expr)
        .map(Some)
        .map_err(|source| Error::InvalidPattern {
            pattern: value.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_match() {
        let d = PathDirective::disallow("/private").unwrap();
        assert!(d.matches_path("/private"));
        assert!(d.matches_path("/private/public"));
        assert!(d.matches_path("/privateer"));
        assert!(!d.matches_path("/public/private"));
        assert!(!d.is_allowed());
    }

    #[test]
    fn test_empty_pattern_matches_nothing() {
        let d = PathDirective::disallow("").unwrap();
        assert!(!d.matches_path("/"));
        assert!(!d.matches_path(""));
    }

    #[test]
    fn test_wildcard() {
        let d = PathDirective::allow("/*/comments/*/").unwrap();
        assert!(d.matches_path("/post/comments/12/"));
        assert!(d.matches_path("/a/b/comments/c/d/"));
        assert!(!d.matches_path("/post/comments"));

        let any = PathDirective::disallow("*").unwrap();
        assert!(any.matches_path("/anything"));
    }

    #[test]
    fn test_end_anchor() {
        let d = PathDirective::disallow("/*.pdf$").unwrap();
        assert!(d.matches_path("/docs/a.pdf"));
        assert!(!d.matches_path("/docs/a.pdf?download=1"));
        assert!(!d.matches_path("/docs/a.pdfx"));

        let exact = PathDirective::allow("/$").unwrap();
        assert!(exact.matches_path("/"));
        assert!(!exact.matches_path("/index.html"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let d = PathDirective::disallow("/a.b+c(d)?").unwrap();
        assert!(d.matches_path("/a.b+c(d)?x=1"));
        assert!(!d.matches_path("/aXb+c(d)"));
    }

    #[test]
    fn test_matches_uri_includes_query() {
        let d = PathDirective::disallow("/search?q=").unwrap();
        let hit = Url::parse("http://example.com/search?q=rust").unwrap();
        let miss = Url::parse("http://example.com/search").unwrap();
        assert!(d.matches(&hit));
        assert!(!d.matches(&miss));
    }

    #[test]
    fn test_non_ascii_pattern_matches_encoded_uri() {
        let d = PathDirective::disallow("/café").unwrap();
        let uri = Url::parse("http://example.com/café/menu").unwrap();
        assert_eq!(uri.path(), "/caf%C3%A9/menu");
        assert!(d.matches(&uri));
        assert!(d.matches_path("/café/menu"));
        assert!(!d.matches_path("/cafe/menu"));
    }

    #[test]
    fn test_encoded_pattern_matches_either_case() {
        let d = PathDirective::disallow("/caf%c3%a9").unwrap();
        assert!(d.matches_path("/caf%C3%A9/menu"));
        assert!(d.matches_path("/café"));

        let upper = PathDirective::disallow("/a%2Fb").unwrap();
        assert!(upper.matches_path("/a%2fb"));
    }

    #[test]
    fn test_pattern_with_space() {
        let d = PathDirective::disallow("/my docs").unwrap();
        let uri = Url::parse("http://example.com/my docs/a").unwrap();
        assert_eq!(uri.path(), "/my%20docs/a");
        assert!(d.matches(&uri));
        assert!(!d.matches_path("/mydocs/a"));
    }

    #[test]
    fn test_other_directive() {
        let d = OtherDirective::new("Crawl-Delay", "5");
        assert!(d.is("crawl-delay"));
        assert_eq!(d.name(), "Crawl-Delay");
        assert_eq!(d.value(), "5");
    }
}
