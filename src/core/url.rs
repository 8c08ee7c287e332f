//! Page URLs as routes see them: decoded, slash-delimited on both ends.
//!
//! Anything typed by a user or found in a browser goes through
//! [`UrlPath::from_browser`] once; after that every comparison is on the
//! decoded form.

use std::borrow::Borrow;
use std::fmt;
use std::sync::{Arc, LazyLock};

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

/// `/` + non-empty segments each followed by `/`; `""` becomes `/`.
///
/// Idempotent: normalizing a normalized path returns it unchanged.
pub fn normalize_url_path(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 2);
    out.push('/');
    for segment in input.split('/').filter(|s| !s.is_empty()) {
        out.push_str(segment);
        out.push('/');
    }
    out
}

/// Base for resolving bare paths with the `url` parser.
static BASE: LazyLock<Option<Url>> = LazyLock::new(|| Url::parse("http://localhost/").ok());

/// Normalized, percent-decoded page URL. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UrlPath(Arc<str>);

impl UrlPath {
    pub fn new(decoded: &str) -> Self {
        Self(normalize_url_path(decoded.trim()).into())
    }

    pub fn root() -> Self {
        Self("/".into())
    }

    /// Parse a path as a browser sends it: `?query` and `#fragment` are
    /// dropped, `%XX` escapes decoded. Invalid UTF-8 escapes stay encoded.
    pub fn from_browser(encoded: &str) -> Self {
        let encoded = encoded.trim();
        let path = match BASE.as_ref().map(|base| base.join(encoded)) {
            Some(Ok(parsed)) => parsed.path().to_owned(),
            _ => encoded.split(['?', '#']).next().unwrap_or_default().to_owned(),
        };
        match percent_decode_str(&path).decode_utf8() {
            Ok(decoded) => Self::new(&decoded),
            Err(_) => Self::new(&path),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    pub fn first_segment(&self) -> Option<&str> {
        self.segments().next()
    }

    /// `/about/` + `it` -> `/it/about/`
    pub fn with_prefix(&self, segment: &str) -> Self {
        Self::new(&format!("{segment}{}", self.0))
    }

    /// `/it/about/` -> `/about/`; the root stays the root.
    pub fn without_first_segment(&self) -> Self {
        match self.0[1..].split_once('/') {
            Some((_, rest)) => Self::new(rest),
            None => Self::root(),
        }
    }

    /// `/it/about/` + `de` -> `/de/about/`
    pub fn replace_first_segment(&self, segment: &str) -> Self {
        self.without_first_segment().with_prefix(segment)
    }
}

impl Default for UrlPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for UrlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UrlPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UrlPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UrlPath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for UrlPath {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl PartialEq<str> for UrlPath {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for UrlPath {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl Serialize for UrlPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Normalizes on the way in, so hand-edited cache files still compare equal.
impl<'de> Deserialize<'de> for UrlPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_slashes() {
        assert_eq!(normalize_url_path("about"), "/about/");
        assert_eq!(normalize_url_path("/about"), "/about/");
        assert_eq!(normalize_url_path("about/"), "/about/");
        assert_eq!(normalize_url_path(""), "/");
        assert_eq!(normalize_url_path("/"), "/");
    }

    #[test]
    fn test_normalize_collapses_repeated_slashes() {
        assert_eq!(normalize_url_path("//it///about//"), "/it/about/");
        assert_eq!(normalize_url_path("/en//"), "/en/");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["", "/", "a", "//a//b", "a/b/c/", "/it/about/", "///", "x//y"] {
            let once = normalize_url_path(input);
            assert_eq!(normalize_url_path(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_from_browser_decodes_and_strips_query() {
        let url = UrlPath::from_browser("/it/chi%20siamo?ref=nav#team");
        assert_eq!(url.as_str(), "/it/chi siamo/");
    }

    #[test]
    fn test_from_browser_unicode() {
        let url = UrlPath::from_browser("/posts/%E4%B8%AD%E6%96%87/");
        assert_eq!(url.as_str(), "/posts/中文/");
    }

    #[test]
    fn test_segment_ops() {
        let url = UrlPath::new("/it/about/");
        assert_eq!(url.first_segment(), Some("it"));
        assert_eq!(url.without_first_segment(), "/about/");
        assert_eq!(url.replace_first_segment("de"), "/de/about/");
        assert_eq!(UrlPath::new("/about/").with_prefix("en"), "/en/about/");
        assert_eq!(UrlPath::root().with_prefix("en"), "/en/");
        assert_eq!(UrlPath::root().without_first_segment(), "/");
    }

    #[test]
    fn test_serde_normalizes_input() {
        let url = UrlPath::new("/it/chi-siamo/");
        assert_eq!(serde_json::to_string(&url).unwrap(), r#""/it/chi-siamo/""#);

        let parsed: UrlPath = serde_json::from_str(r#""it//chi-siamo""#).unwrap();
        assert_eq!(parsed, url);
    }
}
