//! Locale-independent route identity.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::normalize_url_path;

/// Join key for every localized version of one logical page.
///
/// Always begins and ends with `/`; `index` names collapse into their
/// directory: `("/about", "index")` and `("/", "about")` both give `/about/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(String);

impl RouteId {
    /// Normalize an existing id or slug.
    pub fn new(id: &str) -> Self {
        Self(normalize_url_path(id))
    }

    /// Compute the id of a content file from its directory and name.
    pub fn from_parts(dir: &str, name: &str) -> Self {
        if name == "index" {
            Self::new(dir)
        } else {
            Self::new(&format!("{dir}/{name}"))
        }
    }

    pub fn root() -> Self {
        Self("/".to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id without surrounding slashes (`/blog/post/` -> `blog/post`).
    pub fn slug(&self) -> &str {
        self.0.trim_matches('/')
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Whether this is a `404` page.
    pub fn is_not_found(&self) -> bool {
        self.slug() == "404"
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RouteId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RouteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RouteId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Serialize for RouteId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RouteId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_collapses_into_dir() {
        assert_eq!(RouteId::from_parts("/about", "index").as_str(), "/about/");
        assert_eq!(RouteId::from_parts("", "index"), RouteId::root());
        assert_eq!(RouteId::from_parts("/", "index"), RouteId::root());
    }

    #[test]
    fn test_named_file() {
        assert_eq!(RouteId::from_parts("/blog", "post").as_str(), "/blog/post/");
        assert_eq!(RouteId::from_parts("", "about").as_str(), "/about/");
    }

    #[test]
    fn test_deterministic_and_idempotent() {
        for (dir, name) in [("/a//b", "index"), ("a", "b"), ("", ""), ("/x/", "index")] {
            let first = RouteId::from_parts(dir, name);
            assert_eq!(first, RouteId::from_parts(dir, name));
            assert_eq!(RouteId::new(first.as_str()), first);
        }
        assert_eq!(
            RouteId::from_parts("//docs//", "index").as_str(),
            normalize_url_path("//docs//")
        );
    }

    #[test]
    fn test_slug_and_not_found() {
        assert_eq!(RouteId::new("/blog/post/").slug(), "blog/post");
        assert_eq!(RouteId::root().slug(), "");
        assert!(RouteId::new("404").is_not_found());
        assert!(!RouteId::new("/blog/404/").is_not_found());
    }
}
