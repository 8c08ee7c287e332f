//! Content file path parsing.
//!
//! ```text
//! src/content/about/index.it.md
//! └─ root ───┘└dir─┘└name┘└┘
//!                         explicit_locale
//! ```

use std::path::{Path, PathBuf};

use super::{Recovered, RouteId};
use crate::config::ConfigError;
use crate::utils::path::to_slash;

/// A content path split into its routing components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    /// Directory relative to the content root, `/`-prefixed (`/about`).
    pub dir: String,
    /// First dot-segment of the file stem (`index`).
    pub name: String,
    /// Last dot-segment of the file stem, when there are at least two.
    pub explicit_locale: Option<String>,
}

impl ParsedPath {
    pub fn route_id(&self) -> RouteId {
        RouteId::from_parts(&self.dir, &self.name)
    }
}

/// Strips configured content roots and splits file names.
#[derive(Debug, Clone, Copy)]
pub struct PathParser<'a> {
    roots: &'a [PathBuf],
}

impl<'a> PathParser<'a> {
    pub fn new(roots: &'a [PathBuf]) -> Self {
        Self { roots }
    }

    /// First configured root containing `path`, and the path relative to it.
    ///
    /// Roots are compared component-wise, so `src/content` does not match
    /// `src/contents/a.md`.
    pub fn match_root(&self, path: &Path) -> Result<(&'a Path, String), ConfigError> {
        let slash = to_slash(path);
        for root in self.roots {
            let root_slash = to_slash(root);
            let root_slash = root_slash.trim_end_matches('/');
            if let Some(rest) = slash.strip_prefix(root_slash)
                && (rest.is_empty() || rest.starts_with('/'))
            {
                return Ok((root.as_path(), rest.to_string()));
            }
        }
        Err(ConfigError::UnmatchedContentRoot {
            path: slash,
            fallback: self
                .roots
                .first()
                .map(|r| to_slash(r))
                .unwrap_or_default(),
        })
    }

    /// Parse an absolute content path.
    ///
    /// A path outside every root is parsed as-is, with the error attached.
    pub fn parse(&self, path: &Path) -> Recovered<ParsedPath> {
        match self.match_root(path) {
            Ok((_, relative)) => Recovered::ok(Self::split(&relative)),
            Err(error) => Recovered::with_error(Self::split(&to_slash(path)), error),
        }
    }

    /// Split a root-relative path (`/about/index.it.md`).
    pub fn split(relative: &str) -> ParsedPath {
        let relative = relative.replace('\\', "/");
        let (dir, file) = match relative.rsplit_once('/') {
            Some((dir, file)) => (dir, file),
            None => ("", relative.as_str()),
        };

        // Only the last extension is dropped: `index.it.md` -> `index.it`
        let stem = match file.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => file,
        };

        let segments: Vec<&str> = stem.split('.').collect();
        let explicit_locale = match segments.as_slice() {
            [_, .., last] if !last.is_empty() => Some((*last).to_string()),
            _ => None,
        };

        ParsedPath {
            dir: format!("/{}", dir.trim_start_matches('/')),
            name: segments[0].to_string(),
            explicit_locale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roots() -> Vec<PathBuf> {
        vec![
            PathBuf::from("/site/src/pages"),
            PathBuf::from("/site/src/content"),
        ]
    }

    #[test]
    fn test_parse_default_locale_file() {
        let roots = roots();
        let parsed = PathParser::new(&roots).parse(Path::new("/site/src/content/about/index.md"));
        assert!(parsed.is_ok());
        assert_eq!(
            parsed.value,
            ParsedPath {
                dir: "/about".into(),
                name: "index".into(),
                explicit_locale: None,
            }
        );
        assert_eq!(parsed.value.route_id().as_str(), "/about/");
    }

    #[test]
    fn test_parse_explicit_locale() {
        let roots = roots();
        let parsed = PathParser::new(&roots)
            .parse(Path::new("/site/src/content/about/index.it.md"))
            .value;
        assert_eq!(parsed.name, "index");
        assert_eq!(parsed.explicit_locale.as_deref(), Some("it"));
        assert_eq!(parsed.route_id().as_str(), "/about/");
    }

    #[test]
    fn test_first_segment_is_name_last_is_locale() {
        let parsed = PathParser::split("/blog/post.draft.en.mdx");
        assert_eq!(parsed.name, "post");
        assert_eq!(parsed.explicit_locale.as_deref(), Some("en"));
        assert_eq!(parsed.route_id().as_str(), "/blog/post/");
    }

    #[test]
    fn test_top_level_file() {
        let parsed = PathParser::split("/contact.tsx");
        assert_eq!(parsed.dir, "/");
        assert_eq!(parsed.name, "contact");
        assert_eq!(parsed.explicit_locale, None);
        assert_eq!(parsed.route_id().as_str(), "/contact/");

        assert_eq!(PathParser::split("/index.js").route_id().as_str(), "/");
    }

    #[test]
    fn test_first_matching_root_wins() {
        let roots = vec![PathBuf::from("/site/src"), PathBuf::from("/site/src/content")];
        let (root, rest) = PathParser::new(&roots)
            .match_root(Path::new("/site/src/content/a.md"))
            .unwrap();
        assert_eq!(root, Path::new("/site/src"));
        assert_eq!(rest, "/content/a.md");
    }

    #[test]
    fn test_root_matches_whole_components() {
        let roots = roots();
        let parsed = PathParser::new(&roots).parse(Path::new("/site/src/contents/a.md"));
        assert!(matches!(
            parsed.error,
            Some(ConfigError::UnmatchedContentRoot { .. })
        ));
    }

    #[test]
    fn test_unmatched_root_is_recoverable() {
        let roots = roots();
        let parsed = PathParser::new(&roots).parse(Path::new("/elsewhere/notes/todo.md"));
        let error = parsed.error.as_ref().unwrap();
        assert!(error.is_recoverable());
        assert!(error.to_string().contains("/site/src/pages"));
        assert_eq!(parsed.value.dir, "/elsewhere/notes");
        assert_eq!(parsed.value.name, "todo");
    }

    #[test]
    fn test_windows_separators() {
        let parsed = PathParser::split("\\docs\\guide.it.md");
        assert_eq!(parsed.dir, "/docs");
        assert_eq!(parsed.explicit_locale.as_deref(), Some("it"));
    }
}
