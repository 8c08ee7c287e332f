//! Which content files produce routes, and how.

use std::path::Path;

const COMPONENT_EXTS: &[&str] = &["js", "jsx", "ts", "tsx"];
const MARKDOWN_EXTS: &[&str] = &["md", "mdx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Page component: renders every locale it manages.
    Component,
    /// Markdown file: one translation, or several locale blocks.
    Markdown,
}

impl ContentKind {
    /// Case-insensitive; `None` for files routing ignores.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if COMPONENT_EXTS.contains(&ext.as_str()) {
            Some(Self::Component)
        } else if MARKDOWN_EXTS.contains(&ext.as_str()) {
            Some(Self::Markdown)
        } else {
            None
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Component => COMPONENT_EXTS,
            Self::Markdown => MARKDOWN_EXTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(
            ContentKind::from_path(Path::new("src/pages/about.tsx")),
            Some(ContentKind::Component)
        );
        assert_eq!(
            ContentKind::from_path(Path::new("src/content/about/index.it.MD")),
            Some(ContentKind::Markdown)
        );
        assert_eq!(ContentKind::from_path(Path::new("src/content/logo.png")), None);
        assert_eq!(ContentKind::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_every_extension_maps_back() {
        for kind in [ContentKind::Component, ContentKind::Markdown] {
            for ext in kind.extensions() {
                let name = format!("page.{ext}");
                assert_eq!(ContentKind::from_path(Path::new(&name)), Some(kind));
            }
        }
    }
}
