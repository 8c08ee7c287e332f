//! Template component lookup.
//!
//! Which file renders a route is the host's business; [`ComponentResolver`]
//! is the seam. [`FsComponentResolver`] implements the directory conventions:
//!
//! - markdown with `template = "page"` → `<templates_dir>/page.tsx`
//! - markdown without → `<item dir>/<template_name>`
//! - page components → themselves, or `name.<locale>.ext` siblings

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{ContentConfig, LocaleConfig};
use crate::log;

/// No template exists where one was expected. The route is registered anyway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no template component found for `{item}`, expected `{}`", .component.display())]
pub struct MissingComponentWarning {
    pub item: String,
    /// Computed component path, used regardless.
    pub component: PathBuf,
}

impl MissingComponentWarning {
    pub fn report(&self) {
        log!("warning"; "{}", self);
    }
}

pub trait ComponentResolver: Send + Sync {
    /// Component rendering a markdown item.
    ///
    /// `Err` still carries the computed path.
    fn markdown_component(
        &self,
        item: &Path,
        template: Option<&str>,
    ) -> Result<PathBuf, MissingComponentWarning>;

    /// `locale → component` for a page component and its localized siblings.
    /// The unsuffixed file maps to the default locale.
    fn localized_components(&self, item: &Path, config: &LocaleConfig) -> BTreeMap<String, PathBuf>;
}

/// Filesystem conventions.
#[derive(Debug, Clone)]
pub struct FsComponentResolver {
    templates_dir: PathBuf,
    template_name: String,
}

impl FsComponentResolver {
    /// Extension of named templates.
    pub const TEMPLATE_EXT: &'static str = "tsx";

    pub fn new(config: &ContentConfig) -> Self {
        Self {
            templates_dir: config.templates_dir.clone(),
            template_name: config.template_name.clone(),
        }
    }
}

impl ComponentResolver for FsComponentResolver {
    fn markdown_component(
        &self,
        item: &Path,
        template: Option<&str>,
    ) -> Result<PathBuf, MissingComponentWarning> {
        let component = match template {
            Some(name) => self
                .templates_dir
                .join(format!("{name}.{}", Self::TEMPLATE_EXT)),
            None => item
                .parent()
                .unwrap_or(Path::new(""))
                .join(&self.template_name),
        };

        if component.is_file() {
            Ok(component)
        } else {
            Err(MissingComponentWarning {
                item: item.display().to_string(),
                component,
            })
        }
    }

    fn localized_components(&self, item: &Path, config: &LocaleConfig) -> BTreeMap<String, PathBuf> {
        let mut output = BTreeMap::new();
        let dir = item.parent().unwrap_or(Path::new(""));
        let Some(file_name) = item.file_name().and_then(|n| n.to_str()) else {
            return output;
        };
        let (stem, ext) = file_name.rsplit_once('.').unwrap_or((file_name, ""));
        let with_ext = |name: &str| {
            if ext.is_empty() {
                name.to_string()
            } else {
                format!("{name}.{ext}")
            }
        };

        let base = config
            .locales
            .iter()
            .find_map(|locale| stem.strip_suffix(&format!(".{locale}")))
            .unwrap_or(stem);

        for locale in &config.locales {
            let candidate = dir.join(with_ext(&format!("{base}.{locale}")));
            if candidate.is_file() {
                output.insert(locale.clone(), candidate);
            }
        }

        let unsuffixed = dir.join(with_ext(base));
        if unsuffixed.is_file() {
            output.insert(config.default_locale.clone(), unsuffixed);
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn resolver(root: &Path) -> FsComponentResolver {
        FsComponentResolver {
            templates_dir: root.join("src/templates"),
            template_name: "tpl.tsx".into(),
        }
    }

    #[test]
    fn test_named_template() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/templates")).unwrap();
        fs::write(dir.path().join("src/templates/page.tsx"), "").unwrap();

        let item = dir.path().join("src/content/about/index.md");
        let component = resolver(dir.path())
            .markdown_component(&item, Some("page"))
            .unwrap();
        assert_eq!(component, dir.path().join("src/templates/page.tsx"));
    }

    #[test]
    fn test_directory_template_missing_still_has_path() {
        let dir = tempfile::tempdir().unwrap();
        let item = dir.path().join("src/content/blog/post.md");
        let warning = resolver(dir.path())
            .markdown_component(&item, None)
            .unwrap_err();
        assert_eq!(warning.component, dir.path().join("src/content/blog/tpl.tsx"));
        assert!(warning.to_string().contains("post.md"));
    }

    #[test]
    fn test_single_component_maps_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let item = dir.path().join("contact.tsx");
        fs::write(&item, "").unwrap();

        let config = LocaleConfig::new(["en", "it"], "en", true);
        let found = resolver(dir.path()).localized_components(&item, &config);
        assert_eq!(found.len(), 1);
        assert_eq!(found["en"], item);
    }

    #[test]
    fn test_localized_siblings() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["about.tsx", "about.it.tsx", "about.de.tsx"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let config = LocaleConfig::new(["en", "it", "de"], "en", true);
        let resolver = resolver(dir.path());

        // same answer from any member of the family
        for name in ["about.tsx", "about.it.tsx"] {
            let found = resolver.localized_components(&dir.path().join(name), &config);
            assert_eq!(found.len(), 3);
            assert_eq!(found["it"], dir.path().join("about.it.tsx"));
            assert_eq!(found["en"], dir.path().join("about.tsx"));
        }
    }
}
