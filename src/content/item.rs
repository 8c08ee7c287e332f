//! Content items and their route registrations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{Frontmatter, slugs_from_comment};
use crate::component::{ComponentResolver, MissingComponentWarning};
use crate::config::{ConfigError, Options};
use crate::core::ContentKind;
use crate::route::{LocaleContext, LocaleResolver, PathParser, RouteEntry, RouteId, UrlBuilder};
use crate::utils::path::to_slash;

/// A page component (`.js/.jsx/.ts/.tsx`).
#[derive(Debug, Clone, PartialEq)]
pub struct FileItem {
    pub id: String,
    pub path: PathBuf,
    /// Source text, scanned for `@slug` tags.
    pub source: String,
}

/// A markdown document (`.md/.mdx`).
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownItem {
    pub id: String,
    pub path: PathBuf,
    pub frontmatter: Option<Frontmatter>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
    File(FileItem),
    Markdown(MarkdownItem),
}

/// One `(route id, locale)` an item asks to be registered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub route_id: RouteId,
    pub locale: String,
    pub entry: RouteEntry,
}

/// Everything derived from one item; the caller registers and reports.
#[derive(Debug, Default)]
pub struct Derivation {
    pub registrations: Vec<Registration>,
    pub errors: Vec<ConfigError>,
    pub warnings: Vec<MissingComponentWarning>,
}

impl Derivation {
    pub fn is_route(&self) -> bool {
        !self.registrations.is_empty()
    }

    /// Log errors and warnings.
    pub fn report(&self) {
        for error in &self.errors {
            error.report();
        }
        for warning in &self.warnings {
            warning.report();
        }
    }
}

/// Shared inputs of [`ContentItem::derive`].
#[derive(Clone, Copy)]
pub struct DeriveContext<'a> {
    pub options: &'a Options,
    pub components: &'a dyn ComponentResolver,
}

impl ContentItem {
    /// Read a content file. `None` for files that are not content.
    ///
    /// The id is the path relative to `root`.
    pub fn load(path: &Path, root: &Path) -> Result<Option<Self>> {
        let Some(kind) = ContentKind::from_path(path) else {
            return Ok(None);
        };
        let id = to_slash(path.strip_prefix(root).unwrap_or(path));
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display()))?;

        let item = match kind {
            ContentKind::Component => Self::File(FileItem {
                id,
                path: path.to_path_buf(),
                source: text,
            }),
            ContentKind::Markdown => {
                let frontmatter = Frontmatter::extract(&text)
                    .with_context(|| format!("bad frontmatter in '{}'", path.display()))?
                    .map(|(fm, _)| fm);
                Self::Markdown(MarkdownItem {
                    id,
                    path: path.to_path_buf(),
                    frontmatter,
                })
            }
        };
        Ok(Some(item))
    }

    pub fn id(&self) -> &str {
        match self {
            Self::File(item) => &item.id,
            Self::Markdown(item) => &item.id,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::File(item) => &item.path,
            Self::Markdown(item) => &item.path,
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            Self::File(_) => ContentKind::Component,
            Self::Markdown(_) => ContentKind::Markdown,
        }
    }

    /// Route id of the item, or `None` when it is excluded from localization.
    pub fn route_id(&self, options: &Options) -> Option<RouteId> {
        let parsed = PathParser::new(&options.content.paths).parse(self.path()).value;
        let route_id = parsed.route_id();
        (!options.content.is_excluded(route_id.as_str())).then_some(route_id)
    }

    /// Derive the registrations of this item.
    pub fn derive(&self, cx: &DeriveContext<'_>) -> Derivation {
        let mut out = Derivation::default();
        let parsed = PathParser::new(&cx.options.content.paths).parse(self.path());
        out.errors.extend(parsed.error);
        let parsed = parsed.value;

        let route_id = parsed.route_id();
        if cx.options.content.is_excluded(route_id.as_str()) {
            crate::debug!("route"; "{} is excluded, skipping {}", route_id, self.id());
            return out;
        }

        let config = &cx.options.i18n;
        let urls = UrlBuilder::new(config);
        let mut resolve = |frontmatter_locale: Option<&str>| {
            let lcx = LocaleContext {
                parsed: &parsed,
                frontmatter_locale,
                config,
            };
            let resolved = LocaleResolver::resolve(&lcx, self.id());
            out.errors.extend(resolved.error);
            resolved.value.locale
        };

        match self {
            Self::File(item) => {
                let own_locale = resolve(None);
                let slugs = slugs_from_comment(&item.source);
                let components = cx.components.localized_components(&item.path, config);

                // One component for the whole family: it renders every locale
                let managed: Vec<String> = if components.len() == 1 {
                    config.locales.clone()
                } else {
                    vec![own_locale]
                };

                for locale in managed {
                    let slug = slugs
                        .iter()
                        .find(|s| s.locale == locale)
                        .map_or(route_id.as_str(), |s| s.slug.as_str());
                    let component = components.get(&locale).unwrap_or(&item.path);
                    out.registrations.push(Registration {
                        route_id: route_id.clone(),
                        entry: RouteEntry::new(
                            urls.build(slug, &locale),
                            to_slash(component),
                            &item.id,
                        ),
                        locale,
                    });
                }
            }
            Self::Markdown(item) => {
                let fm = item.frontmatter.clone().unwrap_or_default();
                let slug_key = cx.options.content.slug_key.as_str();
                let blocks = fm.locale_blocks(slug_key);
                let top_slug = fm.get_str(slug_key);

                let is_route = fm.template().is_some()
                    || top_slug.is_some()
                    || blocks.iter().any(|b| b.slug.is_some());
                if !is_route {
                    crate::debug!("route"; "{} has no template or slug, not a route", item.id);
                    return out;
                }

                let component = match cx.components.markdown_component(&item.path, fm.template()) {
                    Ok(component) => component,
                    Err(warning) => {
                        let component = warning.component.clone();
                        out.warnings.push(warning);
                        component
                    }
                };
                let component = to_slash(&component);

                let targets: Vec<(String, Option<&str>)> = if blocks.is_empty() {
                    vec![(resolve(None), top_slug)]
                } else {
                    blocks
                        .iter()
                        .map(|b| (resolve(Some(b.locale.as_str())), b.slug.as_deref().or(top_slug)))
                        .collect()
                };

                for (locale, slug) in targets {
                    let slug = slug.unwrap_or(route_id.as_str());
                    out.registrations.push(Registration {
                        route_id: route_id.clone(),
                        entry: RouteEntry::new(urls.build(slug, &locale), component.clone(), &item.id),
                        locale,
                    });
                }
            }
        }

        out
    }
}
